use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

///
/// TableId
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct TableId(u32);

///
/// IndexId
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct IndexId(u32);

///
/// ColumnId
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct ColumnId(u32);

///
/// FamilyId
///
/// Family 0 is the primary family: it always has an entry for every row.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, From, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct FamilyId(u32);

macro_rules! impl_id {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $ty {
                #[must_use]
                pub const fn new(id: u32) -> Self {
                    Self(id)
                }

                #[must_use]
                pub const fn get(self) -> u32 {
                    self.0
                }
            }
        )*
    };
}

impl_id!(TableId, IndexId, ColumnId, FamilyId);

impl FamilyId {
    pub const PRIMARY: Self = Self(0);

    #[must_use]
    pub const fn is_primary(self) -> bool {
        self.0 == 0
    }
}
