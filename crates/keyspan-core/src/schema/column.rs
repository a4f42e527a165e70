use crate::schema::ColumnId;
use derive_more::{Deref, From, IntoIterator};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashMap},
    fmt,
};

///
/// ColumnType
///
/// Logical column type. Only scalars are forward-key encodable; arrays are
/// indexed through inverted indexes.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ColumnType {
    Bool,
    Int,
    Float,
    Bytes,
    Text,
    Array(Box<Self>),
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "BOOL"),
            Self::Int => write!(f, "INT"),
            Self::Float => write!(f, "FLOAT"),
            Self::Bytes => write!(f, "BYTES"),
            Self::Text => write!(f, "TEXT"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

///
/// ColumnDescriptor
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub id: ColumnId,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ColumnType,
    #[serde(default)]
    pub nullable: bool,
}

impl ColumnDescriptor {
    #[must_use]
    pub fn new(id: u32, name: &str, ty: ColumnType, nullable: bool) -> Self {
        Self {
            id: ColumnId::new(id),
            name: name.to_string(),
            ty,
            nullable,
        }
    }
}

///
/// ColumnOrdinalSet
///
/// Set of table-column ordinals (positions in the table's column list).
/// Used to describe which columns a query actually needs.
///

#[derive(Clone, Debug, Default, Deref, Eq, From, IntoIterator, PartialEq)]
pub struct ColumnOrdinalSet(BTreeSet<usize>);

impl ColumnOrdinalSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, ordinal: usize) {
        self.0.insert(ordinal);
    }
}

impl FromIterator<usize> for ColumnOrdinalSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Map from column id to that column's position in a caller-provided row.
pub type ColumnIdMap = HashMap<ColumnId, usize>;
