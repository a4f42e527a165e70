use crate::{
    encoding::Direction,
    schema::{ColumnId, IndexId, IndexSchema, TableId},
};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

///
/// IndexKind
///
/// Closed set, fixed per index. Inverted indexes store one key per element
/// of a container value instead of one key per row.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum IndexKind {
    #[default]
    Forward,
    Inverted,
}

///
/// IndexVersion
///
/// On-disk format of secondary index rows. `SecondaryFamilies` splits stored
/// columns across per-family keys the same way primary rows do.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum IndexVersion {
    #[default]
    Base,
    SecondaryFamilies,
}

///
/// IndexColumn
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexColumn {
    pub id: ColumnId,
    #[serde(default)]
    pub direction: Direction,
}

impl IndexColumn {
    #[must_use]
    pub const fn asc(id: u32) -> Self {
        Self {
            id: ColumnId::new(id),
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub const fn desc(id: u32) -> Self {
        Self {
            id: ColumnId::new(id),
            direction: Direction::Desc,
        }
    }
}

///
/// InterleaveAncestor
///
/// One level of the interleave chain, root first. `shared_prefix_len` is the
/// number of this index's leading columns that live at that level.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct InterleaveAncestor {
    pub table_id: TableId,
    pub index_id: IndexId,
    pub shared_prefix_len: u32,
}

impl InterleaveAncestor {
    #[must_use]
    pub const fn new(table_id: u32, index_id: u32, shared_prefix_len: u32) -> Self {
        Self {
            table_id: TableId::new(table_id),
            index_id: IndexId::new(index_id),
            shared_prefix_len,
        }
    }
}

///
/// InterleaveDescendant
///
/// Back-reference to an index interleaved into this one.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct InterleaveDescendant {
    pub table_id: TableId,
    pub index_id: IndexId,
}

///
/// IndexDescriptor
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexDescriptor {
    pub id: IndexId,
    pub name: String,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub kind: IndexKind,
    #[serde(default)]
    pub version: IndexVersion,
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub extra_column_ids: Vec<ColumnId>,
    #[serde(default)]
    pub stored_column_ids: Vec<ColumnId>,
    #[serde(default)]
    pub interleave_ancestors: Vec<InterleaveAncestor>,
    #[serde(default)]
    pub interleaved_by: Vec<InterleaveDescendant>,
}

impl IndexDescriptor {
    #[must_use]
    pub fn new(id: u32, name: &str, columns: Vec<IndexColumn>) -> Self {
        Self {
            id: IndexId::new(id),
            name: name.to_string(),
            columns,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    #[must_use]
    pub const fn inverted(mut self) -> Self {
        self.kind = IndexKind::Inverted;
        self
    }

    #[must_use]
    pub const fn with_version(mut self, version: IndexVersion) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn with_extra_columns(mut self, ids: &[u32]) -> Self {
        self.extra_column_ids = ids.iter().copied().map(ColumnId::new).collect();
        self
    }

    #[must_use]
    pub fn with_stored_columns(mut self, ids: &[u32]) -> Self {
        self.stored_column_ids = ids.iter().copied().map(ColumnId::new).collect();
        self
    }

    #[must_use]
    pub fn interleaved_in(mut self, ancestors: Vec<InterleaveAncestor>) -> Self {
        self.interleave_ancestors = ancestors;
        self
    }

    #[must_use]
    pub fn with_descendant(mut self, table_id: u32, index_id: u32) -> Self {
        self.interleaved_by.push(InterleaveDescendant {
            table_id: TableId::new(table_id),
            index_id: IndexId::new(index_id),
        });
        self
    }
}

impl IndexSchema for IndexDescriptor {
    fn id(&self) -> IndexId {
        self.id
    }

    fn kind(&self) -> IndexKind {
        self.kind
    }

    fn is_unique(&self) -> bool {
        self.unique
    }

    fn version(&self) -> IndexVersion {
        self.version
    }

    fn columns(&self) -> &[IndexColumn] {
        &self.columns
    }

    fn extra_column_ids(&self) -> &[ColumnId] {
        &self.extra_column_ids
    }

    fn stored_column_ids(&self) -> &[ColumnId] {
        &self.stored_column_ids
    }

    fn interleave_ancestors(&self) -> &[InterleaveAncestor] {
        &self.interleave_ancestors
    }

    fn interleaved_by(&self) -> &[InterleaveDescendant] {
        &self.interleaved_by
    }
}

impl Display for IndexDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .columns
            .iter()
            .map(|column| match column.direction {
                Direction::Asc => column.id.to_string(),
                Direction::Desc => format!("{} DESC", column.id),
            })
            .collect::<Vec<_>>()
            .join(", ");

        let kind = match self.kind {
            IndexKind::Forward => "",
            IndexKind::Inverted => "INVERTED ",
        };

        if self.unique {
            write!(f, "UNIQUE {kind}{}({columns})", self.name)
        } else {
            write!(f, "{kind}{}({columns})", self.name)
        }
    }
}
