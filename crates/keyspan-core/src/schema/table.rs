use crate::schema::{
    ColumnDescriptor, FamilyDescriptor, IndexDescriptor, IndexId, TableId, TableSchema,
};
use serde::{Deserialize, Serialize};

///
/// TableDescriptor
///
/// Reference catalog entry for one table. Secondary indexes are listed in
/// `indexes`; the primary index is kept apart.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableDescriptor {
    pub id: TableId,
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub families: Vec<FamilyDescriptor>,
    pub primary_index: IndexDescriptor,
    #[serde(default)]
    pub indexes: Vec<IndexDescriptor>,
}

impl TableDescriptor {
    #[must_use]
    pub fn new(
        id: u32,
        name: &str,
        columns: Vec<ColumnDescriptor>,
        families: Vec<FamilyDescriptor>,
        primary_index: IndexDescriptor,
    ) -> Self {
        Self {
            id: TableId::new(id),
            name: name.to_string(),
            columns,
            families,
            primary_index,
            indexes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_index(mut self, index: IndexDescriptor) -> Self {
        self.indexes.push(index);
        self
    }

    /// Look up the primary index or a secondary index by id.
    #[must_use]
    pub fn find_index(&self, id: IndexId) -> Option<&IndexDescriptor> {
        if self.primary_index.id == id {
            return Some(&self.primary_index);
        }

        self.indexes.iter().find(|index| index.id == id)
    }
}

impl TableSchema for TableDescriptor {
    type Index = IndexDescriptor;

    fn id(&self) -> TableId {
        self.id
    }

    fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    fn families(&self) -> &[FamilyDescriptor] {
        &self.families
    }

    fn primary_index(&self) -> &IndexDescriptor {
        &self.primary_index
    }
}
