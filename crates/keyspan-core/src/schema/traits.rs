use crate::{
    encoding::Direction,
    schema::{
        ColumnDescriptor, ColumnId, FamilyDescriptor, IndexColumn, IndexId, IndexKind,
        IndexVersion, InterleaveAncestor, InterleaveDescendant, TableId,
    },
};

///
/// IndexSchema
///
/// Read access to one index descriptor owned by the catalog.
///

pub trait IndexSchema {
    fn id(&self) -> IndexId;

    fn kind(&self) -> IndexKind;

    fn is_unique(&self) -> bool;

    fn version(&self) -> IndexVersion;

    /// Declared key columns, in key order.
    fn columns(&self) -> &[IndexColumn];

    /// Implicit key columns appended after the declared ones (always
    /// ascending), e.g. primary key columns of a non-unique secondary index.
    fn extra_column_ids(&self) -> &[ColumnId];

    /// Non-key columns whose values the index stores.
    fn stored_column_ids(&self) -> &[ColumnId];

    /// Interleave chain, root ancestor first. Empty if not interleaved.
    fn interleave_ancestors(&self) -> &[InterleaveAncestor];

    /// Indexes interleaved into this one.
    fn interleaved_by(&self) -> &[InterleaveDescendant];

    fn is_inverted(&self) -> bool {
        self.kind() == IndexKind::Inverted
    }

    /// Every key column id with its direction: declared columns, then, for
    /// non-unique indexes, extra columns in ascending direction. Unique
    /// indexes keep their extra columns out of the key.
    fn full_columns(&self) -> (Vec<ColumnId>, Vec<Direction>) {
        let declared = self.columns();
        let extra = if self.is_unique() {
            &[][..]
        } else {
            self.extra_column_ids()
        };

        let mut ids = Vec::with_capacity(declared.len() + extra.len());
        let mut dirs = Vec::with_capacity(declared.len() + extra.len());
        for column in declared {
            ids.push(column.id);
            dirs.push(column.direction);
        }
        for id in extra {
            ids.push(*id);
            dirs.push(Direction::Asc);
        }

        (ids, dirs)
    }
}

///
/// TableSchema
///
/// Read access to one table descriptor owned by the catalog.
///

pub trait TableSchema {
    type Index: IndexSchema;

    fn id(&self) -> TableId;

    fn columns(&self) -> &[ColumnDescriptor];

    /// Column families in declaration order; family 0 is present in every
    /// table.
    fn families(&self) -> &[FamilyDescriptor];

    fn primary_index(&self) -> &Self::Index;

    fn column_ordinal(&self, id: ColumnId) -> Option<usize> {
        self.columns().iter().position(|column| column.id == id)
    }

    fn find_column(&self, id: ColumnId) -> Option<&ColumnDescriptor> {
        self.columns().iter().find(|column| column.id == id)
    }

    fn is_primary(&self, index: &Self::Index) -> bool {
        index.id() == self.primary_index().id()
    }
}
