//! Read-only schema descriptors consumed by the span builder.
//!
//! The catalog owns the descriptors; the builder only borrows them through
//! the [`TableSchema`] / [`IndexSchema`] traits. The concrete
//! [`TableDescriptor`] / [`IndexDescriptor`] types here are the reference
//! implementation and are serde-loadable so a catalog or a fixture can
//! materialize them from JSON.

mod column;
mod family;
mod ids;
mod index;
mod table;
mod traits;


pub use column::{ColumnDescriptor, ColumnIdMap, ColumnOrdinalSet, ColumnType};
pub use family::{FamilyDescriptor, needed_column_family_ids};
pub use ids::{ColumnId, FamilyId, IndexId, TableId};
pub use index::{
    IndexColumn, IndexDescriptor, IndexKind, IndexVersion, InterleaveAncestor,
    InterleaveDescendant,
};
pub use table::TableDescriptor;
pub use traits::{IndexSchema, TableSchema};
