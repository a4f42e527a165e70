//! ## Crate layout
//! - `core`: values, key encoding, schema descriptors, constraints, the span
//!   builder, errors, and observability.
//!
//! The `prelude` module carries the vocabulary a query planner needs to
//! turn a constraint into spans; the module re-exports below expose the
//! rest of the surface.

pub use keyspan_core as core;
pub use keyspan_core::{constraint, encoding, key, obs, schema, span, value};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::error::{ErrorClass, ErrorOrigin, InternalError as Error};

///
/// Planner Prelude
///

pub mod prelude {
    pub use crate::core::{
        prelude::*,
        schema::{ColumnOrdinalSet, FamilyId, IndexDescriptor, TableDescriptor},
        span::{EncDatum, EncDatumRow},
    };
}
