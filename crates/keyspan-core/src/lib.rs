//! Core of keyspan: order-preserving key encoding, schema descriptors,
//! logical constraints, and the span builder that lowers constraints and
//! rows into physical key spans.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod constraint;
pub mod encoding;
pub mod error;
pub mod key;
pub mod obs;
pub mod schema;
pub mod span;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, encoders, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        constraint::{Boundary, Constraint, ConstraintKey, ConstraintSpan},
        encoding::Direction,
        key::{Key, Span, Spans},
        schema::{IndexSchema, TableSchema},
        span::Builder,
        value::Value,
    };
}
