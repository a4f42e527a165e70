//! Module: span
//! Responsibility: lowering logical constraints and rows into physical key
//! spans for one (table, index) pair.
//! Does not own: constraint derivation, datum encoding, or reading spans.
//! Boundary: executors construct one `Builder` per table, index, and query.

mod datum;
mod family;
mod interleave;
mod interstice;
mod tuple;


use crate::{
    constraint::{Boundary, Constraint, ConstraintSpan},
    encoding::{Direction, ValueAlloc},
    error::InternalError,
    key::{Key, Span, Spans, make_index_key_prefix},
    obs::sink::{self, MetricsEvent, SpanKind},
    schema::{
        ColumnId, ColumnOrdinalSet, ColumnType, FamilyId, IndexSchema, TableDescriptor,
        TableSchema, needed_column_family_ids,
    },
};
use std::fmt;

pub use datum::{EncDatum, EncDatumRow};
pub use family::{span_to_point_span, split_span_into_separate_families};
pub use interleave::adjust_end_key_for_interleave;

///
/// Builder
///
/// Generates key spans from constraints, typed rows, and encoded rows for
/// one index. The column layout and interstices are fixed at construction;
/// the decode scratch space and needed-family configuration are per query.
///
/// A builder is single-query scoped: mutating calls take `&mut self` and it
/// must not be shared between concurrently executing queries.
///

pub struct Builder<'a, T: TableSchema = TableDescriptor> {
    table: &'a T,
    index: &'a T::Index,
    index_col_ids: Vec<ColumnId>,
    index_col_types: Vec<ColumnType>,
    index_col_dirs: Vec<Direction>,
    key_prefix: Key,
    alloc: ValueAlloc,
    interstices: Vec<Vec<u8>>,
    needed_families: Option<Vec<FamilyId>>,
}

impl<T: TableSchema> fmt::Debug for Builder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("table", &self.table.id())
            .field("index", &self.index.id())
            .field("key_prefix", &self.key_prefix)
            .field("needed_families", &self.needed_families)
            .finish_non_exhaustive()
    }
}

impl<'a, T: TableSchema> Builder<'a, T> {
    /// Configure a builder for `index` of `table`.
    ///
    /// Fails with a configuration error if the index references a column the
    /// table does not declare, or if its interleave chain overruns the key.
    pub fn new(table: &'a T, index: &'a T::Index) -> Result<Self, InternalError> {
        let key_prefix = make_index_key_prefix(table, index);
        let (index_col_ids, index_col_dirs) = index.full_columns();

        let index_col_types = index_col_ids
            .iter()
            .map(|id| {
                table
                    .find_column(*id)
                    .map(|column| column.ty.clone())
                    .ok_or_else(|| {
                        InternalError::schema_configuration(format!(
                            "index {} references column {id} missing from table {}",
                            index.id(),
                            table.id(),
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| sink::record(MetricsEvent::EncodeFailure { class: err.class }))?;

        let key_columns = index.columns().len() + index.extra_column_ids().len();
        let interstices = interstice::build(table, index, &key_prefix, key_columns)
            .inspect_err(|err| sink::record(MetricsEvent::EncodeFailure { class: err.class }))?;

        tracing::debug!(
            table = %table.id(),
            index = %index.id(),
            key_columns = index_col_ids.len(),
            interleaved = !index.interleave_ancestors().is_empty(),
            "configured span builder"
        );
        sink::record(MetricsEvent::BuilderCreated {
            table_id: table.id(),
        });

        Ok(Self {
            table,
            index,
            index_col_ids,
            index_col_types,
            index_col_dirs,
            key_prefix,
            alloc: ValueAlloc::new(),
            interstices,
            needed_families: None,
        })
    }

    /// Prefix shared by every key this builder generates.
    #[must_use]
    pub const fn key_prefix(&self) -> &Key {
        &self.key_prefix
    }

    /// Bytes inserted before the i-th key column; the last entry closes a
    /// key of full length.
    #[must_use]
    pub fn interstices(&self) -> &[Vec<u8>] {
        &self.interstices
    }

    #[must_use]
    pub const fn table(&self) -> &'a T {
        self.table
    }

    #[must_use]
    pub const fn index(&self) -> &'a T::Index {
        self.index
    }

    ///
    /// NEEDED COLUMNS
    ///

    /// Record the columns the caller needs, as the families covering them.
    /// Overwrites any families set directly; unsetting either disables
    /// family-specific splitting.
    pub fn set_needed_columns(&mut self, needed: &ColumnOrdinalSet) {
        self.needed_families = Some(needed_column_family_ids(needed, self.table, self.index));
    }

    pub fn unset_needed_columns(&mut self) {
        self.needed_families = None;
    }

    /// Record the needed families directly.
    pub fn set_needed_families(&mut self, families: Vec<FamilyId>) {
        self.needed_families = Some(families);
    }

    pub fn unset_needed_families(&mut self) {
        self.needed_families = None;
    }

    /// Families configured for splitting; `None` means all are needed.
    #[must_use]
    pub fn needed_families(&self) -> Option<&[FamilyId]> {
        self.needed_families.as_deref()
    }

    ///
    /// CONSTRAINTS
    ///

    /// Spans covering `constraint`, in sub-range order.
    ///
    /// `None` and the unconstrained constraint yield the full-index span; a
    /// contradiction yields no spans. `needed` enables the single-row
    /// family split unless the spans are for a delete.
    pub fn spans_from_constraint(
        &mut self,
        constraint: Option<&Constraint>,
        needed: &ColumnOrdinalSet,
        for_delete: bool,
    ) -> Result<Spans, InternalError> {
        let (kind, spans) = match constraint {
            None => (
                SpanKind::Unconstrained,
                self.collect_spans(&[ConstraintSpan::unconstrained()], needed, for_delete),
            ),
            Some(c) if c.is_unconstrained() => (
                SpanKind::Unconstrained,
                self.collect_spans(c.spans(), needed, for_delete),
            ),
            Some(c) => (
                SpanKind::Constraint,
                self.collect_spans(c.spans(), needed, for_delete),
            ),
        };

        match spans {
            Ok(spans) => {
                sink::record(MetricsEvent::SpansBuilt {
                    table_id: self.table.id(),
                    kind,
                    spans: spans.len() as u64,
                });
                Ok(spans)
            }
            Err(err) => {
                sink::record(MetricsEvent::EncodeFailure { class: err.class });
                Err(err)
            }
        }
    }

    /// The full span of this builder's index.
    pub fn unconstrained_spans(&mut self, for_delete: bool) -> Result<Spans, InternalError> {
        self.spans_from_constraint(None, &ColumnOrdinalSet::new(), for_delete)
    }

    fn collect_spans(
        &mut self,
        sub_ranges: &[ConstraintSpan],
        needed: &ColumnOrdinalSet,
        for_delete: bool,
    ) -> Result<Spans, InternalError> {
        let mut spans = Spans::with_capacity(sub_ranges.len());
        for cs in sub_ranges {
            self.append_spans_from_constraint_span(&mut spans, cs, needed, for_delete)?;
        }

        Ok(spans)
    }

    /// Lower one constraint sub-range into one or more spans appended to
    /// `append_to`. Nothing is appended on error.
    pub fn append_spans_from_constraint_span(
        &mut self,
        append_to: &mut Spans,
        cs: &ConstraintSpan,
        needed: &ColumnOrdinalSet,
        for_delete: bool,
    ) -> Result<(), InternalError> {
        let start_len = cs.start_key().len();
        let end_len = cs.end_key().len();

        let (mut key, contains_null) = self.encode_constraint_key(cs.start_key())?;
        match cs.start_boundary() {
            Boundary::Include => key.extend_from_slice(&self.interstices[start_len]),
            Boundary::Exclude => key = key.prefix_end(),
        }

        // Nulls in the end key never affect splitting.
        let (mut end_key, _) = self.encode_constraint_key(cs.end_key())?;
        end_key.extend_from_slice(&self.interstices[end_len]);

        // Single-row lookups on a multi-family table only read the needed
        // families. Deletes must remove the whole row.
        if !for_delete && !needed.is_empty() && key == end_key {
            let families = needed_column_family_ids(needed, self.table, self.index);
            if self.can_split_span_into_separate_families(families.len(), start_len, contains_null)
            {
                self.record_family_split(&families, append_to, |out| {
                    split_span_into_separate_families(out, &Span::new(key, end_key), &families);
                });
                return Ok(());
            }
        }

        let end_inclusive = cs.end_boundary() == Boundary::Include;
        let end_key = adjust_end_key_for_interleave(
            self.index,
            end_key,
            end_len,
            self.interstices[end_len].len(),
            end_inclusive,
        );
        append_to.push(Span::new(key, end_key));

        Ok(())
    }

    fn record_family_split(
        &self,
        families: &[FamilyId],
        append_to: &mut Spans,
        split: impl FnOnce(&mut Spans),
    ) {
        let before = append_to.len();
        split(append_to);
        let spans = append_to.len() - before;

        tracing::trace!(
            table = %self.table.id(),
            index = %self.index.id(),
            families = families.len(),
            spans,
            "split point span by column family"
        );
        sink::record(MetricsEvent::FamilySplit {
            table_id: self.table.id(),
            families: families.len() as u64,
            spans: spans as u64,
        });
    }
}
