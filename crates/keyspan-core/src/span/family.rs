use crate::{
    key::{Span, Spans, make_family_key},
    schema::{FamilyId, IndexKind, IndexSchema, IndexVersion, TableSchema},
    span::Builder,
};

impl<T: TableSchema> Builder<'_, T> {
    /// Whether a span over `prefix_len` key columns may be split into one
    /// point span per needed family.
    ///
    /// Requires a unique index, a table with several families, a full-length
    /// key, and fewer needed families than the table has. Secondary indexes
    /// additionally need the per-family row format, stored columns, a forward
    /// kind, and a key without NULLs.
    #[must_use]
    pub fn can_split_span_into_separate_families(
        &self,
        num_needed_families: usize,
        prefix_len: usize,
        contains_null: bool,
    ) -> bool {
        let num_families = self.table.families().len();
        let index = self.index;

        let secondary_ok = index.version() == IndexVersion::SecondaryFamilies
            && !contains_null
            && !index.stored_column_ids().is_empty()
            && index.kind() == IndexKind::Forward;

        index.is_unique()
            && num_families > 1
            && (self.table.is_primary(index) || secondary_ok)
            && prefix_len == index.columns().len()
            && num_needed_families < num_families
    }

    /// Append `span`, split by the families configured through
    /// `set_needed_columns` / `set_needed_families` when that is sound.
    pub fn maybe_split_span_into_separate_families(
        &self,
        append_to: &mut Spans,
        span: Span,
        prefix_len: usize,
        contains_null: bool,
    ) {
        if let Some(families) = self.needed_families.as_deref()
            && self.can_split_span_into_separate_families(families.len(), prefix_len, contains_null)
        {
            self.record_family_split(families, append_to, |out| {
                split_span_into_separate_families(out, &span, families);
            });
            return;
        }

        append_to.push(span);
    }
}

/// Narrow a row span to the point span of one family.
///
/// Callers must check `can_split_span_into_separate_families` first.
#[must_use]
pub fn span_to_point_span(span: &Span, family: FamilyId) -> Span {
    Span::prefix(make_family_key(&span.key, family))
}

/// Append one point span per family of the row at `span.key`.
///
/// Family keys of consecutive ids are adjacent, so a family whose id directly
/// follows the previous one extends the previous span.
pub fn split_span_into_separate_families(
    append_to: &mut Spans,
    span: &Span,
    families: &[FamilyId],
) {
    let mut prev: Option<FamilyId> = None;
    for &family in families {
        let family_span = span_to_point_span(span, family);

        let adjacent = prev.is_some_and(|p| p.get().checked_add(1) == Some(family.get()));
        match append_to.last_mut() {
            Some(last) if adjacent => last.end_key = family_span.end_key,
            _ => append_to.push(family_span),
        }
        prev = Some(family);
    }
}
