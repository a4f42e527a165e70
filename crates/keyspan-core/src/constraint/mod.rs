//! Module: constraint
//! Responsibility: the optimizer's logical constraint shape, as consumed by
//! span building.
//! Does not own: constraint derivation, normalization, or merging.


use crate::value::Value;
use derive_more::Deref;

///
/// Boundary
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Boundary {
    #[default]
    Include,
    Exclude,
}

///
/// ConstraintKey
///
/// Ordered values for a prefix of an index's key columns.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct ConstraintKey(Vec<Value>);

impl ConstraintKey {
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn value(&self, i: usize) -> Option<&Value> {
        self.0.get(i)
    }
}

impl<V: Into<Value>> FromIterator<V> for ConstraintKey {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

///
/// ConstraintSpan
///
/// One contiguous logical sub-range. An empty start key with an inclusive
/// boundary means "from the beginning"; likewise for the end.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConstraintSpan {
    start: ConstraintKey,
    start_boundary: Boundary,
    end: ConstraintKey,
    end_boundary: Boundary,
}

impl ConstraintSpan {
    #[must_use]
    pub const fn new(
        start: ConstraintKey,
        start_boundary: Boundary,
        end: ConstraintKey,
        end_boundary: Boundary,
    ) -> Self {
        Self {
            start,
            start_boundary,
            end,
            end_boundary,
        }
    }

    /// The span with no restriction at all.
    #[must_use]
    pub const fn unconstrained() -> Self {
        Self::new(
            ConstraintKey::empty(),
            Boundary::Include,
            ConstraintKey::empty(),
            Boundary::Include,
        )
    }

    /// Inclusive single-key span `[key, key]`.
    #[must_use]
    pub fn point(key: ConstraintKey) -> Self {
        Self::new(key.clone(), Boundary::Include, key, Boundary::Include)
    }

    #[must_use]
    pub const fn start_key(&self) -> &ConstraintKey {
        &self.start
    }

    #[must_use]
    pub const fn start_boundary(&self) -> Boundary {
        self.start_boundary
    }

    #[must_use]
    pub const fn end_key(&self) -> &ConstraintKey {
        &self.end
    }

    #[must_use]
    pub const fn end_boundary(&self) -> Boundary {
        self.end_boundary
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.start.is_empty()
            && self.end.is_empty()
            && self.start_boundary == Boundary::Include
            && self.end_boundary == Boundary::Include
    }
}

///
/// Constraint
///
/// Ordered, non-overlapping sub-ranges. Zero sub-ranges is a contradiction
/// (nothing matches); a single unconstrained sub-range matches everything.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Constraint {
    spans: Vec<ConstraintSpan>,
}

impl Constraint {
    /// Build from sub-ranges the caller has already sorted and de-overlapped.
    #[must_use]
    pub const fn new(spans: Vec<ConstraintSpan>) -> Self {
        Self { spans }
    }

    #[must_use]
    pub fn unconstrained() -> Self {
        Self::new(vec![ConstraintSpan::unconstrained()])
    }

    #[must_use]
    pub const fn contradiction() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub fn spans(&self) -> &[ConstraintSpan] {
        &self.spans
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        matches!(self.spans.as_slice(), [only] if only.is_unconstrained())
    }

    #[must_use]
    pub fn is_contradiction(&self) -> bool {
        self.spans.is_empty()
    }
}
