
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, cmp::Ordering, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for span building on this thread.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    /// Events recorded since the last reset.
    pub events: u64,
    pub ops: EventOps,
    pub tables: BTreeMap<u32, TableCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Builder lifecycle
    pub builders_created: u64,

    // Span entrypoints
    pub constraint_calls: u64,
    pub unconstrained_calls: u64,
    pub row_calls: u64,
    pub spans_built: u64,

    // Family splitting
    pub family_splits: u64,
    pub family_split_families: u64,
    pub family_split_spans: u64,

    // Failures by class
    pub configuration_failures: u64,
    pub encoding_failures: u64,
    pub corruption_failures: u64,
    pub invariant_violations: u64,
}

///
/// TableCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TableCounters {
    pub builders_created: u64,
    pub span_calls: u64,
    pub spans_built: u64,
    pub family_splits: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
/// Counter snapshot plus per-table summaries.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Raw counters; `None` when nothing has been recorded since the last reset.
    pub counters: Option<EventState>,
    /// Per-table counters and averages.
    pub table_counters: Vec<TableSummary>,
}

///
/// TableSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TableSummary {
    pub table_id: u32,
    pub builders_created: u64,
    pub span_calls: u64,
    pub spans_built: u64,
    pub avg_spans_per_call: f64,
    pub family_splits: u64,
}

/// Build a metrics report by inspecting in-memory counters only.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);
    if snap.events == 0 {
        return EventReport::default();
    }

    let mut table_counters: Vec<TableSummary> = snap
        .tables
        .iter()
        .map(|(table_id, ops)| {
            let avg = if ops.span_calls > 0 {
                ops.spans_built as f64 / ops.span_calls as f64
            } else {
                0.0
            };

            TableSummary {
                table_id: *table_id,
                builders_created: ops.builders_created,
                span_calls: ops.span_calls,
                spans_built: ops.spans_built,
                avg_spans_per_call: avg,
                family_splits: ops.family_splits,
            }
        })
        .collect();

    table_counters.sort_by(|a, b| {
        match b
            .avg_spans_per_call
            .partial_cmp(&a.avg_spans_per_call)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => match b.spans_built.cmp(&a.spans_built) {
                Ordering::Equal => a.table_id.cmp(&b.table_id),
                other => other,
            },
            other => other,
        }
    });

    EventReport {
        counters: Some(snap),
        table_counters,
    }
}
