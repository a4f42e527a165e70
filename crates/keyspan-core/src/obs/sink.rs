//! Metrics sink boundary.
//!
//! Span-building logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between span building
//! and the thread-local metrics state.
use crate::{error::ErrorClass, obs::metrics, schema::TableId};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// SpanKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpanKind {
    Constraint,
    Unconstrained,
    Row,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricsEvent {
    BuilderCreated {
        table_id: TableId,
    },
    SpansBuilt {
        table_id: TableId,
        kind: SpanKind,
        spans: u64,
    },
    FamilySplit {
        table_id: TableId,
        families: u64,
        spans: u64,
    },
    EncodeFailure {
        class: ErrorClass,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| {
            m.events = m.events.saturating_add(1);

            match event {
                MetricsEvent::BuilderCreated { table_id } => {
                    m.ops.builders_created = m.ops.builders_created.saturating_add(1);
                    let entry = m.tables.entry(table_id.get()).or_default();
                    entry.builders_created = entry.builders_created.saturating_add(1);
                }

                MetricsEvent::SpansBuilt {
                    table_id,
                    kind,
                    spans,
                } => {
                    match kind {
                        SpanKind::Constraint => {
                            m.ops.constraint_calls = m.ops.constraint_calls.saturating_add(1);
                        }
                        SpanKind::Unconstrained => {
                            m.ops.unconstrained_calls =
                                m.ops.unconstrained_calls.saturating_add(1);
                        }
                        SpanKind::Row => m.ops.row_calls = m.ops.row_calls.saturating_add(1),
                    }
                    m.ops.spans_built = m.ops.spans_built.saturating_add(spans);

                    let entry = m.tables.entry(table_id.get()).or_default();
                    entry.span_calls = entry.span_calls.saturating_add(1);
                    entry.spans_built = entry.spans_built.saturating_add(spans);
                }

                MetricsEvent::FamilySplit {
                    table_id,
                    families,
                    spans,
                } => {
                    m.ops.family_splits = m.ops.family_splits.saturating_add(1);
                    m.ops.family_split_families =
                        m.ops.family_split_families.saturating_add(families);
                    m.ops.family_split_spans = m.ops.family_split_spans.saturating_add(spans);

                    let entry = m.tables.entry(table_id.get()).or_default();
                    entry.family_splits = entry.family_splits.saturating_add(1);
                }

                MetricsEvent::EncodeFailure { class } => match class {
                    ErrorClass::Configuration => {
                        m.ops.configuration_failures =
                            m.ops.configuration_failures.saturating_add(1);
                    }
                    ErrorClass::Encoding => {
                        m.ops.encoding_failures = m.ops.encoding_failures.saturating_add(1);
                    }
                    ErrorClass::Corruption => {
                        m.ops.corruption_failures = m.ops.corruption_failures.saturating_add(1);
                    }
                    ErrorClass::InvariantViolation => {
                        m.ops.invariant_violations = m.ops.invariant_violations.saturating_add(1);
                    }
                },
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - Only a shared reference is materialized, matching the shared borrow
        //   used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state on the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// Events recorded on this thread inside `f` go to `sink` instead of the
/// thread-local counters; the previous sink is restored on every exit.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // Preconditions:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` always restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    //
    // What would break this:
    // - Any async/deferred use of `sink_ptr` beyond this scope.
    // - Any path that bypasses Guard restoration.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}
