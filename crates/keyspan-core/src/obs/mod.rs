//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Span building emits events only; counters live behind the sink.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, TableCounters, TableSummary};
pub use sink::{
    MetricsEvent, MetricsSink, SpanKind, metrics_report, metrics_reset_all, with_metrics_sink,
};
