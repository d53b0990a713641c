//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Planner and scan code never touch counters directly; every signal is a
//! `MetricsEvent` routed through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport};
pub use sink::{
    MetricsEvent, MetricsSink, PlanKind, metrics_report, metrics_reset_all, with_metrics_sink,
};
