//! Outcome types, latency histograms, and the run aggregator.
mod aggregator;
mod histogram;
mod types;


pub use aggregator::Aggregator;
pub use histogram::LatencyHistogram;
pub use types::{
    AggregateSnapshot, FailureBreakdown, LatencySummary, Outcome, OutcomeKind, RequestFailure,
    RunResult,
};
