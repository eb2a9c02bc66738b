use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

use crate::error::MetricsError;

use super::histogram::{LatencyHistogram, MIN_LATENCY_MS};
use super::types::{
    AggregateSnapshot, FailureBreakdown, LatencySummary, Outcome, OutcomeKind, RequestFailure,
    RunResult,
};

/// Shortest elapsed time reported for a run that dispatched anything.
const MIN_ELAPSED: Duration = Duration::from_micros(1);

/// Single aggregation point for request outcomes.
///
/// Workers hold an `Arc<Aggregator>` and call [`Aggregator::record`]; every
/// update happens under one mutex, so each outcome is counted exactly once.
/// After [`Aggregator::finalize`] the aggregator is closed and late outcomes
/// are rejected.
#[derive(Debug)]
pub struct Aggregator {
    state: Mutex<AggregatorState>,
}

#[derive(Debug)]
struct AggregatorState {
    closed: bool,
    successes: u64,
    failures: u64,
    breakdown: FailureBreakdown,
    bytes_received: u64,
    latency: LatencyTrack,
    success_latency: LatencyTrack,
    started_at: Option<Instant>,
    last_recorded_at: Option<Instant>,
}

#[derive(Debug)]
struct LatencyTrack {
    histogram: LatencyHistogram,
    sum_ms: u128,
}

impl LatencyTrack {
    fn new() -> Result<Self, MetricsError> {
        Ok(Self {
            histogram: LatencyHistogram::new()?,
            sum_ms: 0,
        })
    }

    fn record(&mut self, latency_ms: u64) {
        let latency_ms = latency_ms.max(MIN_LATENCY_MS);
        self.sum_ms = self.sum_ms.saturating_add(u128::from(latency_ms));
        if let Err(err) = self.histogram.record(latency_ms) {
            warn!("Dropping latency sample: {}", err);
        }
    }

    fn summary(&self) -> LatencySummary {
        let count = self.histogram.count();
        if count == 0 {
            return LatencySummary::default();
        }
        let avg_ms = self
            .sum_ms
            .checked_div(u128::from(count))
            .map_or(0, |avg| u64::try_from(avg).unwrap_or(u64::MAX));
        let (p50_ms, p90_ms, p99_ms) = self.histogram.percentiles();
        LatencySummary {
            min_ms: self.histogram.min(),
            avg_ms,
            max_ms: self.histogram.max(),
            p50_ms,
            p90_ms,
            p99_ms,
        }
    }
}

impl Aggregator {
    /// Creates an open aggregator with empty counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the latency histograms cannot be created.
    pub fn new() -> Result<Self, MetricsError> {
        Ok(Self {
            state: Mutex::new(AggregatorState {
                closed: false,
                successes: 0,
                failures: 0,
                breakdown: FailureBreakdown::default(),
                bytes_received: 0,
                latency: LatencyTrack::new()?,
                success_latency: LatencyTrack::new()?,
                started_at: None,
                last_recorded_at: None,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, AggregatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the instant of the first dispatch. Later calls are ignored.
    pub fn mark_started(&self, at: Instant) {
        let mut state = self.lock();
        if state.started_at.is_none() {
            state.started_at = Some(at);
        }
    }

    /// Records one outcome and returns the number of completed requests.
    /// Returns `None` without counting anything once the aggregator is closed.
    #[must_use]
    pub fn record(&self, outcome: Outcome) -> Option<u64> {
        let latency_ms = u64::try_from(outcome.latency.as_millis()).unwrap_or(u64::MAX);
        let mut state = self.lock();
        if state.closed {
            return None;
        }

        match outcome.kind {
            OutcomeKind::Success => {
                state.successes = state.successes.saturating_add(1);
                state.success_latency.record(latency_ms);
            }
            OutcomeKind::Failure(failure) => {
                state.failures = state.failures.saturating_add(1);
                let breakdown = &mut state.breakdown;
                match failure {
                    RequestFailure::Status(code) => {
                        breakdown.unexpected_status = breakdown.unexpected_status.saturating_add(1);
                        let entry = breakdown.status_counts.entry(code).or_insert(0);
                        *entry = entry.saturating_add(1);
                    }
                    RequestFailure::Timeout => {
                        breakdown.timeouts = breakdown.timeouts.saturating_add(1);
                    }
                    RequestFailure::Transport => {
                        breakdown.transport_errors = breakdown.transport_errors.saturating_add(1);
                    }
                }
            }
        }
        state.latency.record(latency_ms);
        state.bytes_received = state.bytes_received.saturating_add(outcome.response_bytes);
        state.last_recorded_at = Some(Instant::now());

        Some(state.successes.saturating_add(state.failures))
    }

    #[must_use]
    pub fn snapshot(&self) -> AggregateSnapshot {
        let state = self.lock();
        AggregateSnapshot {
            successes: state.successes,
            failures: state.failures,
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Closes the aggregator and computes the final result.
    ///
    /// `deadline` is the instant the run timeout fired, if it did; elapsed
    /// time then ends there instead of at the last recorded outcome.
    #[must_use]
    pub fn finalize(
        &self,
        requested: u64,
        deadline: Option<Instant>,
        seed: u64,
        peak_in_flight: u64,
    ) -> RunResult {
        let mut state = self.lock();
        state.closed = true;

        let completed = state.successes.saturating_add(state.failures);
        let end = deadline.or(state.last_recorded_at);
        let elapsed = match (state.started_at, end) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(_) | None, None) | (None, Some(_)) => Duration::ZERO,
        };
        let elapsed = if requested > 0 && state.started_at.is_some() {
            elapsed.max(MIN_ELAPSED)
        } else {
            elapsed
        };

        RunResult {
            requested,
            successes: state.successes,
            failures: state.failures,
            abandoned: requested.saturating_sub(completed),
            breakdown: state.breakdown.clone(),
            bytes_received: state.bytes_received,
            elapsed,
            timed_out: deadline.is_some(),
            latency: state.latency.summary(),
            success_latency: state.success_latency.summary(),
            peak_in_flight,
            seed,
        }
    }
}
