use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

/// Why a single request did not count as a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFailure {
    /// The service answered with a status other than 200.
    Status(u16),
    /// The per-request timeout fired, either in the client or around it.
    Timeout,
    /// Connection, TLS, or body read error.
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Failure(RequestFailure),
}

/// Classified result of one dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub latency: Duration,
    pub response_bytes: u64,
}

impl Outcome {
    #[must_use]
    pub const fn success(latency: Duration, response_bytes: u64) -> Self {
        Self {
            kind: OutcomeKind::Success,
            latency,
            response_bytes,
        }
    }

    #[must_use]
    pub const fn failure(failure: RequestFailure, latency: Duration, response_bytes: u64) -> Self {
        Self {
            kind: OutcomeKind::Failure(failure),
            latency,
            response_bytes,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.kind, OutcomeKind::Success)
    }
}

/// Totals observed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateSnapshot {
    pub successes: u64,
    pub failures: u64,
}

impl AggregateSnapshot {
    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.successes.saturating_add(self.failures)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FailureBreakdown {
    pub timeouts: u64,
    pub transport_errors: u64,
    pub unexpected_status: u64,
    pub status_counts: BTreeMap<u16, u64>,
}

/// Latency figures in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LatencySummary {
    pub min_ms: u64,
    pub avg_ms: u64,
    pub max_ms: u64,
    pub p50_ms: u64,
    pub p90_ms: u64,
    pub p99_ms: u64,
}

/// Final totals of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub requested: u64,
    pub successes: u64,
    pub failures: u64,
    pub abandoned: u64,
    pub breakdown: FailureBreakdown,
    pub bytes_received: u64,
    pub elapsed: Duration,
    pub timed_out: bool,
    pub latency: LatencySummary,
    pub success_latency: LatencySummary,
    pub peak_in_flight: u64,
    pub seed: u64,
}

/// Scale factor for fixed-point rates (two decimal places).
const X100: u128 = 100;
const NANOS_PER_SEC: u128 = 1_000_000_000;

impl RunResult {
    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.successes.saturating_add(self.failures)
    }

    /// Completed requests per second, scaled by 100.
    #[must_use]
    pub fn throughput_x100(&self) -> u64 {
        let elapsed_nanos = self.elapsed.as_nanos();
        if elapsed_nanos == 0 {
            return 0;
        }
        let scaled = u128::from(self.completed())
            .saturating_mul(X100)
            .saturating_mul(NANOS_PER_SEC)
            .checked_div(elapsed_nanos)
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    /// Share of completed requests that succeeded, in hundredths of a percent.
    #[must_use]
    pub fn success_rate_x100(&self) -> u64 {
        let completed = self.completed();
        if completed == 0 {
            return 0;
        }
        let scaled = u128::from(self.successes)
            .saturating_mul(10_000)
            .checked_div(u128::from(completed))
            .unwrap_or(0);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }
}
