mod lines;

use serde::Serialize;
use serde_json::Value;

use crate::args::OutputFormat;
use crate::metrics::{FailureBreakdown, LatencySummary, RunResult};

pub use lines::summary_lines;

/// Divisor for values carried as hundredths.
const PERCENT_DIVISOR: u64 = 100;
const MS_PER_SEC: u128 = 1_000;
/// Milliseconds per hundredth of a second.
const MS_PER_CENTISECOND: u128 = 10;

/// Formats a value carried in hundredths as `X.XX`.
pub(crate) fn format_x100(value: u64) -> String {
    format!(
        "{}.{:02}",
        value / PERCENT_DIVISOR,
        value % PERCENT_DIVISOR
    )
}

/// Formats elapsed time as seconds with two decimals.
pub(crate) fn format_seconds(result: &RunResult) -> String {
    let millis = result.elapsed.as_millis();
    format!(
        "{}.{:02}",
        millis / MS_PER_SEC,
        (millis % MS_PER_SEC) / MS_PER_CENTISECOND
    )
}

/// Converts a hundredths value into a JSON-friendly decimal.
fn x100_to_f64(value: u64) -> f64 {
    format_x100(value).parse().unwrap_or_default()
}

/// Serializable form of the run summary, mirroring [`summary_lines`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub requested: u64,
    pub successes: u64,
    pub failures: u64,
    pub abandoned: u64,
    pub completed: u64,
    pub timed_out: bool,
    pub elapsed_ms: u64,
    pub elapsed_seconds: f64,
    pub requests_per_second: f64,
    pub success_rate_percent: f64,
    pub failure_breakdown: FailureBreakdown,
    pub latency: LatencySummary,
    pub success_latency: LatencySummary,
    pub peak_in_flight: u64,
    pub bytes_received: u64,
    pub seed: u64,
}

impl From<&RunResult> for SummaryReport {
    fn from(result: &RunResult) -> Self {
        let elapsed_ms = u64::try_from(result.elapsed.as_millis()).unwrap_or(u64::MAX);
        Self {
            requested: result.requested,
            successes: result.successes,
            failures: result.failures,
            abandoned: result.abandoned,
            completed: result.completed(),
            timed_out: result.timed_out,
            elapsed_ms,
            elapsed_seconds: format_seconds(result).parse().unwrap_or_default(),
            requests_per_second: x100_to_f64(result.throughput_x100()),
            success_rate_percent: x100_to_f64(result.success_rate_x100()),
            failure_breakdown: result.breakdown.clone(),
            latency: result.latency,
            success_latency: result.success_latency,
            peak_in_flight: result.peak_in_flight,
            bytes_received: result.bytes_received,
            seed: result.seed,
        }
    }
}

/// Machine-readable form of the run summary.
///
/// # Errors
///
/// Returns an error when the report cannot be converted to JSON.
pub fn summary_json(result: &RunResult) -> serde_json::Result<Value> {
    serde_json::to_value(SummaryReport::from(result))
}

/// Writes the summary to stdout in the requested format.
pub fn print_summary(result: &RunResult, format: OutputFormat) {
    match format {
        OutputFormat::Text => print_lines(result),
        OutputFormat::Json => match serde_json::to_string_pretty(&SummaryReport::from(result)) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                tracing::warn!("Failed to serialize summary: {}", err);
                print_lines(result);
            }
        },
    }
}

fn print_lines(result: &RunResult) {
    for line in summary_lines(result) {
        println!("{}", line);
    }
}
