use crate::metrics::{LatencySummary, RunResult};

use super::{format_seconds, format_x100};

/// Human-readable summary, one entry per output line.
#[must_use]
pub fn summary_lines(result: &RunResult) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Stress test completed in {} seconds",
        format_seconds(result)
    ));
    lines.push(format!(
        "Success: {}, Failures: {}",
        result.successes, result.failures
    ));
    lines.push(format!(
        "Requests per second: {}",
        format_x100(result.throughput_x100())
    ));
    if result.abandoned > 0 {
        let cause = if result.timed_out {
            "run timeout reached"
        } else {
            "workers stopped early"
        };
        lines.push(format!("Abandoned: {} ({})", result.abandoned, cause));
    }
    lines.push(format!(
        "Success Rate: {}%",
        format_x100(result.success_rate_x100())
    ));

    let breakdown = &result.breakdown;
    lines.push(format!("Timeouts: {}", breakdown.timeouts));
    lines.push(format!("Transport Errors: {}", breakdown.transport_errors));
    lines.push(format!("Non-200 Status: {}", breakdown.unexpected_status));
    for (status, count) in &breakdown.status_counts {
        lines.push(format!("  HTTP {}: {}", status, count));
    }

    lines.extend(latency_lines("all", &result.latency));
    lines.extend(latency_lines("ok", &result.success_latency));

    lines.push(format!("Peak In-Flight: {}", result.peak_in_flight));
    lines.push(format!("Bytes Received: {}", result.bytes_received));
    lines.push(format!("Seed: {}", result.seed));
    lines
}

fn latency_lines(label: &str, latency: &LatencySummary) -> [String; 3] {
    [
        format!("Avg Latency ({}): {}ms", label, latency.avg_ms),
        format!(
            "Min/Max Latency ({}): {}ms / {}ms",
            label, latency.min_ms, latency.max_ms
        ),
        format!(
            "P50/P90/P99 Latency ({}): {}ms / {}ms / {}ms",
            label, latency.p50_ms, latency.p90_ms, latency.p99_ms
        ),
    ]
}
