use hdrhistogram::Histogram;

use crate::error::MetricsError;

/// Smallest latency recorded; faster requests count as this.
pub(crate) const MIN_LATENCY_MS: u64 = 1;

/// Millisecond latency histogram with three significant digits.
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new latency histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, MetricsError> {
        let hist = Histogram::<u64>::new(3).map_err(|err| MetricsError::Histogram {
            context: "create",
            source: Box::new(err),
        })?;
        Ok(Self { hist })
    }

    /// Record a latency value in milliseconds. Sub-millisecond values count as 1ms.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be recorded.
    pub fn record(&mut self, latency_ms: u64) -> Result<(), MetricsError> {
        let value = latency_ms.max(MIN_LATENCY_MS);
        self.hist
            .record(value)
            .map_err(|err| MetricsError::Histogram {
                context: "record",
                source: Box::new(err),
            })
    }

    #[must_use]
    pub fn percentiles(&self) -> (u64, u64, u64) {
        if self.count() == 0 {
            return (0, 0, 0);
        }

        (
            self.hist.value_at_quantile(0.5),
            self.hist.value_at_quantile(0.9),
            self.hist.value_at_quantile(0.99),
        )
    }

    #[must_use]
    pub fn min(&self) -> u64 {
        if self.count() == 0 { 0 } else { self.hist.min() }
    }

    #[must_use]
    pub fn max(&self) -> u64 {
        self.hist.max()
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }
}
