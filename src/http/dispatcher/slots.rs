use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out slot indices `0..limit`, each exactly once.
#[derive(Debug)]
pub(super) struct SlotCounter {
    limit: u64,
    next: AtomicU64,
}

impl SlotCounter {
    pub(super) const fn new(limit: u64) -> Self {
        Self {
            limit,
            next: AtomicU64::new(0),
        }
    }

    pub(super) fn claim(&self) -> Option<u64> {
        loop {
            let current = self.next.load(Ordering::Relaxed);
            if current >= self.limit {
                return None;
            }
            let next = current.checked_add(1)?;
            if self
                .next
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return Some(current);
            }
        }
    }

    pub(super) fn claimed(&self) -> u64 {
        self.next.load(Ordering::Relaxed).min(self.limit)
    }
}

/// Current and peak number of requests on the wire.
#[derive(Debug, Default)]
pub(super) struct InflightGauge {
    current: AtomicU64,
    peak: AtomicU64,
}

impl InflightGauge {
    pub(super) fn peak(&self) -> u64 {
        self.peak.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    pub(super) fn current(&self) -> u64 {
        self.current.load(Ordering::Relaxed)
    }
}

pub(super) struct InflightGuard<'gauge> {
    gauge: &'gauge InflightGauge,
}

impl<'gauge> InflightGuard<'gauge> {
    pub(super) fn acquire(gauge: &'gauge InflightGauge) -> Self {
        let now = gauge.current.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        gauge.peak.fetch_max(now, Ordering::Relaxed);
        Self { gauge }
    }
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        let counter = &self.gauge.current;
        loop {
            let current = counter.load(Ordering::Relaxed);
            let Some(next) = current.checked_sub(1) else {
                break;
            };
            if counter
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                break;
            }
        }
    }
}
