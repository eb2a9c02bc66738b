//! Bounded worker pool executing a fixed number of request slots.
mod slots;
mod worker;

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{Instant, timeout_at};
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult, ConfigError};
use crate::metrics::{Aggregator, RunResult};
use crate::shutdown::{ShutdownSender, shutdown_channel};
use crate::source::ParameterPool;

use super::target::RequestBuilder;
use super::transport::Transport;
use slots::{InflightGauge, SlotCounter};
use worker::{WorkerShared, run_worker};

#[cfg(test)]
pub(super) use worker::{classify, slot_rng};

/// Validated run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPlan {
    requests: u64,
    concurrency: usize,
    request_timeout: Duration,
    run_timeout: Duration,
    seed: u64,
}

impl DispatchPlan {
    /// Validates the run parameters. Without a seed, a random one is drawn
    /// and logged so the run can be replayed.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `concurrency` is zero or either
    /// timeout is zero.
    pub fn new(
        requests: u64,
        concurrency: usize,
        request_timeout: Duration,
        run_timeout: Duration,
        seed: Option<u64>,
    ) -> AppResult<Self> {
        if concurrency == 0 {
            return Err(AppError::config(ConfigError::InvalidConcurrency {
                value: concurrency,
            }));
        }
        if request_timeout.is_zero() {
            return Err(AppError::config(ConfigError::ZeroTimeout { name: "request" }));
        }
        if run_timeout.is_zero() {
            return Err(AppError::config(ConfigError::ZeroTimeout { name: "run" }));
        }
        let seed = seed.unwrap_or_else(|| {
            let drawn = rand::thread_rng().r#gen::<u64>();
            info!("No seed given; using seed {}", drawn);
            drawn
        });
        Ok(Self {
            requests,
            concurrency,
            request_timeout,
            run_timeout,
            seed,
        })
    }

    #[must_use]
    pub const fn requests(&self) -> u64 {
        self.requests
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    #[must_use]
    pub const fn run_timeout(&self) -> Duration {
        self.run_timeout
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of workers actually spawned: `min(concurrency, requests)`.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        usize::try_from(self.requests).map_or(self.concurrency, |requests| {
            requests.min(self.concurrency)
        })
    }
}

/// Runs request slots against a transport with bounded concurrency.
pub struct Dispatcher<T: ?Sized> {
    transport: Arc<T>,
    pool: Arc<ParameterPool>,
    builder: Arc<RequestBuilder>,
}

impl<T> Dispatcher<T>
where
    T: Transport + ?Sized + 'static,
{
    #[must_use]
    pub fn new(transport: Arc<T>, pool: Arc<ParameterPool>, builder: RequestBuilder) -> Self {
        Self {
            transport,
            pool,
            builder: Arc::new(builder),
        }
    }

    /// Executes `plan.requests()` slots and returns the aggregated result.
    ///
    /// When the run timeout fires first, the aggregator is closed, in-flight
    /// requests are cancelled, and unfinished slots count as abandoned.
    ///
    /// # Errors
    ///
    /// Returns an error only if the latency histograms cannot be created.
    pub async fn run(&self, plan: &DispatchPlan) -> AppResult<RunResult> {
        let aggregator = Arc::new(Aggregator::new().map_err(AppError::Metrics)?);
        let requested = plan.requests();
        if requested == 0 {
            info!("No requests to dispatch");
            return Ok(aggregator.finalize(0, None, plan.seed(), 0));
        }

        let shared = Arc::new(WorkerShared {
            transport: Arc::clone(&self.transport),
            pool: Arc::clone(&self.pool),
            builder: Arc::clone(&self.builder),
            aggregator: Arc::clone(&aggregator),
            slots: SlotCounter::new(requested),
            in_flight: InflightGauge::default(),
            request_timeout: plan.request_timeout(),
            seed: plan.seed(),
            requested,
        });
        let shutdown_tx = shutdown_channel();

        let worker_count = plan.worker_count();
        info!(
            "Dispatching {} requests with {} workers (seed {})",
            requested,
            worker_count,
            plan.seed()
        );
        let started = Instant::now();
        aggregator.mark_started(started);
        let handles = spawn_workers(&shared, &shutdown_tx, worker_count);
        let abort_handles: Vec<AbortHandle> =
            handles.iter().map(JoinHandle::abort_handle).collect();

        let deadline = started.checked_add(plan.run_timeout());
        let joined = join_workers(handles);
        let finished = match deadline {
            Some(deadline) => timeout_at(deadline, joined).await.is_ok(),
            None => {
                joined.await;
                true
            }
        };

        let result = if finished {
            aggregator.finalize(requested, None, plan.seed(), shared.in_flight.peak())
        } else {
            warn!(
                "Run timeout of {:?} reached; abandoning in-flight requests",
                plan.run_timeout()
            );
            drop(shutdown_tx.send(()));
            let result =
                aggregator.finalize(requested, deadline, plan.seed(), shared.in_flight.peak());
            for handle in &abort_handles {
                handle.abort();
            }
            result
        };

        info!(
            "Dispatch finished: {} of {} slots claimed, {} completed, {} abandoned",
            shared.slots.claimed(),
            requested,
            result.completed(),
            result.abandoned
        );
        Ok(result)
    }
}

fn spawn_workers<T>(
    shared: &Arc<WorkerShared<T>>,
    shutdown_tx: &ShutdownSender,
    worker_count: usize,
) -> Vec<JoinHandle<()>>
where
    T: Transport + ?Sized + 'static,
{
    (0..worker_count)
        .map(|_| {
            let shared = Arc::clone(shared);
            let shutdown_rx = shutdown_tx.subscribe();
            tokio::spawn(run_worker(shared, shutdown_rx))
        })
        .collect()
}

async fn join_workers(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if let Err(err) = handle.await
            && err.is_panic()
        {
            error!("Worker task panicked: {}", err);
        }
    }
}
