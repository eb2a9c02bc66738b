use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::{Instant, error::Elapsed, timeout};
use tracing::{debug, info, trace};

use crate::error::TransportError;
use crate::metrics::{Aggregator, Outcome, RequestFailure};
use crate::shutdown::ShutdownReceiver;
use crate::source::ParameterPool;

use super::super::target::{RequestBuilder, RequestDescriptor, RequestTarget};
use super::super::transport::{Transport, TransportResponse};
use super::slots::{InflightGauge, InflightGuard, SlotCounter};

const SUCCESS_STATUS: u16 = 200;
/// Odd 64-bit constant spreading consecutive slots across the seed space.
const SLOT_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;
/// Progress is logged every `requested / PROGRESS_STEPS` completions.
const PROGRESS_STEPS: u64 = 20;

/// State shared by every worker of one run.
pub(super) struct WorkerShared<T: ?Sized> {
    pub(super) transport: Arc<T>,
    pub(super) pool: Arc<ParameterPool>,
    pub(super) builder: Arc<RequestBuilder>,
    pub(super) aggregator: Arc<Aggregator>,
    pub(super) slots: SlotCounter,
    pub(super) in_flight: InflightGauge,
    pub(super) request_timeout: Duration,
    pub(super) seed: u64,
    pub(super) requested: u64,
}

impl<T: ?Sized> WorkerShared<T> {
    const fn report_interval(&self) -> u64 {
        self.requested / PROGRESS_STEPS
    }
}

/// Seeds the sampler for one slot so a slot always maps to the same target.
pub(in crate::http) fn slot_rng(seed: u64, slot: u64) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(slot.wrapping_mul(SLOT_SEED_STRIDE)))
}

pub(super) async fn run_worker<T>(shared: Arc<WorkerShared<T>>, mut shutdown_rx: ShutdownReceiver)
where
    T: Transport + ?Sized,
{
    loop {
        if shutdown_rx.try_recv().is_ok() {
            break;
        }
        let Some(slot) = shared.slots.claim() else {
            break;
        };

        let request = {
            let mut rng = slot_rng(shared.seed, slot);
            let target = RequestTarget::sample(&shared.pool, &mut rng);
            debug!(
                "Slot {}: stock={} date={}",
                slot, target.identifier, target.date
            );
            shared.builder.build(&target)
        };
        trace!("Slot {}: {} {}", slot, request.method, request.url);

        let outcome = tokio::select! {
            _ = shutdown_rx.recv() => break,
            outcome = execute(&shared, &request) => outcome,
        };
        if record(&shared, outcome).is_none() {
            break;
        }
    }
}

async fn execute<T>(shared: &WorkerShared<T>, request: &RequestDescriptor) -> Outcome
where
    T: Transport + ?Sized,
{
    let start = Instant::now();
    let in_flight_guard = InflightGuard::acquire(&shared.in_flight);
    let result = timeout(shared.request_timeout, shared.transport.send(request)).await;
    drop(in_flight_guard);
    classify(result, start.elapsed())
}

pub(in crate::http) fn classify(
    result: Result<Result<TransportResponse, TransportError>, Elapsed>,
    latency: Duration,
) -> Outcome {
    match result {
        Ok(Ok(response)) if response.status == SUCCESS_STATUS => {
            Outcome::success(latency, response.body_bytes)
        }
        Ok(Ok(response)) => Outcome::failure(
            RequestFailure::Status(response.status),
            latency,
            response.body_bytes,
        ),
        Ok(Err(err)) => {
            debug!("{}", err);
            let failure = if err.is_timeout() {
                RequestFailure::Timeout
            } else {
                RequestFailure::Transport
            };
            Outcome::failure(failure, latency, 0)
        }
        Err(_elapsed) => Outcome::failure(RequestFailure::Timeout, latency, 0),
    }
}

/// Returns `None` once the aggregator has been closed by the run timeout.
fn record<T: ?Sized>(shared: &WorkerShared<T>, outcome: Outcome) -> Option<u64> {
    let completed = shared.aggregator.record(outcome)?;
    let interval = shared.report_interval();
    if interval > 0 && completed.checked_rem(interval) == Some(0) {
        let snapshot = shared.aggregator.snapshot();
        info!(
            "Progress: {}/{} completed ({} failures)",
            completed, shared.requested, snapshot.failures
        );
    }
    Some(completed)
}
