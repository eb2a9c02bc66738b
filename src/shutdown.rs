//! Broadcast channel telling workers to stop claiming slots.
use tokio::sync::broadcast;

pub type ShutdownSender = broadcast::Sender<()>;
pub type ShutdownReceiver = broadcast::Receiver<()>;

/// Creates the sender; each worker subscribes its own receiver.
#[must_use]
pub fn shutdown_channel() -> ShutdownSender {
    let (shutdown_tx, _) = broadcast::channel(1);
    shutdown_tx
}
