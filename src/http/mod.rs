//! Request construction, transport, and the bounded dispatcher.
mod client;
mod dispatcher;
mod target;
mod transport;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::{ClientSettings, build_client};
pub use dispatcher::{DispatchPlan, Dispatcher};
pub use target::{RequestBuilder, RequestDescriptor, RequestTarget};
pub use transport::{ReqwestTransport, Transport, TransportResponse};
