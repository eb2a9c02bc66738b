use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;

use crate::error::TransportError;

use super::target::RequestDescriptor;

/// Status and drained body size of a completed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body_bytes: u64,
}

/// Executes one request. Implementations must be cancel-safe: the dispatcher
/// drops the future on timeout.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and drains the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on connection, TLS, timeout, or body read failures.
    /// Non-200 statuses are not errors.
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .request(request.method.clone(), request.url.clone())
            .send()
            .await
            .map_err(|err| TransportError::from_reqwest(&err))?;
        let status = response.status().as_u16();
        let body_bytes = drain_response_body(response)
            .await
            .map_err(|err| TransportError::from_reqwest(&err))?;
        Ok(TransportResponse { status, body_bytes })
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
