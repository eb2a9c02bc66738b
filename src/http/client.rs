use std::time::Duration;

use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;

/// Connection settings for the shared HTTP client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub max_idle_per_host: usize,
    pub disable_keepalive: bool,
    pub insecure: bool,
}

/// Builds the client used by the transport and the identifier provider.
///
/// # Errors
///
/// Returns an error when the TLS backend or connector cannot be initialized.
pub fn build_client(settings: &ClientSettings) -> Result<Client, HttpError> {
    let mut client_builder = Client::builder()
        .timeout(settings.request_timeout)
        .connect_timeout(settings.connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .pool_max_idle_per_host(settings.max_idle_per_host);

    if settings.disable_keepalive {
        client_builder = client_builder
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Some(Duration::from_secs(0)));
    }

    if settings.insecure {
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    client_builder
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}
