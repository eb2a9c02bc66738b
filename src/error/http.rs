use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme '{scheme}' in '{url}'. Use http or https.")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("URL '{url}' cannot take path segments.")]
    CannotBeABase { url: String },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
}

/// Failure while executing one request. Recoverable: it is classified into an
/// outcome and never aborts the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out: {message}")]
    Timeout { message: String },
    #[error("Request failed: {message}")]
    Failed { message: String },
}

impl TransportError {
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                message: err.to_string(),
            }
        } else {
            Self::Failed {
                message: err.to_string(),
            }
        }
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
