use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No identifiers available: cache '{cache}' is missing, empty or unreadable and {reason}.")]
    Unavailable { cache: PathBuf, reason: String },
    #[error("Failed to read identifier cache '{path}': {source}")]
    ReadCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write identifier cache '{path}': {source}")]
    WriteCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Identifier provider request to '{url}' failed: {source}")]
    ProviderRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Identifier provider '{url}' returned status {status}.")]
    ProviderStatus { url: String, status: u16 },
    #[error("Identifier provider '{url}' returned an unreadable body: {reason}")]
    ProviderBody { url: String, reason: String },
    #[error("Identifier provider '{url}' returned no identifiers.")]
    ProviderEmpty { url: String },
    #[error("Identifier pool must not be empty.")]
    EmptyIdentifiers,
    #[error("Date pool must not be empty.")]
    EmptyDates,
}
