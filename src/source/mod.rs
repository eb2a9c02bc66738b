//! Parameter pools that request targets are sampled from.
//!
//! Identifiers come from a line-oriented cache file or, when the cache is
//! missing, from an [`IdentifierProvider`]; a successful provider fetch is
//! written back to the cache. Date tokens are a generated calendar range.
mod cache;
mod dates;
mod pool;
mod provider;


use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::SourceError;

pub use cache::{read_cache, write_cache};
pub use dates::date_tokens;
pub use pool::ParameterPool;
pub use provider::{HttpIdentifierProvider, IdentifierProvider};

/// Where the pool is loaded from.
#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub cache_file: PathBuf,
    pub date_start: NaiveDate,
    pub date_days: u64,
}

/// Builds the parameter pool, preferring the cache over the provider.
///
/// # Errors
///
/// Returns [`SourceError::Unavailable`] when the cache is missing or empty and
/// no provider is configured or the provider fails. An unreadable cache is
/// treated like an empty one.
pub async fn load_parameter_pool(
    settings: &SourceSettings,
    provider: Option<&dyn IdentifierProvider>,
) -> Result<ParameterPool, SourceError> {
    let identifiers = load_identifiers(&settings.cache_file, provider).await?;
    let dates = date_tokens(settings.date_start, settings.date_days);
    ParameterPool::new(identifiers, dates)
}

async fn load_identifiers(
    cache_file: &std::path::Path,
    provider: Option<&dyn IdentifierProvider>,
) -> Result<Vec<String>, SourceError> {
    let mut cache_problem = None;
    match read_cache(cache_file).await {
        Ok(Some(identifiers)) if !identifiers.is_empty() => {
            info!(
                "Loaded {} identifiers from cache {}",
                identifiers.len(),
                cache_file.display()
            );
            return Ok(identifiers);
        }
        Ok(Some(_)) => warn!(
            "Identifier cache {} is empty; falling back to provider",
            cache_file.display()
        ),
        Ok(None) => {}
        Err(err) => {
            warn!("{}; falling back to provider", err);
            cache_problem = Some(err.to_string());
        }
    }

    let Some(provider) = provider else {
        let reason = cache_problem.map_or_else(
            || "no identifier provider is configured".to_owned(),
            |problem| format!("no identifier provider is configured ({})", problem),
        );
        return Err(SourceError::Unavailable {
            cache: cache_file.to_path_buf(),
            reason,
        });
    };

    let identifiers = provider
        .fetch_identifiers()
        .await
        .map_err(|err| SourceError::Unavailable {
            cache: cache_file.to_path_buf(),
            reason: format!("{} failed: {}", provider.describe(), err),
        })?;
    info!(
        "Fetched {} identifiers from {}",
        identifiers.len(),
        provider.describe()
    );

    if let Err(err) = write_cache(cache_file, &identifiers).await {
        warn!("{}", err);
    }

    Ok(identifiers)
}
