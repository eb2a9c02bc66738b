use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::SourceError;

/// External supplier of stock identifiers, consulted when the cache is empty.
#[async_trait]
pub trait IdentifierProvider: Send + Sync {
    /// Fetches the full identifier universe.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider cannot be reached or yields nothing.
    async fn fetch_identifiers(&self) -> Result<Vec<String>, SourceError>;

    /// Human-readable name used in logs and errors.
    fn describe(&self) -> String;
}

/// Fetches identifiers from an HTTP endpoint.
///
/// Accepted payloads: a JSON array of strings or numbers, a JSON array of
/// objects carrying `field`, either of those wrapped as `{"data": [...]}`, or
/// plain text with one identifier per line.
#[derive(Debug, Clone)]
pub struct HttpIdentifierProvider {
    client: Client,
    url: String,
    field: String,
}

impl HttpIdentifierProvider {
    #[must_use]
    pub const fn new(client: Client, url: String, field: String) -> Self {
        Self { client, url, field }
    }
}

#[async_trait]
impl IdentifierProvider for HttpIdentifierProvider {
    async fn fetch_identifiers(&self) -> Result<Vec<String>, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| SourceError::ProviderRequest {
                url: self.url.clone(),
                source: err,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::ProviderStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|err| SourceError::ProviderRequest {
                url: self.url.clone(),
                source: err,
            })?;

        let identifiers =
            parse_identifiers(&body, &self.field).map_err(|reason| SourceError::ProviderBody {
                url: self.url.clone(),
                reason,
            })?;
        if identifiers.is_empty() {
            return Err(SourceError::ProviderEmpty {
                url: self.url.clone(),
            });
        }
        Ok(identifiers)
    }

    fn describe(&self) -> String {
        format!("provider {}", self.url)
    }
}

pub(super) fn parse_identifiers(body: &str, field: &str) -> Result<Vec<String>, String> {
    let trimmed = body.trim_start();
    if !(trimmed.starts_with('[') || trimmed.starts_with('{')) {
        return Ok(body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect());
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|err| err.to_string())?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(items)) => items,
            Some(_) | None => return Err("expected a `data` array".to_owned()),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            return Err("expected a JSON array".to_owned());
        }
    };

    let mut identifiers = Vec::with_capacity(items.len());
    for item in items {
        let token = match item {
            Value::Object(mut object) => object.remove(field).and_then(scalar_token),
            other @ (Value::String(_) | Value::Number(_)) => scalar_token(other),
            Value::Null | Value::Bool(_) | Value::Array(_) => None,
        };
        match token {
            Some(token) if !token.trim().is_empty() => identifiers.push(token.trim().to_owned()),
            Some(_) | None => return Err(format!("entry without a usable `{}` value", field)),
        }
    }
    Ok(identifiers)
}

fn scalar_token(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}
