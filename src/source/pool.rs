use rand::Rng;

use crate::error::SourceError;

/// Immutable identifier and date pools shared by every worker.
#[derive(Debug, Clone)]
pub struct ParameterPool {
    identifiers: Vec<String>,
    dates: Vec<String>,
}

impl ParameterPool {
    /// Builds a pool from raw tokens. Tokens are trimmed and blank ones dropped.
    ///
    /// # Errors
    ///
    /// Returns an error when either pool ends up empty.
    pub fn new(identifiers: Vec<String>, dates: Vec<String>) -> Result<Self, SourceError> {
        let identifiers = normalize(identifiers);
        if identifiers.is_empty() {
            return Err(SourceError::EmptyIdentifiers);
        }
        let dates = normalize(dates);
        if dates.is_empty() {
            return Err(SourceError::EmptyDates);
        }
        Ok(Self { identifiers, dates })
    }

    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    #[must_use]
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// Draws one identifier and one date, uniformly and independently.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (&str, &str) {
        let identifier = pick(&self.identifiers, rng);
        let date = pick(&self.dates, rng);
        (identifier, date)
    }
}

fn pick<'pool, R: Rng + ?Sized>(values: &'pool [String], rng: &mut R) -> &'pool str {
    let index = rng.gen_range(0..values.len());
    values.get(index).map_or("", String::as_str)
}

fn normalize(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .filter_map(|token| {
            let trimmed = token.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.len() == token.len() {
                Some(token)
            } else {
                Some(trimmed.to_owned())
            }
        })
        .collect()
}
