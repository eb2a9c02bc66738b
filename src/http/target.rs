use rand::Rng;
use reqwest::Method;
use url::Url;

use crate::args::AddressingMode;
use crate::error::HttpError;
use crate::source::ParameterPool;

/// One sampled `(identifier, date)` pair borrowed from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTarget<'pool> {
    pub identifier: &'pool str,
    pub date: &'pool str,
}

impl<'pool> RequestTarget<'pool> {
    pub fn sample<R: Rng + ?Sized>(pool: &'pool ParameterPool, rng: &mut R) -> Self {
        let (identifier, date) = pool.sample(rng);
        Self { identifier, date }
    }
}

/// Fully resolved request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
}

/// Turns sampled targets into request URLs against a fixed base.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base: Url,
    mode: AddressingMode,
}

impl RequestBuilder {
    /// Validates the base URL for the given addressing mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, has no hierarchical path,
    /// or uses a scheme other than http/https.
    pub fn new(base_url: &str, mode: AddressingMode) -> Result<Self, HttpError> {
        let base = Url::parse(base_url).map_err(|err| HttpError::InvalidUrl {
            url: base_url.to_owned(),
            source: err,
        })?;
        if base.cannot_be_a_base() {
            return Err(HttpError::CannotBeABase {
                url: base_url.to_owned(),
            });
        }
        match base.scheme() {
            "http" | "https" => {}
            other => {
                return Err(HttpError::UnsupportedScheme {
                    url: base_url.to_owned(),
                    scheme: other.to_owned(),
                });
            }
        }
        Ok(Self { base, mode })
    }

    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    #[must_use]
    pub const fn mode(&self) -> AddressingMode {
        self.mode
    }

    #[must_use]
    pub fn build(&self, target: &RequestTarget<'_>) -> RequestDescriptor {
        let mut url = self.base.clone();
        match self.mode {
            AddressingMode::Query => {
                url.query_pairs_mut()
                    .append_pair("stock", target.identifier)
                    .append_pair("date", target.date);
            }
            AddressingMode::Path => {
                // Always a base: checked in `new`.
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments
                        .pop_if_empty()
                        .push(target.identifier)
                        .push(target.date);
                }
            }
        }
        RequestDescriptor {
            method: Method::GET,
            url,
        }
    }
}
