use std::time::Duration;

use serde::Deserialize;

use crate::args::{AddressingMode, OutputFormat, parse_duration};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub requests: Option<u64>,
    #[serde(alias = "max_tasks")]
    pub concurrency: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub run_timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub mode: Option<AddressingMode>,
    pub seed: Option<u64>,
    pub cache_file: Option<String>,
    pub provider_url: Option<String>,
    pub provider_field: Option<String>,
    pub date_start: Option<String>,
    pub date_days: Option<u64>,
    pub output_format: Option<OutputFormat>,
    pub disable_keepalive: Option<bool>,
    pub insecure: Option<bool>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
