use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU64, PositiveUsize, StressArgs, parse_date};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments. Values given explicitly on
/// the command line win.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut StressArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = requests;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(concurrency, "concurrency")?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = duration_field(timeout, "timeout")?;
    }

    if !is_cli(matches, "run_timeout")
        && let Some(timeout) = config.run_timeout.as_ref()
    {
        args.run_timeout = duration_field(timeout, "run_timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = duration_field(timeout, "connect_timeout")?;
    }

    if !is_cli(matches, "mode")
        && let Some(mode) = config.mode
    {
        args.mode = mode;
    }

    if !is_cli(matches, "seed")
        && let Some(seed) = config.seed
    {
        args.seed = Some(seed);
    }

    if !is_cli(matches, "cache_file")
        && let Some(path) = config.cache_file.clone()
    {
        args.cache_file = path;
    }

    if !is_cli(matches, "provider_url")
        && let Some(url) = config.provider_url.clone()
    {
        args.provider_url = Some(url);
    }

    if !is_cli(matches, "provider_field")
        && let Some(field) = config.provider_field.clone()
    {
        args.provider_field = field;
    }

    if !is_cli(matches, "date_start")
        && let Some(date) = config.date_start.as_deref()
    {
        args.date_start = parse_date(date).map_err(|err| {
            AppError::config(ConfigError::InvalidField {
                field: "date_start",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "date_days")
        && let Some(days) = config.date_days
    {
        args.date_days = ensure_positive_u64(days, "date_days")?;
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_cli(matches, "disable_keepalive")
        && let Some(disable) = config.disable_keepalive
    {
        args.disable_keepalive = disable;
    }

    if !is_cli(matches, "insecure")
        && let Some(insecure) = config.insecure
    {
        args.insecure = insecure;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn duration_field(value: &DurationValue, field: &'static str) -> AppResult<std::time::Duration> {
    value.to_duration().map_err(|err: ValidationError| {
        AppError::config(ConfigError::InvalidField { field, source: err })
    })
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
