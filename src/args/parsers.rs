use std::time::Duration;

use chrono::NaiveDate;

use super::types::{PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};

/// Date token layout used by the target service.
pub(crate) const DATE_TOKEN_FORMAT: &str = "%Y%m%d";
const DATE_ISO_FORMAT: &str = "%Y-%m-%d";

pub(super) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

pub(super) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration(s).map_err(AppError::from)
}

pub(super) fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).map_err(AppError::from)
}

/// Parses `YYYYMMDD` or `YYYY-MM-DD`.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let value = s.trim();
    NaiveDate::parse_from_str(value, DATE_TOKEN_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(value, DATE_ISO_FORMAT))
        .map_err(|err| ValidationError::InvalidDate {
            value: s.to_owned(),
            source: err,
        })
}

/// Parses durations such as `250ms`, `10s`, `2m`, or `1h`. A bare number is seconds.
pub(crate) fn parse_duration(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.is_zero() {
        return Err(ValidationError::DurationZero);
    }

    Ok(duration)
}
