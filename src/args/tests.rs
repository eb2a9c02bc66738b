use super::test_support::parse_test_args;
use super::*;
use crate::args::parsers::parse_bool_env;
use crate::error::{AppError, AppResult, ValidationError};
use chrono::NaiveDate;
use std::time::Duration;

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["ochl-stress", "-u", "http://localhost"])?;

    let expected_no_color = std::env::var("NO_COLOR")
        .ok()
        .and_then(|value| parse_bool_env(&value).ok())
        .unwrap_or(false);

    let checks = [
        (
            args.url.as_deref() == Some("http://localhost"),
            "Unexpected url",
        ),
        (args.requests == 10_000, "Unexpected requests"),
        (args.concurrency.get() == 200, "Unexpected concurrency"),
        (
            args.request_timeout == Duration::from_secs(10),
            "Unexpected request_timeout",
        ),
        (
            args.run_timeout == Duration::from_secs(60),
            "Unexpected run_timeout",
        ),
        (
            args.connect_timeout == Duration::from_secs(5),
            "Unexpected connect_timeout",
        ),
        (args.mode == AddressingMode::Query, "Expected query mode"),
        (args.seed.is_none(), "Expected seed to be None"),
        (args.cache_file == "stock_codes.txt", "Unexpected cache_file"),
        (args.provider_url.is_none(), "Expected provider_url to be None"),
        (args.provider_field == "code", "Unexpected provider_field"),
        (
            Some(args.date_start) == NaiveDate::from_ymd_opt(2025, 1, 1),
            "Unexpected date_start",
        ),
        (args.date_days.get() == 25, "Unexpected date_days"),
        (
            args.output_format == OutputFormat::Text,
            "Expected text output",
        ),
        (!args.disable_keepalive, "Expected keepalive enabled"),
        (!args.insecure, "Expected insecure to be false"),
        (!args.verbose, "Expected verbose to be false"),
        (args.no_color == expected_no_color, "Unexpected no_color"),
        (args.config.is_none(), "Expected config to be None"),
    ];

    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn parse_args_run_parameters() -> AppResult<()> {
    let args = parse_test_args([
        "ochl-stress",
        "-u",
        "http://localhost:8001/projects/stock_daily1/OCHL",
        "-n",
        "100",
        "-c",
        "20",
        "--timeout",
        "250ms",
        "--run-timeout",
        "2m",
        "--mode",
        "PATH",
        "--seed",
        "42",
        "--date-start",
        "2024-12-30",
        "--date-days",
        "3",
        "--output-format",
        "json",
    ])?;

    if args.requests != 100 {
        return Err(AppError::validation("Unexpected requests"));
    }
    if args.concurrency.get() != 20 {
        return Err(AppError::validation("Unexpected concurrency"));
    }
    if args.request_timeout != Duration::from_millis(250) {
        return Err(AppError::validation("Unexpected request_timeout"));
    }
    if args.run_timeout != Duration::from_secs(120) {
        return Err(AppError::validation("Unexpected run_timeout"));
    }
    if args.mode != AddressingMode::Path {
        return Err(AppError::validation("Expected path mode"));
    }
    if args.seed != Some(42) {
        return Err(AppError::validation("Unexpected seed"));
    }
    if Some(args.date_start) != NaiveDate::from_ymd_opt(2024, 12, 30) {
        return Err(AppError::validation("Unexpected date_start"));
    }
    if args.date_days.get() != 3 {
        return Err(AppError::validation("Unexpected date_days"));
    }
    if args.output_format != OutputFormat::Json {
        return Err(AppError::validation("Expected json output"));
    }
    Ok(())
}

#[test]
fn parse_args_max_tasks_alias() -> AppResult<()> {
    let args = parse_test_args(["ochl-stress", "-u", "http://localhost", "--max-tasks", "7"])?;
    if args.concurrency.get() != 7 {
        return Err(AppError::validation("Unexpected concurrency"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_concurrency() -> AppResult<()> {
    if parse_test_args(["ochl-stress", "-u", "http://localhost", "-c", "0"]).is_ok() {
        return Err(AppError::validation("Expected zero concurrency to be rejected"));
    }
    Ok(())
}

#[test]
fn parse_args_allows_zero_requests() -> AppResult<()> {
    let args = parse_test_args(["ochl-stress", "-u", "http://localhost", "-n", "0"])?;
    if args.requests != 0 {
        return Err(AppError::validation("Unexpected requests"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_negative_requests() -> AppResult<()> {
    if parse_test_args(["ochl-stress", "-u", "http://localhost", "-n=-5"]).is_ok() {
        return Err(AppError::validation("Expected negative requests to be rejected"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_bad_date() -> AppResult<()> {
    if parse_test_args([
        "ochl-stress",
        "-u",
        "http://localhost",
        "--date-start",
        "2025-13-01",
    ])
    .is_ok()
    {
        return Err(AppError::validation("Expected invalid date to be rejected"));
    }
    Ok(())
}

#[test]
fn parse_duration_units() -> AppResult<()> {
    let cases = [
        ("15", Duration::from_secs(15)),
        ("500ms", Duration::from_millis(500)),
        ("3m", Duration::from_secs(180)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Unexpected duration for {}: {:?}",
                input, parsed
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_duration_rejects_invalid_values() -> AppResult<()> {
    if !matches!(parse_duration(""), Err(ValidationError::DurationEmpty)) {
        return Err(AppError::validation("Expected DurationEmpty"));
    }
    if !matches!(parse_duration("0s"), Err(ValidationError::DurationZero)) {
        return Err(AppError::validation("Expected DurationZero"));
    }
    if !matches!(
        parse_duration("5d"),
        Err(ValidationError::InvalidDurationUnit { .. })
    ) {
        return Err(AppError::validation("Expected InvalidDurationUnit"));
    }
    if !matches!(
        parse_duration("ms"),
        Err(ValidationError::InvalidDurationFormat { .. })
    ) {
        return Err(AppError::validation("Expected InvalidDurationFormat"));
    }
    Ok(())
}

#[test]
fn parse_date_accepts_both_layouts() -> AppResult<()> {
    let compact = parse_date("20250107")?;
    let iso = parse_date("2025-01-07")?;
    if compact != iso {
        return Err(AppError::validation("Expected identical dates"));
    }
    if compact.format(DATE_TOKEN_FORMAT).to_string() != "20250107" {
        return Err(AppError::validation("Unexpected date token"));
    }
    Ok(())
}

#[test]
fn addressing_mode_from_str() -> AppResult<()> {
    if "Query".parse::<AddressingMode>()? != AddressingMode::Query {
        return Err(AppError::validation("Expected query"));
    }
    if " path ".parse::<AddressingMode>()? != AddressingMode::Path {
        return Err(AppError::validation("Expected path"));
    }
    if "segments".parse::<AddressingMode>().is_ok() {
        return Err(AppError::validation("Expected invalid mode"));
    }
    Ok(())
}
