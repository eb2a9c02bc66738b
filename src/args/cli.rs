use chrono::NaiveDate;
use clap::Parser;
use std::time::Duration;

use super::defaults::{
    DEFAULT_CACHE_FILE, DEFAULT_DATE_DAYS, DEFAULT_DATE_START, DEFAULT_PROVIDER_FIELD,
};
use super::parsers::{
    parse_bool_env, parse_date_arg, parse_duration_arg, parse_positive_u64, parse_positive_usize,
};
use super::types::{AddressingMode, OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Bounded-concurrency HTTP stress tester for daily OCHL quote services."
)]
pub struct StressArgs {
    /// Base URL of the quote endpoint (e.g. http://localhost:8001/projects/stock_daily/OCHL)
    #[arg(long, short)]
    pub url: Option<String>,

    /// Total number of requests to dispatch
    #[arg(long = "requests", short = 'n', default_value = "10000")]
    pub requests: u64,

    /// Maximum number of requests in flight at once
    #[arg(
        long = "concurrency",
        short = 'c',
        alias = "max-tasks",
        default_value = "200",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "10s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Overall run timeout; unfinished requests are reported as abandoned (supports ms/s/m/h)
    #[arg(
        long = "run-timeout",
        default_value = "60s",
        value_parser = parse_duration_arg
    )]
    pub run_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// How stock code and date are encoded into the URL
    #[arg(long, short = 'm', default_value = "query", ignore_case = true)]
    pub mode: AddressingMode,

    /// Seed for parameter sampling (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Identifier cache file (one stock code per line)
    #[arg(long = "cache-file", default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: String,

    /// Provider endpoint queried when the cache file is missing
    #[arg(long = "provider-url")]
    pub provider_url: Option<String>,

    /// Field holding the identifier when the provider returns JSON objects
    #[arg(long = "provider-field", default_value = DEFAULT_PROVIDER_FIELD)]
    pub provider_field: String,

    /// First calendar day of the date pool (YYYYMMDD or YYYY-MM-DD)
    #[arg(long = "date-start", default_value = DEFAULT_DATE_START, value_parser = parse_date_arg)]
    pub date_start: NaiveDate,

    /// Number of consecutive days in the date pool
    #[arg(
        long = "date-days",
        default_value = DEFAULT_DATE_DAYS,
        value_parser = parse_positive_u64
    )]
    pub date_days: PositiveU64,

    /// Summary output format
    #[arg(long = "output-format", default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,

    /// Disable HTTP keep-alive
    #[arg(long = "disable-keepalive")]
    pub disable_keepalive: bool,

    /// Accept invalid TLS certificates
    #[arg(long)]
    pub insecure: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by OCHL_STRESS_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./ochl-stress.toml or ./ochl-stress.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
