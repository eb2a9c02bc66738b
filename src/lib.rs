//! Bounded-concurrency HTTP load generator for stock-quote style services.
//!
//! A run samples `(identifier, date)` pairs from a [`source::ParameterPool`],
//! turns them into GET requests with [`http::RequestBuilder`], and executes a
//! fixed number of them through [`http::Dispatcher`] with at most `C` in
//! flight. Outcomes are folded into a [`metrics::Aggregator`] and reported as
//! text or JSON by [`app::summary_lines`] / [`app::summary_json`].
pub mod app;
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod shutdown;
pub mod source;
