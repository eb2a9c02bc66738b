//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use cli::StressArgs;
pub use types::{AddressingMode, OutputFormat, PositiveU64, PositiveUsize};

pub(crate) use defaults::DEFAULT_USER_AGENT;
pub(crate) use parsers::{DATE_TOKEN_FORMAT, parse_date, parse_duration};
