pub(crate) const DEFAULT_USER_AGENT: &str = concat!("ochl-stress/", env!("CARGO_PKG_VERSION"));

/// Identifier cache consulted before the provider.
pub(crate) const DEFAULT_CACHE_FILE: &str = "stock_codes.txt";

/// Field extracted from provider objects when the payload is a JSON object array.
pub(crate) const DEFAULT_PROVIDER_FIELD: &str = "code";

pub(crate) const DEFAULT_DATE_START: &str = "20250101";
pub(crate) const DEFAULT_DATE_DAYS: &str = "25";
