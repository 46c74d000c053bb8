//! Ingestion constants.

/// How far back to fetch for a security with no stored history, in days.
/// Ten years of daily records is the useful horizon for the indicator
/// consumers downstream; anything older is noise for this exchange.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 3650;

/// Default cap on concurrently running fetch workers.
///
/// The cap is a configuration value, not a hard constant; it is always
/// clamped to the number of pending work items so idle workers are never
/// spawned.
pub const DEFAULT_CONCURRENCY: usize = 200;
