//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching or parsing remote market data.
///
/// The distinction between [`NoData`](Self::NoData) and the transport/parse
/// variants matters to callers: an empty result for a whole requested range
/// is an expected condition for thinly traded symbols, while a network or
/// parse failure aborts the remaining windows of that symbol's fetch.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The whole requested range produced zero complete rows.
    /// The symbol exists but nothing usable came back.
    #[error("No data retrieved for {symbol}")]
    NoData {
        /// The symbol whose fetch came up empty
        symbol: String,
    },

    /// A network error occurred while talking to the remote source.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be interpreted.
    #[error("Parse error for {symbol}: {message}")]
    Parse {
        /// The symbol whose response failed to parse
        symbol: String,
        /// What went wrong
        message: String,
    },
}

impl MarketDataError {
    /// True for the empty-range outcome, false for real failures.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}
