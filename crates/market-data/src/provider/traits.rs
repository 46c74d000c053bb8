//! Provider trait definitions.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::PricePoint;

/// A source of daily trading history.
///
/// Implementations are responsible for decomposing the requested span into
/// whatever page/window sizes the remote source tolerates; callers hand over
/// one span per security and get back typed, deduplicated, complete rows.
///
/// # Contract
///
/// - Rows with a missing last trade price, max or min are never returned.
/// - A range that yields zero rows overall is reported as
///   [`MarketDataError::NoData`], distinct from transport failures.
/// - The first transport or parse failure aborts the remaining windows of
///   that security and nothing fetched so far is returned.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Fetch daily records for `security_id` over `[start, end]`, inclusive.
    async fn fetch_range(
        &self,
        security_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, MarketDataError>;
}
