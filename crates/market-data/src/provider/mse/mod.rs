//! Macedonian Stock Exchange provider.
//!
//! Fetches daily trading history by scraping the public symbol-history page:
//!
//! `GET {base}/stats/symbolhistory/{symbol}?FromDate=YYYY-MM-DD&ToDate=YYYY-MM-DD`
//!
//! The endpoint only honours ranges up to roughly a year, so a fetch over an
//! arbitrary span is decomposed into [`Window`]s and requested window by
//! window, in chronological order. The response is an HTML page whose single
//! `table#resultsTable` holds the rows; a page without that table simply has
//! no trades in the window and is not an error.

mod parse;

pub use parse::{parse_date, parse_decimal};

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;

use crate::errors::MarketDataError;
use crate::models::{PricePoint, Window};
use crate::provider::traits::HistoryProvider;

/// Public base URL of the exchange's English pages.
pub const DEFAULT_BASE_URL: &str = "https://www.mse.mk/en";

const PROVIDER_ID: &str = "MSE";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Daily history provider backed by the MSE website.
pub struct MseProvider {
    client: Client,
    base_url: String,
}

impl Default for MseProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MseProvider {
    /// Create a provider against the public exchange site.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a provider against a different base URL (tests, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Request one window and parse its result table.
    ///
    /// Returns an empty vec when the page carries no result table.
    async fn fetch_window(
        &self,
        security_id: &str,
        window: &Window,
    ) -> Result<Vec<PricePoint>, MarketDataError> {
        let url = format!("{}/stats/symbolhistory/{}", self.base_url, security_id);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("FromDate", window.from_date.format("%Y-%m-%d").to_string()),
                ("ToDate", window.to_date.format("%Y-%m-%d").to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        parse::parse_history_table(security_id, &body)
    }
}

#[async_trait]
impl HistoryProvider for MseProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_range(
        &self,
        security_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, MarketDataError> {
        let windows = Window::partition(start, end);
        let mut points: Vec<PricePoint> = Vec::new();

        // Windows are requested strictly in chronological order; the first
        // failure aborts the remaining windows for this security.
        for window in &windows {
            let rows = self.fetch_window(security_id, window).await?;
            if rows.is_empty() {
                debug!(
                    "No rows for {} between {} and {}",
                    security_id, window.from_date, window.to_date
                );
            } else {
                debug!(
                    "Fetched {} rows for {} between {} and {}",
                    rows.len(),
                    security_id,
                    window.from_date,
                    window.to_date
                );
            }
            points.extend(rows);
        }

        dedupe_full_rows(&mut points);

        if points.is_empty() {
            return Err(MarketDataError::NoData {
                symbol: security_id.to_string(),
            });
        }

        Ok(points)
    }
}

/// Drop repeated full rows, keeping the first occurrence in order.
///
/// A window boundary date can be republished by both adjacent pages; only
/// rows that are equal in every field are considered duplicates.
fn dedupe_full_rows(points: &mut Vec<PricePoint>) {
    let mut seen = HashSet::new();
    points.retain(|p| seen.insert(p.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence_in_order() {
        let a = PricePoint::new("ALK", day(2024, 1, 1));
        let boundary = PricePoint::new("ALK", day(2024, 1, 2));
        let b = PricePoint::new("ALK", day(2024, 1, 3));

        let mut points = vec![a.clone(), boundary.clone(), boundary.clone(), b.clone()];
        dedupe_full_rows(&mut points);
        assert_eq!(points, vec![a, boundary, b]);
    }

    #[test]
    fn test_dedupe_distinguishes_differing_rows_on_same_day() {
        let mut first = PricePoint::new("ALK", day(2024, 1, 2));
        first.last_trade_price = Some(rust_decimal::Decimal::from(100));
        let mut second = first.clone();
        second.last_trade_price = Some(rust_decimal::Decimal::from(101));

        let mut points = vec![first.clone(), second.clone()];
        dedupe_full_rows(&mut points);
        assert_eq!(points.len(), 2);
    }
}
