//! Storage seam and service trait.
//!
//! These traits abstract persistence and the pipeline entry point so the
//! storage backend can be swapped (and mocked) without touching the
//! planning or orchestration logic.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;

use berza_market_data::PricePoint;

use super::ingest_model::BatchReport;
use crate::errors::Result;

/// Storage interface for daily price history.
///
/// The store's primary key is `(security_id, trade_date)`. Implementations
/// must reject a colliding append rather than overwrite: re-ingesting data
/// that is already present indicates a planning or deduplication bug and
/// has to surface, not disappear.
#[async_trait]
pub trait PriceHistoryStore: Send + Sync {
    /// Latest stored trading day for a security, or `None` if no rows exist.
    fn latest_date(&self, security_id: &str) -> Result<Option<NaiveDate>>;

    /// Append a batch of rows for one security.
    ///
    /// Returns the number of rows written. Fails with
    /// [`DatabaseError::UniqueViolation`](crate::errors::DatabaseError::UniqueViolation)
    /// when any row collides with an existing `(security_id, trade_date)`.
    async fn append(&self, security_id: &str, points: &[PricePoint]) -> Result<usize>;
}

/// The pipeline entry point.
#[async_trait]
pub trait IngestServiceTrait: Send + Sync {
    /// Bring stored history for the given securities up to date.
    ///
    /// Computes which securities are stale, fetches only the missing date
    /// ranges under `concurrency_cap`, persists the results, and returns
    /// the aggregated per-security failures. Partial failure never aborts
    /// the batch.
    async fn update(
        &self,
        security_ids: &HashSet<String>,
        concurrency_cap: usize,
    ) -> Result<BatchReport>;
}
