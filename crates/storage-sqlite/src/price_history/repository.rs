//! Repository implementing the core price-history storage seam.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;

use berza_core::errors::{DatabaseError, Error, Result};
use berza_core::ingest::PriceHistoryStore;
use berza_market_data::PricePoint;

use super::model::{PricePointDB, DAY_FORMAT};
use crate::db::{get_connection, DbPool};
use crate::errors::{IntoCore, StorageError};
use crate::schema::price_history::dsl as price_history_dsl;

/// Rows per INSERT statement, well under SQLite's bind-parameter limit.
const INSERT_CHUNK_SIZE: usize = 1_000;

pub struct PriceHistoryRepository {
    pool: Arc<DbPool>,
}

impl PriceHistoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// All stored rows for a security, ascending by trading day.
    pub fn history(&self, security_id: &str) -> Result<Vec<PricePoint>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = price_history_dsl::price_history
            .filter(price_history_dsl::security_id.eq(security_id))
            .order(price_history_dsl::trade_date.asc())
            .load::<PricePointDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(PricePointDB::into_domain).collect()
    }
}

#[async_trait]
impl PriceHistoryStore for PriceHistoryRepository {
    fn latest_date(&self, security_id: &str) -> Result<Option<NaiveDate>> {
        let mut conn = get_connection(&self.pool)?;

        // trade_date is %Y-%m-%d text, so the lexicographic MAX is the
        // chronological one.
        let max_day: Option<String> = price_history_dsl::price_history
            .filter(price_history_dsl::security_id.eq(security_id))
            .select(diesel::dsl::max(price_history_dsl::trade_date))
            .first::<Option<String>>(&mut conn)
            .into_core()?;

        max_day
            .map(|s| {
                NaiveDate::parse_from_str(&s, DAY_FORMAT).map_err(|e| {
                    Error::Database(DatabaseError::Internal(format!(
                        "undecodable trade_date '{}' for {}: {}",
                        s, security_id, e
                    )))
                })
            })
            .transpose()
    }

    async fn append(&self, security_id: &str, points: &[PricePoint]) -> Result<usize> {
        if points.is_empty() {
            return Ok(0);
        }

        let rows: Vec<PricePointDB> = points
            .iter()
            .map(|p| PricePointDB::from_domain(security_id, p))
            .collect();

        let mut conn = get_connection(&self.pool)?;

        // Plain INSERT, not REPLACE: a primary-key collision means the
        // caller re-fetched data that is already stored and must surface
        // as UniqueViolation.
        conn.immediate_transaction::<_, StorageError, _>(|conn| {
            let mut inserted = 0;
            for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
                inserted += diesel::insert_into(price_history_dsl::price_history)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok(inserted)
        })
        .map_err(Error::from)
    }
}
