//! Database model for daily price rows.

use std::str::FromStr;

use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;

use berza_core::errors::{DatabaseError, Error, Result};
use berza_market_data::PricePoint;

/// Date rendering used for the TEXT `trade_date` column. Lexicographic
/// order of this form matches chronological order, which is what makes
/// `MAX(trade_date)` and range filters on a TEXT column correct.
pub(crate) const DAY_FORMAT: &str = "%Y-%m-%d";

/// Database model for one daily price row.
///
/// Decimals are stored as text so values round-trip without float drift.
#[derive(Queryable, Identifiable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::price_history)]
#[diesel(primary_key(security_id, trade_date))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PricePointDB {
    pub security_id: String,
    pub trade_date: String,
    pub last_trade_price: Option<String>,
    pub max_price: Option<String>,
    pub min_price: Option<String>,
    pub volume: Option<String>,
    pub turnover: Option<String>,
}

impl PricePointDB {
    /// Normalize a typed row for persistence under `security_id`.
    ///
    /// The passed id is authoritative; absent values become SQL NULL.
    pub fn from_domain(security_id: &str, point: &PricePoint) -> Self {
        Self {
            security_id: security_id.to_string(),
            trade_date: point.trade_date.format(DAY_FORMAT).to_string(),
            last_trade_price: point.last_trade_price.map(|d| d.to_string()),
            max_price: point.max_price.map(|d| d.to_string()),
            min_price: point.min_price.map(|d| d.to_string()),
            volume: point.volume.map(|d| d.to_string()),
            turnover: point.turnover.map(|d| d.to_string()),
        }
    }

    /// Decode a stored row back into the domain type.
    pub fn into_domain(self) -> Result<PricePoint> {
        let trade_date = NaiveDate::parse_from_str(&self.trade_date, DAY_FORMAT)
            .map_err(|e| decode_error(&self.security_id, &self.trade_date, &e.to_string()))?;

        Ok(PricePoint {
            trade_date,
            last_trade_price: decode_decimal(&self.security_id, self.last_trade_price)?,
            max_price: decode_decimal(&self.security_id, self.max_price)?,
            min_price: decode_decimal(&self.security_id, self.min_price)?,
            volume: decode_decimal(&self.security_id, self.volume)?,
            turnover: decode_decimal(&self.security_id, self.turnover)?,
            security_id: self.security_id,
        })
    }
}

fn decode_decimal(security_id: &str, raw: Option<String>) -> Result<Option<Decimal>> {
    raw.map(|s| {
        Decimal::from_str(&s).map_err(|e| decode_error(security_id, &s, &e.to_string()))
    })
    .transpose()
}

fn decode_error(security_id: &str, value: &str, message: &str) -> Error {
    Error::Database(DatabaseError::Internal(format!(
        "undecodable value '{}' for {}: {}",
        value, security_id, message
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_domain_round_trip() {
        let mut point = PricePoint::new("ALK", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        point.last_trade_price = Some(dec!(5200.50));
        point.max_price = Some(dec!(5250));
        point.min_price = Some(dec!(5100));

        let db_row = PricePointDB::from_domain("ALK", &point);
        assert_eq!(db_row.trade_date, "2024-03-15");
        assert_eq!(db_row.volume, None);

        let back = db_row.into_domain().unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn test_from_domain_stamps_the_given_security_id() {
        let point = PricePoint::new("WRONG", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let db_row = PricePointDB::from_domain("ALK", &point);
        assert_eq!(db_row.security_id, "ALK");
    }

    #[test]
    fn test_undecodable_decimal_is_an_internal_error() {
        let db_row = PricePointDB {
            security_id: "ALK".to_string(),
            trade_date: "2024-03-15".to_string(),
            last_trade_price: Some("not-a-number".to_string()),
            max_price: None,
            min_price: None,
            volume: None,
            turnover: None,
        };
        assert!(db_row.into_domain().is_err());
    }
}
