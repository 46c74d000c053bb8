use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily trading record for a security.
///
/// The pair `(security_id, trade_date)` is the natural key downstream;
/// everything else is optional because the exchange publishes partial rows
/// for days with little or no trading. Absent values are `None`, never zero.
///
/// All value fields are [`Decimal`], which keeps `Eq`/`Hash` available so a
/// fetch can deduplicate republished boundary rows by full-row equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PricePoint {
    /// The security this row belongs to
    pub security_id: String,

    /// Calendar trading day (no time component)
    pub trade_date: NaiveDate,

    /// Last trade price of the day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_trade_price: Option<Decimal>,

    /// Daily maximum price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,

    /// Daily minimum price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,

    /// Traded volume
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,

    /// Turnover in BEST, denars
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover: Option<Decimal>,
}

impl PricePoint {
    /// Create an empty row for a security and day.
    pub fn new(security_id: impl Into<String>, trade_date: NaiveDate) -> Self {
        Self {
            security_id: security_id.into(),
            trade_date,
            last_trade_price: None,
            max_price: None,
            min_price: None,
            volume: None,
            turnover: None,
        }
    }

    /// A row is complete when price, max and min are all present.
    ///
    /// Incomplete rows are dropped before persistence: the remote source
    /// cannot be re-queried for a single missing field, so there is nothing
    /// to backfill them with later.
    pub fn is_complete(&self) -> bool {
        self.last_trade_price.is_some() && self.max_price.is_some() && self.min_price.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_point_is_incomplete() {
        let point = PricePoint::new("ALK", day(2024, 3, 15));
        assert!(!point.is_complete());
        assert!(point.volume.is_none());
    }

    #[test]
    fn test_complete_requires_price_max_and_min() {
        let mut point = PricePoint::new("ALK", day(2024, 3, 15));
        point.last_trade_price = Some(dec!(5200.0));
        point.max_price = Some(dec!(5250.0));
        assert!(!point.is_complete());

        point.min_price = Some(dec!(5100.0));
        assert!(point.is_complete());
    }

    #[test]
    fn test_missing_price_is_incomplete_even_with_volume() {
        let mut point = PricePoint::new("KMB", day(2024, 3, 15));
        point.max_price = Some(dec!(100));
        point.min_price = Some(dec!(90));
        point.volume = Some(dec!(1200));
        point.turnover = Some(dec!(118_000));
        assert!(!point.is_complete());
    }

    #[test]
    fn test_full_row_equality() {
        let mut a = PricePoint::new("ALK", day(2024, 3, 15));
        a.last_trade_price = Some(dec!(5200.0));
        let b = a.clone();
        assert_eq!(a, b);

        let mut c = b.clone();
        c.volume = Some(dec!(1));
        assert_ne!(a, c);
    }
}
