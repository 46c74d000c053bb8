//! Clock abstraction.
//!
//! "Today" is load-bearing in this system: it is both the default end bound
//! of every fetch and the reference point for deciding whether stored data
//! is current. Threading it through a trait keeps that reference explicit
//! and lets tests pin it.

use chrono::{NaiveDate, Utc};

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation, UTC.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock frozen at a fixed date, for deterministic tests.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }
}
