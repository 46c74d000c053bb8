//! Ingestion domain models.

use std::fmt;

use chrono::NaiveDate;

/// A pending fetch task for one security.
///
/// `start` is the resume point: the day after the last stored date. `None`
/// means nothing is stored yet and the fetch should use the default
/// lookback instead. The end bound is always "today" and is supplied by the
/// orchestrator at fetch time, not stored here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkItem {
    pub security_id: String,
    pub start: Option<NaiveDate>,
}

impl WorkItem {
    /// Resume from a known date.
    pub fn resume(security_id: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            security_id: security_id.into(),
            start: Some(start),
        }
    }

    /// Fetch the full default lookback (no stored data yet).
    pub fn full_history(security_id: impl Into<String>) -> Self {
        Self {
            security_id: security_id.into(),
            start: None,
        }
    }
}

/// One security's failure during a batch run.
///
/// Lives only for the duration of the run; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchError {
    pub security_id: String,
    pub message: String,
}

impl FetchError {
    pub fn new(security_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            security_id: security_id.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.security_id, self.message)
    }
}

/// Aggregate outcome of one batch run.
///
/// The batch itself cannot fail; it only accumulates per-security errors.
/// Silence (an empty error list) means full success.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    /// Number of work items processed (success or failure).
    pub processed: usize,
    /// Per-security failures, in completion order.
    pub errors: Vec<FetchError>,
}

impl BatchReport {
    /// True when every processed item succeeded.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        if self.is_success() {
            format!("Updated {} securities successfully", self.processed)
        } else {
            format!(
                "Updated {} securities with {} failures",
                self.processed - self.errors.len(),
                self.errors.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_item_constructors() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 11).unwrap();
        assert_eq!(WorkItem::resume("ALK", date).start, Some(date));
        assert_eq!(WorkItem::full_history("ALK").start, None);
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::new("ALK", "connection reset");
        assert_eq!(format!("{}", err), "ALK: connection reset");
    }

    #[test]
    fn test_report_summary() {
        let report = BatchReport {
            processed: 3,
            errors: vec![],
        };
        assert!(report.is_success());
        assert_eq!(report.summary(), "Updated 3 securities successfully");

        let report = BatchReport {
            processed: 3,
            errors: vec![FetchError::new("ALK", "timeout")],
        };
        assert!(!report.is_success());
        assert_eq!(report.summary(), "Updated 2 securities with 1 failures");
    }
}
