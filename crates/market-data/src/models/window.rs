use chrono::{Duration, NaiveDate};

/// Longest date span one request may cover, in days.
///
/// The exchange silently truncates responses for wider ranges, so a fetch
/// over an arbitrary span has to be decomposed into windows of at most
/// this length.
pub const MAX_WINDOW_DAYS: i64 = 365;

/// One bounded sub-range of a fetch, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl Window {
    /// Partition `[start, end]` into consecutive windows of at most
    /// [`MAX_WINDOW_DAYS`] days.
    ///
    /// The windows are contiguous and non-overlapping
    /// (`w[i].to_date + 1 day == w[i + 1].from_date`) and their union is
    /// exactly `[start, end]`. A single-day span yields one window.
    /// Returns an empty vec when `start > end`.
    pub fn partition(start: NaiveDate, end: NaiveDate) -> Vec<Window> {
        let mut windows = Vec::new();
        let mut from = start;
        while from <= end {
            let to = (from + Duration::days(MAX_WINDOW_DAYS)).min(end);
            windows.push(Window {
                from_date: from,
                to_date: to,
            });
            from = to + Duration::days(1);
        }
        windows
    }

    /// Number of days covered, inclusive.
    pub fn num_days(&self) -> i64 {
        (self.to_date - self.from_date).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_span_is_one_window() {
        let d = day(2024, 6, 3);
        let windows = Window::partition(d, d);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].from_date, d);
        assert_eq!(windows[0].to_date, d);
    }

    #[test]
    fn test_inverted_span_is_empty() {
        let windows = Window::partition(day(2024, 6, 3), day(2024, 6, 2));
        assert!(windows.is_empty());
    }

    #[test]
    fn test_short_span_is_one_window() {
        let windows = Window::partition(day(2024, 1, 1), day(2024, 3, 1));
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].from_date, day(2024, 1, 1));
        assert_eq!(windows[0].to_date, day(2024, 3, 1));
    }

    #[test]
    fn test_900_day_span_is_three_windows() {
        let windows = Window::partition(day(2023, 1, 1), day(2025, 6, 19));
        assert_eq!(windows.len(), 3);

        assert_eq!(windows[0].from_date, day(2023, 1, 1));
        assert_eq!(windows[0].to_date, day(2024, 1, 1));
        assert_eq!(windows[1].from_date, day(2024, 1, 2));
        assert_eq!(windows[1].to_date, day(2025, 1, 1));
        assert_eq!(windows[2].from_date, day(2025, 1, 2));
        assert_eq!(windows[2].to_date, day(2025, 6, 19));

        for window in &windows {
            assert!((window.to_date - window.from_date).num_days() <= MAX_WINDOW_DAYS);
        }
    }

    proptest! {
        /// Windows are contiguous, bounded, and cover the span exactly.
        #[test]
        fn prop_partition_covers_span(start_offset in 0i64..20_000, span in 0i64..3_000) {
            let start = day(1970, 1, 1) + Duration::days(start_offset);
            let end = start + Duration::days(span);
            let windows = Window::partition(start, end);

            prop_assert!(!windows.is_empty());
            prop_assert_eq!(windows[0].from_date, start);
            prop_assert_eq!(windows[windows.len() - 1].to_date, end);

            for window in &windows {
                prop_assert!(window.from_date <= window.to_date);
                prop_assert!((window.to_date - window.from_date).num_days() <= MAX_WINDOW_DAYS);
            }
            for pair in windows.windows(2) {
                prop_assert_eq!(pair[0].to_date + Duration::days(1), pair[1].from_date);
            }
        }
    }
}
