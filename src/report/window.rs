//! # Time Window
use chrono::{DateTime, Duration, Utc};

use crate::VigilError;
use crate::client::TimeFilter;

/// Timestamp format the search API expects
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Minimum lookback the platform accepts
pub const MIN_LOOKBACK_HOURS: i64 = 1;
/// Maximum lookback the platform accepts (7 days)
pub const MAX_LOOKBACK_HOURS: i64 = 24 * 7;

/// UTC time window a report covers, ending now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window ending now, reaching back the given number of hours
    ///
    /// The lookback must be between 1 hour and 7 days.
    pub fn lookback(hours: i64) -> Result<Self, VigilError> {
        if !(MIN_LOOKBACK_HOURS..=MAX_LOOKBACK_HOURS).contains(&hours) {
            return Err(VigilError::InvalidData(format!(
                "Lookback must be between {} and {} hours, got {}",
                MIN_LOOKBACK_HOURS, MAX_LOOKBACK_HOURS, hours
            )));
        }
        let end = Utc::now();
        Ok(Self {
            start: end - Duration::hours(hours),
            end,
        })
    }

    /// Default window: the last 7 days
    pub fn last_week() -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(7),
            end,
        }
    }

    /// Window start, formatted for the search API
    pub fn start_time(&self) -> String {
        self.start.format(TIME_FORMAT).to_string()
    }

    /// Window end, formatted for the search API
    pub fn end_time(&self) -> String {
        self.end.format(TIME_FORMAT).to_string()
    }

    /// Build the search time filter for this window
    pub fn time_filter(&self) -> TimeFilter {
        TimeFilter {
            start_time: self.start_time(),
            end_time: self.end_time(),
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::last_week()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookback_bounds() {
        assert!(TimeWindow::lookback(0).is_err());
        assert!(TimeWindow::lookback(-4).is_err());
        assert!(TimeWindow::lookback(169).is_err());
        assert!(TimeWindow::lookback(1).is_ok());
        assert!(TimeWindow::lookback(168).is_ok());
    }

    #[test]
    fn test_time_format() {
        let window = TimeWindow {
            start: "2026-08-16T01:02:03Z".parse().unwrap(),
            end: "2026-08-23T01:02:03Z".parse().unwrap(),
        };
        assert_eq!(window.start_time(), "2026-08-16T01:02:03Z");
        assert_eq!(window.end_time(), "2026-08-23T01:02:03Z");

        let filter = window.time_filter();
        assert_eq!(filter.start_time, "2026-08-16T01:02:03Z");
        assert_eq!(filter.end_time, "2026-08-23T01:02:03Z");
    }

    #[test]
    fn test_default_window_spans_seven_days() {
        let window = TimeWindow::default();
        assert_eq!(window.end - window.start, Duration::days(7));
    }
}
