//! Inclusive date range for one export batch

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive `[start, end]` range of calendar dates
///
/// # Examples
///
/// ```
/// use shipex::domain::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
/// ).unwrap();
///
/// let widened = range.widened(30);
/// assert_eq!(widened.start, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
/// assert_eq!(widened.end, range.end);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included
    pub start: NaiveDate,

    /// Last day included
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err(format!(
                "Date range start {start} is after end {end}"
            ));
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> Result<Self, String> {
        let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
            .map_err(|e| format!("Invalid start date '{start}': {e}"))?;
        let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")
            .map_err(|e| format!("Invalid end date '{end}': {e}"))?;
        Self::new(start, end)
    }

    /// The same range with `start` moved `lookback_days` earlier
    pub fn widened(&self, lookback_days: i64) -> Self {
        Self {
            start: self.start - Duration::days(lookback_days.max(0)),
            end: self.end,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
