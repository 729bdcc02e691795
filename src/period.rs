use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Inclusive date range a roster is shown for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ApiError> {
        if end < start {
            return Err(ApiError::Validation(format!(
                "period end {} is before start {}",
                end, start
            )));
        }
        Ok(Period { start, end })
    }

    /// Monday to Sunday of the week containing `day`.
    pub fn week_of(day: NaiveDate) -> Self {
        let offset = day.weekday().num_days_from_monday() as i64;
        let start = day - Duration::days(offset);
        Period {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn current_week() -> Self {
        Self::week_of(chrono::Local::now().date_naive())
    }

    /// Parses optional ISO dates; a missing bound defaults to the current week's.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self, ApiError> {
        let week = Self::current_week();
        let start = match start {
            Some(raw) => parse_date(raw)?,
            None => week.start,
        };
        let end = match end {
            Some(raw) => parse_date(raw)?,
            None if start > week.end => Self::week_of(start).end,
            None => week.end,
        };
        Self::new(start, end)
    }

    /// Number of days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Query parameters the backend expects for range-scoped reads.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start", self.start.format("%Y-%m-%d").to_string()),
            ("end", self.end.format("%Y-%m-%d").to_string()),
        ]
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::Validation(format!("'{}' is not a date (YYYY-MM-DD)", raw.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2026-10-21 is a Wednesday
        let week = Period::week_of(date(2026, 10, 21));
        assert_eq!(week.start, date(2026, 10, 19));
        assert_eq!(week.end, date(2026, 10, 25));
        assert_eq!(week.days(), 7);
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(matches!(
            Period::new(date(2026, 1, 2), date(2026, 1, 1)),
            Err(ApiError::Validation(_))
        ));
        assert_eq!(Period::new(date(2026, 1, 1), date(2026, 1, 1)).unwrap().days(), 1);
    }

    #[test]
    fn explicit_bounds_and_query() {
        let period = Period::from_bounds(Some("2026-03-01"), Some("2026-03-07")).unwrap();
        assert_eq!(
            period.query(),
            vec![("start", "2026-03-01".to_string()), ("end", "2026-03-07".to_string())]
        );
        assert!(Period::from_bounds(Some("March 1st"), None).is_err());
    }
}
