//! Date range for filtering events.

use chrono::{Days, NaiveDate};

/// Inclusive date range for filtering events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        DateRange {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Range covering every date.
    pub fn all() -> Self {
        DateRange::default()
    }

    /// Parse command-line bounds into a DateRange.
    /// - `from`: "start" for unbounded, or YYYY-MM-DD; defaults to `today`
    /// - `to`: YYYY-MM-DD; defaults to `today + default_days`
    pub fn from_args(
        from: Option<&str>,
        to: Option<&str>,
        default_days: u64,
        today: NaiveDate,
    ) -> Result<Self, String> {
        let from = match from {
            Some("start") => None,
            Some(s) => Some(parse_date(s)?),
            None => Some(today),
        };

        let to = match to {
            Some(s) => Some(parse_date(s)?),
            None => today.checked_add_days(Days::new(default_days)),
        };

        Ok(DateRange { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}
