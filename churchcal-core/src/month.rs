//! Calendar month value (year + month, no day or time component).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

use crate::error::ChurchCalError;
use crate::event::EventStart;

/// A calendar month, used as a bucketing key.
///
/// Internally this is the first day of the month, so ordering and equality
/// follow the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    /// Returns `None` if `month` is not in 1..=12 or the year is outside
    /// the supported date range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Month)
    }

    /// The month a calendar date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Month(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn num_days(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub fn next(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Month)
    }

    pub fn prev(&self) -> Option<Self> {
        self.0.checked_sub_months(Months::new(1)).map(Month)
    }

    /// Human-readable label, e.g. "March 2026".
    pub fn label(&self) -> String {
        self.0.format("%B %Y").to_string()
    }

    /// Month name only, e.g. "March".
    pub fn name(&self) -> String {
        self.0.format("%B").to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

/// Accepts `YYYY-MM`, or any full date/timestamp (its month is taken).
impl FromStr for Month {
    type Err = ChurchCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return Ok(Month(date));
        }

        EventStart::parse(s)
            .map(|start| Month::of(start.date))
            .map_err(|_| ChurchCalError::InvalidMonth(s.to_string()))
    }
}
