//! Event records and start-date interpretation.
//!
//! Events are stored with their start date recorded at midday UTC
//! (`YYYY-MM-DDT12:00:00Z`). The calendar day of an event is the date
//! component of that timestamp as written, read in the timestamp's own
//! offset, never in the local timezone of the process reading it.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, ParseError, Utc};
use serde::{Deserialize, Serialize};

use crate::category::CategoryJoin;
use crate::error::{ChurchCalError, ChurchCalResult};

/// Timestamp layouts without an offset, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A calendar event as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Start timestamp exactly as persisted.
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Category attached by the store when listing; never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryJoin>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl Event {
    /// Parse this event's start date.
    pub fn start(&self) -> ChurchCalResult<EventStart> {
        EventStart::parse(&self.start_date).map_err(|e| ChurchCalError::MalformedDate {
            event_id: self.id.clone(),
            value: self.start_date.clone(),
            reason: e.to_string(),
        })
    }
}

/// The fields a user supplies when creating or updating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub category_id: Option<String>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, date: NaiveDate, category_id: Option<String>) -> Self {
        NewEvent {
            title: title.into(),
            date,
            category_id,
        }
    }

    pub fn validate(&self) -> ChurchCalResult<()> {
        if self.title.trim().is_empty() {
            return Err(ChurchCalError::Validation("title must not be empty".into()));
        }
        Ok(())
    }

    /// The persisted start date: the chosen day at midday UTC.
    pub fn start_date(&self) -> String {
        format!("{}T12:00:00Z", self.date.format("%Y-%m-%d"))
    }
}

/// Parse a `YYYY-MM-DD` date as typed by a user.
pub fn parse_date(s: &str) -> ChurchCalResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ChurchCalError::InvalidDate(s.to_string()))
}

/// A parsed event start: the calendar day used for bucketing and the
/// instant used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStart {
    pub date: NaiveDate,
    pub instant: DateTime<Utc>,
}

impl EventStart {
    /// Accepts RFC 3339 (`2026-01-18T12:00:00Z`, `...+00:00`), timestamps
    /// without an offset (read as UTC) and bare dates (read as midday UTC).
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(EventStart {
                date: dt.date_naive(),
                instant: dt.with_timezone(&Utc),
            });
        }

        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(EventStart {
                    date: dt.date(),
                    instant: dt.and_utc(),
                });
            }
        }

        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
        Ok(EventStart {
            date,
            instant: at_midday(date).and_utc(),
        })
    }
}

fn at_midday(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0)
        .unwrap_or_else(|| date.and_time(NaiveTime::default()))
}

/// An event together with its parsed start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedEvent {
    pub event: Event,
    pub start: EventStart,
}

impl DatedEvent {
    pub fn date(&self) -> NaiveDate {
        self.start.date
    }

    /// Calendar day first, then start instant, then id.
    pub fn chronological(a: &DatedEvent, b: &DatedEvent) -> Ordering {
        a.start
            .date
            .cmp(&b.start.date)
            .then_with(|| a.start.instant.cmp(&b.start.instant))
            .then_with(|| a.event.id.cmp(&b.event.id))
    }
}

impl TryFrom<Event> for DatedEvent {
    type Error = ChurchCalError;

    fn try_from(event: Event) -> Result<Self, Self::Error> {
        let start = event.start()?;
        Ok(DatedEvent { event, start })
    }
}
