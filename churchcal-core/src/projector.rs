//! Calendar projection.
//!
//! Pure functions that turn a flat list of events into the structures a
//! calendar renders: the months of a year, the padded day grid of a month,
//! and events bucketed by day and by month. Nothing here does I/O or keeps
//! state between calls.
//!
//! Events are dated once with [`date_events`]; records whose start date
//! cannot be parsed are excluded there and reported as [`Diagnostic`]s.
//! Every other function works on [`DatedEvent`]s and is total.
//!
//! A day comes from the offset written in the timestamp. The process's
//! local timezone is never read, so the same input buckets the same way on
//! every machine.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::diagnostic::Diagnostic;
use crate::event::{DatedEvent, Event};
use crate::month::Month;

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for padding days borrowed from the adjacent months.
    pub in_current_month: bool,
    pub events: Vec<DatedEvent>,
}

/// Events falling in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    pub month: Month,
    pub events: Vec<DatedEvent>,
}

/// Result of dating a batch of events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatedEvents {
    pub events: Vec<DatedEvent>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse the start date of every event.
///
/// Events with a malformed start date are left out and reported in
/// `diagnostics`, in input order.
pub fn date_events<I>(events: I) -> DatedEvents
where
    I: IntoIterator<Item = Event>,
{
    let mut dated = DatedEvents::default();

    for event in events {
        match DatedEvent::try_from(event) {
            Ok(event) => dated.events.push(event),
            Err(err) => {
                if let Some(diagnostic) = Diagnostic::from_error(err) {
                    tracing::warn!("{diagnostic}");
                    dated.diagnostics.push(diagnostic);
                }
            }
        }
    }

    dated
}

/// January through December of `year`.
///
/// Years outside chrono's representable range yield no months.
pub fn months_of_year(year: i32) -> Vec<Month> {
    (1..=12).filter_map(|m| Month::new(year, m)).collect()
}

/// The cells of a month grid: every day of `month`, padded back to the
/// previous `week_start` and forward to the end of that week.
///
/// The result is always whole weeks of contiguous dates.
pub fn days_for_month_view(month: Month, week_start: Weekday) -> Vec<CalendarDay> {
    let (range_start, range_end) = view_range(month, week_start);

    range_start
        .iter_days()
        .take_while(|date| *date <= range_end)
        .map(|date| CalendarDay {
            date,
            in_current_month: month.contains(date),
            events: Vec::new(),
        })
        .collect()
}

/// First and last date shown in the grid for `month`.
pub fn view_range(month: Month, week_start: Weekday) -> (NaiveDate, NaiveDate) {
    let first = month.first_day();
    let last = month.last_day();
    let week_end = week_start.pred();

    let lead = days_between(week_start, first.weekday());
    let trail = days_between(last.weekday(), week_end);

    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
    let end = last.checked_add_days(Days::new(trail)).unwrap_or(last);

    (start, end)
}

/// Days to walk forward from `from` to reach `to`, in 0..7.
fn days_between(from: Weekday, to: Weekday) -> u64 {
    let from = u64::from(from.num_days_from_monday());
    let to = u64::from(to.num_days_from_monday());
    (to + 7 - from) % 7
}

/// Group events by calendar day.
///
/// Every day in `days` gets a bucket, possibly empty. Events on a day not in
/// `days` are dropped. Buckets are in chronological order.
pub fn bucket_events_by_day(
    events: &[DatedEvent],
    days: &[CalendarDay],
) -> BTreeMap<NaiveDate, Vec<DatedEvent>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<DatedEvent>> =
        days.iter().map(|day| (day.date, Vec::new())).collect();

    for event in events {
        if let Some(bucket) = buckets.get_mut(&event.date()) {
            bucket.push(event.clone());
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by(DatedEvent::chronological);
    }

    buckets
}

/// Group events by calendar month.
///
/// Every month in `months` gets a bucket, possibly empty. Events in other
/// months are dropped. Buckets are in chronological order.
pub fn bucket_events_by_month(
    events: &[DatedEvent],
    months: &[Month],
) -> BTreeMap<Month, Vec<DatedEvent>> {
    let mut buckets: BTreeMap<Month, Vec<DatedEvent>> =
        months.iter().map(|month| (*month, Vec::new())).collect();

    for event in events {
        if let Some(bucket) = buckets.get_mut(&Month::of(event.date())) {
            bucket.push(event.clone());
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by(DatedEvent::chronological);
    }

    buckets
}

/// Events in `month`, in chronological order.
pub fn filter_events_in_month(events: &[DatedEvent], month: Month) -> Vec<DatedEvent> {
    let mut in_month: Vec<DatedEvent> = events
        .iter()
        .filter(|event| month.contains(event.date()))
        .cloned()
        .collect();

    in_month.sort_by(DatedEvent::chronological);
    in_month
}

/// Events in `year`, in chronological order.
pub fn filter_events_in_year(events: &[DatedEvent], year: i32) -> Vec<DatedEvent> {
    let mut in_year: Vec<DatedEvent> = events
        .iter()
        .filter(|event| event.date().year() == year)
        .cloned()
        .collect();

    in_year.sort_by(DatedEvent::chronological);
    in_year
}

/// The month grid with each day's events filled in.
pub fn month_grid(month: Month, week_start: Weekday, events: &[DatedEvent]) -> Vec<CalendarDay> {
    let mut days = days_for_month_view(month, week_start);
    let mut buckets = bucket_events_by_day(events, &days);

    for day in &mut days {
        if let Some(bucket) = buckets.remove(&day.date) {
            day.events = bucket;
        }
    }

    days
}

/// One bucket per month of `year`, January first.
pub fn year_buckets(year: i32, events: &[DatedEvent]) -> Vec<MonthBucket> {
    bucket_events_by_month(events, &months_of_year(year))
        .into_iter()
        .map(|(month, events)| MonthBucket { month, events })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    fn make_event(id: &str, start: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            start_date: start.to_string(),
            category_id: None,
            category: None,
            description: None,
            location: None,
            end_date: None,
            team_id: None,
        }
    }

    fn dated(events: &[(&str, &str)]) -> Vec<DatedEvent> {
        let result = date_events(events.iter().map(|(id, start)| make_event(id, start)));
        assert!(result.diagnostics.is_empty());
        result.events
    }

    fn ids(events: &[DatedEvent]) -> Vec<&str> {
        events.iter().map(|e| e.event.id.as_str()).collect()
    }

    #[test]
    fn test_months_of_year() {
        let months = months_of_year(2026);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], month(2026, 1));
        assert_eq!(months[11], month(2026, 12));
        assert!(months.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_february_2026_is_exactly_four_weeks() {
        // Feb 1 2026 is a Sunday and Feb 28 a Saturday.
        let days = days_for_month_view(month(2026, 2), Weekday::Sun);
        assert_eq!(days.len(), 28);
        assert_eq!(days[0].date, date(2026, 2, 1));
        assert_eq!(days[27].date, date(2026, 2, 28));
        assert!(days.iter().all(|d| d.in_current_month));
    }

    #[test]
    fn test_month_view_pads_with_adjacent_months() {
        // March 2026 runs Sunday 1st to Tuesday 31st.
        let days = days_for_month_view(month(2026, 3), Weekday::Sun);
        assert_eq!(days.len(), 35);
        assert_eq!(days[0].date, date(2026, 3, 1));
        assert_eq!(days[34].date, date(2026, 4, 4));
        assert!(!days[31].in_current_month);

        // January 2026 starts on a Thursday.
        let days = days_for_month_view(month(2026, 1), Weekday::Sun);
        assert_eq!(days[0].date, date(2025, 12, 28));
        assert!(!days[0].in_current_month);
        assert_eq!(days[4].date, date(2026, 1, 1));
        assert!(days[4].in_current_month);
        assert_eq!(days.last().unwrap().date, date(2026, 1, 31));
    }

    #[test]
    fn test_month_view_with_monday_week_start() {
        let days = days_for_month_view(month(2026, 2), Weekday::Mon);
        assert_eq!(days[0].date, date(2026, 1, 26));
        assert_eq!(days[0].date.weekday(), Weekday::Mon);
        assert_eq!(days.last().unwrap().date, date(2026, 3, 1));
        assert_eq!(days.last().unwrap().date.weekday(), Weekday::Sun);
        assert_eq!(days.len(), 35);
    }

    #[test]
    fn test_month_view_is_whole_contiguous_weeks() {
        for week_start in [Weekday::Sun, Weekday::Mon, Weekday::Wed, Weekday::Sat] {
            for year in [2024, 2025, 2026] {
                for m in months_of_year(year) {
                    let days = days_for_month_view(m, week_start);
                    assert_eq!(days.len() % 7, 0, "{m} from {week_start}");
                    assert_eq!(days[0].date.weekday(), week_start);
                    assert!(days.windows(2).all(|w| w[0].date.succ_opt() == Some(w[1].date)));
                    assert!(days[0].date <= m.first_day());
                    assert!(days.last().unwrap().date >= m.last_day());
                    let in_month = days.iter().filter(|d| d.in_current_month).count();
                    assert_eq!(in_month as u32, m.num_days());
                }
            }
        }
    }

    #[test]
    fn test_same_day_ordered_by_start_then_id() {
        let events = dated(&[
            ("y", "2026-01-18T12:00:00Z"),
            ("x", "2026-01-18T09:00:00Z"),
            ("b", "2026-01-18T12:00:00Z"),
        ]);
        let days = days_for_month_view(month(2026, 1), Weekday::Sun);
        let buckets = bucket_events_by_day(&events, &days);

        assert_eq!(ids(&buckets[&date(2026, 1, 18)]), vec!["x", "b", "y"]);
    }

    #[test]
    fn test_midday_utc_buckets_to_written_day() {
        let events = dated(&[("1", "2026-01-18T12:00:00Z")]);
        let days = days_for_month_view(month(2026, 1), Weekday::Sun);
        let buckets = bucket_events_by_day(&events, &days);

        assert_eq!(ids(&buckets[&date(2026, 1, 18)]), vec!["1"]);
        assert!(buckets[&date(2026, 1, 17)].is_empty());
        assert!(buckets[&date(2026, 1, 19)].is_empty());
    }

    #[test]
    fn test_extreme_offsets_bucket_to_written_day() {
        // In UTC these are the 17th and the 19th.
        let events = dated(&[
            ("kiritimati", "2026-01-18T06:00:00+14:00"),
            ("baker", "2026-01-18T20:00:00-12:00"),
        ]);
        let days = days_for_month_view(month(2026, 1), Weekday::Sun);
        let buckets = bucket_events_by_day(&events, &days);

        assert_eq!(ids(&buckets[&date(2026, 1, 18)]), vec!["kiritimati", "baker"]);
        assert!(buckets[&date(2026, 1, 17)].is_empty());
        assert!(buckets[&date(2026, 1, 19)].is_empty());
    }

    #[test]
    fn test_bucket_by_day_keeps_in_range_events_once() {
        let events = dated(&[
            ("before", "2025-12-27T12:00:00Z"),
            ("pad-start", "2025-12-28T12:00:00Z"),
            ("a", "2026-01-01T12:00:00Z"),
            ("b", "2026-01-31T12:00:00Z"),
            ("after", "2026-02-01T12:00:00Z"),
        ]);
        let days = days_for_month_view(month(2026, 1), Weekday::Sun);
        let buckets = bucket_events_by_day(&events, &days);

        assert_eq!(buckets.len(), days.len());
        let mut flattened: Vec<&str> = buckets.values().flat_map(|b| ids(b)).collect();
        flattened.sort();
        assert_eq!(flattened, vec!["a", "b", "pad-start"]);
    }

    #[test]
    fn test_filter_events_in_month_scenario() {
        let events = dated(&[
            ("3", "2026-04-01T12:00:00Z"),
            ("2", "2026-03-31T12:00:00Z"),
            ("1", "2026-03-05T12:00:00Z"),
        ]);

        assert_eq!(ids(&filter_events_in_month(&events, month(2026, 3))), vec!["1", "2"]);
        assert_eq!(ids(&filter_events_in_month(&events, month(2026, 4))), vec!["3"]);
        assert!(filter_events_in_month(&events, month(2026, 5)).is_empty());
    }

    #[test]
    fn test_bucket_by_month() {
        let events = dated(&[
            ("1", "2026-03-05T12:00:00Z"),
            ("2", "2026-03-31T12:00:00Z"),
            ("3", "2026-04-01T12:00:00Z"),
            ("old", "2025-03-05T12:00:00Z"),
        ]);
        let buckets = bucket_events_by_month(&events, &months_of_year(2026));

        assert_eq!(buckets.len(), 12);
        assert_eq!(ids(&buckets[&month(2026, 3)]), vec!["1", "2"]);
        assert_eq!(ids(&buckets[&month(2026, 4)]), vec!["3"]);
        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_malformed_dates_are_excluded_and_reported() {
        let result = date_events(vec![
            make_event("good", "2026-03-05T12:00:00Z"),
            make_event("bad", "not a date"),
        ]);

        assert_eq!(ids(&result.events), vec!["good"]);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].event_id(), "bad");
        assert!(result.diagnostics[0].is_exclusion());
    }

    #[test]
    fn test_empty_input() {
        let result = date_events(Vec::new());
        assert!(result.events.is_empty());

        let grid = month_grid(month(2026, 3), Weekday::Sun, &result.events);
        assert!(grid.iter().all(|d| d.events.is_empty()));

        let buckets = year_buckets(2026, &result.events);
        assert_eq!(buckets.len(), 12);
        assert!(buckets.iter().all(|b| b.events.is_empty()));
    }

    #[test]
    fn test_projection_is_idempotent() {
        let events = dated(&[
            ("1", "2026-03-05T12:00:00Z"),
            ("2", "2026-03-05T08:00:00Z"),
            ("3", "2026-04-01T12:00:00Z"),
        ]);

        let first = month_grid(month(2026, 3), Weekday::Sun, &events);
        let second = month_grid(month(2026, 3), Weekday::Sun, &events);
        assert_eq!(first, second);

        assert_eq!(year_buckets(2026, &events), year_buckets(2026, &events));
    }

    #[test]
    fn test_month_grid_fills_padding_days() {
        let events = dated(&[("pad", "2026-04-02T12:00:00Z"), ("in", "2026-03-10T12:00:00Z")]);
        let grid = month_grid(month(2026, 3), Weekday::Sun, &events);

        let pad = grid.iter().find(|d| d.date == date(2026, 4, 2)).unwrap();
        assert!(!pad.in_current_month);
        assert_eq!(ids(&pad.events), vec!["pad"]);

        let day = grid.iter().find(|d| d.date == date(2026, 3, 10)).unwrap();
        assert_eq!(ids(&day.events), vec!["in"]);
    }

    #[test]
    fn test_filter_events_in_year() {
        let events = dated(&[
            ("next", "2027-01-01T12:00:00Z"),
            ("b", "2026-12-31T12:00:00Z"),
            ("a", "2026-01-01T12:00:00Z"),
        ]);
        assert_eq!(ids(&filter_events_in_year(&events, 2026)), vec!["a", "b"]);
    }
}
