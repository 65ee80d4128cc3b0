//! Display-ready views assembled from projector output.
//!
//! Each view is built from scratch from the events and categories fetched
//! for it, owns everything it shows, and carries the diagnostics produced
//! while building it.

use chrono::{DateTime, NaiveDate, Utc, Weekday};

use crate::category::{Category, CategoryFallback, CategoryIndex, ResolvedCategory};
use crate::diagnostic::Diagnostic;
use crate::event::{DatedEvent, Event};
use crate::month::Month;
use crate::projector;

/// Settings shared by all views.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub week_start: Weekday,
    pub fallback: CategoryFallback,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions {
            week_start: Weekday::Sun,
            fallback: CategoryFallback::default(),
        }
    }
}

/// An event as shown in any view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEntry {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub category: ResolvedCategory,
}

impl EventEntry {
    fn new(dated: &DatedEvent, categories: &CategoryIndex) -> Self {
        EventEntry {
            id: dated.event.id.clone(),
            title: dated.event.title.clone(),
            date: dated.start.date,
            start: dated.start.instant,
            category: categories.resolve(&dated.event),
        }
    }
}

/// One row of the printable schedule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub event_id: String,
    pub date: NaiveDate,
    pub title: String,
    pub category_label: String,
    pub color: String,
}

impl ScheduleRow {
    /// Day of month, zero padded ("05").
    pub fn day_label(&self) -> String {
        self.date.format("%d").to_string()
    }

    /// Full date as `dd/mm/yyyy`.
    pub fn date_label(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}

impl From<&EventEntry> for ScheduleRow {
    fn from(entry: &EventEntry) -> Self {
        ScheduleRow {
            event_id: entry.id.clone(),
            date: entry.date,
            title: entry.title.clone(),
            category_label: entry.category.label.clone(),
            color: entry.category.color.clone(),
        }
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub entries: Vec<EventEntry>,
}

/// A month grid plus its schedule table.
#[derive(Debug, Clone)]
pub struct MonthView {
    pub month: Month,
    pub week_start: Weekday,
    pub days: Vec<DayCell>,
    pub schedule: Vec<ScheduleRow>,
    pub diagnostics: Vec<Diagnostic>,
}

impl MonthView {
    pub fn build(
        month: Month,
        events: Vec<Event>,
        categories: &[Category],
        options: &ViewOptions,
        today: NaiveDate,
    ) -> Self {
        let index = CategoryIndex::new(categories, options.fallback.clone());
        let dated = projector::date_events(events);

        let days = projector::month_grid(month, options.week_start, &dated.events)
            .into_iter()
            .map(|day| DayCell {
                date: day.date,
                in_current_month: day.in_current_month,
                is_today: day.date == today,
                entries: day.events.iter().map(|e| EventEntry::new(e, &index)).collect(),
            })
            .collect();

        let in_month = projector::filter_events_in_month(&dated.events, month);
        let schedule = in_month
            .iter()
            .map(|e| ScheduleRow::from(&EventEntry::new(e, &index)))
            .collect();

        let mut diagnostics = dated.diagnostics;
        diagnostics.extend(in_month.iter().filter_map(|e| index.diagnose(&e.event)));

        MonthView {
            month,
            week_start: options.week_start,
            days,
            schedule,
            diagnostics,
        }
    }

    /// The grid split into rows of seven days.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.days.chunks(7)
    }

    /// Weekdays in column order.
    pub fn weekday_headers(&self) -> Vec<Weekday> {
        std::iter::successors(Some(self.week_start), |d| Some(d.succ()))
            .take(7)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}

/// Summary card for one month of the year overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSummary {
    pub month: Month,
    pub entries: Vec<EventEntry>,
}

impl MonthSummary {
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Twelve month summaries plus the schedule for the whole year.
#[derive(Debug, Clone)]
pub struct YearView {
    pub year: i32,
    pub months: Vec<MonthSummary>,
    pub schedule: Vec<ScheduleRow>,
    pub diagnostics: Vec<Diagnostic>,
}

impl YearView {
    pub fn build(year: i32, events: Vec<Event>, categories: &[Category], options: &ViewOptions) -> Self {
        let index = CategoryIndex::new(categories, options.fallback.clone());
        let dated = projector::date_events(events);

        let months: Vec<MonthSummary> = projector::year_buckets(year, &dated.events)
            .into_iter()
            .map(|bucket| MonthSummary {
                month: bucket.month,
                entries: bucket
                    .events
                    .iter()
                    .map(|e| EventEntry::new(e, &index))
                    .collect(),
            })
            .collect();

        let schedule = months
            .iter()
            .flat_map(|summary| summary.entries.iter().map(ScheduleRow::from))
            .collect();

        let mut diagnostics = dated.diagnostics;
        diagnostics.extend(
            projector::filter_events_in_year(&dated.events, year)
                .iter()
                .filter_map(|e| index.diagnose(&e.event)),
        );

        YearView {
            year,
            months,
            schedule,
            diagnostics,
        }
    }

    pub fn total_events(&self) -> usize {
        self.months.iter().map(MonthSummary::count).sum()
    }
}
