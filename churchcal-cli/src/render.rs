//! Terminal rendering for churchcal views.
//!
//! Category colours are hex strings chosen by users; they are shown as
//! truecolor backgrounds when they parse, and as plain text otherwise.

use churchcal_core::Diagnostic;
use churchcal_core::view::{DayCell, MonthSummary, MonthView, ScheduleRow, YearView};
use chrono::{Datelike, Weekday};
use owo_colors::OwoColorize;

/// Width of one month-grid column, without the separator.
const CELL_WIDTH: usize = 14;

/// Events listed per grid cell before collapsing into "+N more".
const MAX_EVENTS_PER_CELL: usize = 3;

/// Parse `#rgb` or `#rrggbb`.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

/// Cut `text` to at most `width` characters, marking the cut with "…".
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// `text` on a background of the category colour.
fn tag(text: &str, color: &str) -> String {
    match parse_hex_color(color) {
        Some((r, g, b)) => text.on_truecolor(r, g, b).white().bold().to_string(),
        None => text.to_string(),
    }
}

/// A coloured dot for the category colour.
pub fn swatch(color: &str) -> String {
    match parse_hex_color(color) {
        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
        None => "●".dimmed().to_string(),
    }
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

pub trait Render {
    fn render(&self) -> String;
}

impl Render for MonthSummary {
    fn render(&self) -> String {
        let count = format!("{} {}", self.count(), pluralize("event", self.count()));
        let header = format!("{:<12}{}", self.month.name(), count.dimmed());

        if self.is_empty() {
            return format!("{}\n  {}", header.bold(), "empty".dimmed());
        }

        let chips: Vec<String> = self
            .entries
            .iter()
            .map(|entry| tag(&format!(" {:02} ", entry.date.day()), &entry.category.color))
            .collect();

        format!("{}\n  {}", header.bold(), chips.join(" "))
    }
}

impl Render for YearView {
    fn render(&self) -> String {
        let mut lines = vec![format!("Calendar {}", self.year).bold().to_string(), String::new()];

        for summary in &self.months {
            lines.push(summary.render());
            lines.push(String::new());
        }

        lines.push(
            format!(
                "{} {} in {}",
                self.total_events(),
                pluralize("event", self.total_events()),
                self.year
            )
            .dimmed()
            .to_string(),
        );

        lines.join("\n")
    }
}

/// One text line of a grid cell, padded to the cell width.
fn cell_line(day: &DayCell, line: usize) -> String {
    let width = CELL_WIDTH;

    if line == 0 {
        let number = format!("{:>2}", day.date.day());
        let padded = format!("{number:<width$}");
        return if day.is_today {
            padded.blue().bold().to_string()
        } else if day.in_current_month {
            padded
        } else {
            padded.dimmed().to_string()
        };
    }

    let index = line - 1;
    let total = day.entries.len();
    let overflow = total > MAX_EVENTS_PER_CELL;

    if overflow && index == MAX_EVENTS_PER_CELL - 1 {
        let more = format!("+{} more", total - (MAX_EVENTS_PER_CELL - 1));
        return format!("{more:<width$}").dimmed().to_string();
    }

    match day.entries.get(index) {
        Some(entry) if index < MAX_EVENTS_PER_CELL => {
            let title = format!("{:<width$}", truncate(&entry.title, width));
            if day.in_current_month {
                tag(&title, &entry.category.color)
            } else {
                title.dimmed().to_string()
            }
        }
        _ => " ".repeat(width),
    }
}

/// Grid rows for one week.
fn render_week(week: &[DayCell]) -> Vec<String> {
    let busiest = week.iter().map(|d| d.entries.len()).max().unwrap_or(0);
    let event_lines = busiest.min(MAX_EVENTS_PER_CELL).max(1);

    (0..=event_lines)
        .map(|line| {
            let cells: Vec<String> = week.iter().map(|day| cell_line(day, line)).collect();
            format!("│{}│", cells.join("│"))
        })
        .collect()
}

fn rule(left: &str, mid: &str, right: &str) -> String {
    let segment = "─".repeat(CELL_WIDTH);
    format!("{left}{}{right}", vec![segment; 7].join(mid))
}

impl Render for MonthView {
    fn render(&self) -> String {
        let mut lines = vec![self.month.label().bold().to_string(), String::new()];

        let headers: Vec<String> = self
            .weekday_headers()
            .into_iter()
            .map(|day| format!("{:^width$}", weekday_label(day), width = CELL_WIDTH))
            .collect();

        lines.push(rule("┌", "┬", "┐"));
        lines.push(format!("│{}│", headers.join("│")).bold().to_string());

        for week in self.weeks() {
            lines.push(rule("├", "┼", "┤"));
            lines.extend(render_week(week));
        }
        lines.push(rule("└", "┴", "┘"));

        lines.join("\n")
    }
}

/// The schedule table. With `full_date` the first column is `dd/mm/yyyy`,
/// otherwise the day of month.
pub fn render_schedule(title: &str, rows: &[ScheduleRow], full_date: bool, empty: &str) -> String {
    let mut lines = vec![title.bold().underline().to_string()];

    if rows.is_empty() {
        lines.push(format!("  {}", empty.dimmed()));
        return lines.join("\n");
    }

    let date_width = if full_date { 10 } else { 3 };
    let title_width = rows
        .iter()
        .map(|r| r.title.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(5, 40);
    let label_width = rows
        .iter()
        .map(|r| r.category_label.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(8, 24);

    lines.push(
        format!(
            "  {:<date_width$}  {:<title_width$}    {:<label_width$}  {}",
            if full_date { "Date" } else { "Day" },
            "Event",
            "Category",
            "Id"
        )
        .dimmed()
        .to_string(),
    );

    for row in rows {
        let date = if full_date {
            row.date_label()
        } else {
            row.day_label()
        };
        let title = truncate(&row.title, title_width);
        let label = truncate(&row.category_label, label_width);

        lines.push(format!(
            "  {:<date_width$}  {:<title_width$}  {} {:<label_width$}  {}",
            date.blue().bold(),
            title.bold(),
            swatch(&row.color),
            label,
            row.event_id.dimmed()
        ));
    }

    lines.join("\n")
}

/// Warnings for records that were skipped or shown with a fallback tag.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> Option<String> {
    if diagnostics.is_empty() {
        return None;
    }

    let skipped = diagnostics.iter().filter(|d| d.is_exclusion()).count();
    let mut lines = Vec::new();

    if skipped > 0 {
        lines.push(
            format!(
                "{} {} skipped because of an unreadable date",
                skipped,
                pluralize("event", skipped)
            )
            .yellow()
            .to_string(),
        );
    }
    for diagnostic in diagnostics {
        lines.push(format!("  {}", diagnostic.to_string().dimmed()));
    }

    Some(lines.join("\n"))
}
