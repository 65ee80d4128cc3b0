use anyhow::Result;
use chrono::NaiveDate;
use churchcal_core::Month;
use churchcal_core::store::EventStore;
use churchcal_core::view::{MonthView, ViewOptions};
use owo_colors::OwoColorize;

use crate::render::{Render, render_diagnostics, render_schedule};

pub async fn run<S: EventStore>(
    store: &S,
    month: Month,
    options: &ViewOptions,
    today: NaiveDate,
) -> Result<()> {
    let events = store.list_events().await?;
    let categories = store.list_categories().await?;

    let view = MonthView::build(month, events, &categories, options, today);

    println!("{}", view.render());
    println!();
    println!(
        "{}",
        render_schedule("Detailed schedule", &view.schedule, false, "No events this month")
    );

    let nav: Vec<String> = [
        month.prev().map(|m| format!("previous: churchcal month {m}")),
        month.next().map(|m| format!("next: churchcal month {m}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    println!();
    println!("{}", nav.join("  ·  ").dimmed());

    if let Some(warnings) = render_diagnostics(&view.diagnostics) {
        eprintln!();
        eprintln!("{warnings}");
    }

    Ok(())
}
