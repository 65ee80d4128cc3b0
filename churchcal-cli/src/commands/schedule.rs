use anyhow::Result;
use churchcal_core::Month;
use churchcal_core::store::EventStore;
use churchcal_core::view::{MonthView, ViewOptions};

use crate::render::{render_diagnostics, render_schedule};

pub async fn run<S: EventStore>(store: &S, month: Month, options: &ViewOptions) -> Result<()> {
    let events = store.list_events().await?;
    let categories = store.list_categories().await?;

    // The grid is not printed, so there is no "today" to highlight.
    let view = MonthView::build(month, events, &categories, options, month.first_day());

    println!(
        "{}",
        render_schedule(&view.month.label(), &view.schedule, false, "No events this month")
    );

    if let Some(warnings) = render_diagnostics(&view.diagnostics) {
        eprintln!();
        eprintln!("{warnings}");
    }

    Ok(())
}
