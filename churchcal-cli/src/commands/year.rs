use anyhow::Result;
use churchcal_core::store::EventStore;
use churchcal_core::view::{ViewOptions, YearView};

use crate::render::{Render, render_diagnostics, render_schedule};

pub async fn run<S: EventStore>(store: &S, year: i32, list: bool, options: &ViewOptions) -> Result<()> {
    let events = store.list_events().await?;
    let categories = store.list_categories().await?;

    let view = YearView::build(year, events, &categories, options);

    println!("{}", view.render());

    if list {
        println!();
        println!(
            "{}",
            render_schedule(
                &format!("Schedule {}", view.year),
                &view.schedule,
                true,
                "No events this year"
            )
        );
    }

    if let Some(warnings) = render_diagnostics(&view.diagnostics) {
        eprintln!();
        eprintln!("{warnings}");
    }

    Ok(())
}
