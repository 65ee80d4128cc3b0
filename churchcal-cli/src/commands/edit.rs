use anyhow::{Context, Result};
use churchcal_core::event::parse_date;
use churchcal_core::store::EventStore;
use churchcal_core::NewEvent;
use owo_colors::OwoColorize;

use super::add::find_category;
use super::find_event;

/// Change the title, date or category of an event. Fields not given keep
/// their current value; `--category ""` removes the category.
pub async fn run<S: EventStore>(
    store: &S,
    id: &str,
    title: Option<String>,
    date: Option<String>,
    category: Option<String>,
) -> Result<()> {
    if title.is_none() && date.is_none() && category.is_none() {
        anyhow::bail!("Nothing to change. Use --title, --date or --category.");
    }

    let current = find_event(store, id).await?;

    let title = title.unwrap_or_else(|| current.title.clone());

    let date = match date {
        Some(d) => parse_date(&d)?,
        None => current
            .start()
            .map(|start| start.date)
            .context("Current start date is unreadable; pass --date to fix it")?,
    };

    let category_id = match category.as_deref() {
        Some("") => None,
        Some(arg) => {
            let categories = store.list_categories().await?;
            Some(find_category(arg, &categories)?.id.clone())
        }
        None => current.category_id.clone(),
    };

    let updated = store
        .update_event(id, NewEvent::new(title, date, category_id))
        .await?;

    println!(
        "{}",
        format!("  Updated: {} on {}", updated.title, date.format("%d/%m/%Y")).yellow()
    );

    Ok(())
}
