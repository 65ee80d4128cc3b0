use anyhow::Result;
use churchcal_core::store::EventStore;
use owo_colors::OwoColorize;

use crate::render::{parse_hex_color, swatch};

pub async fn list<S: EventStore>(store: &S) -> Result<()> {
    let categories = store.list_categories().await?;

    if categories.is_empty() {
        println!("{}", "No categories yet".dimmed());
        println!("{}", "Add one with: churchcal categories add <name> <color>".dimmed());
        return Ok(());
    }

    for category in &categories {
        println!(
            "{} {:<24} {:<10} {}",
            swatch(&category.color),
            category.name.bold(),
            category.color,
            category.id.dimmed()
        );
    }

    Ok(())
}

pub async fn add<S: EventStore>(store: &S, name: &str, color: &str) -> Result<()> {
    if parse_hex_color(color).is_none() {
        anyhow::bail!("Invalid color '{}'. Expected #rgb or #rrggbb", color);
    }

    let category = store.add_category(name, color).await?;
    println!("{}", format!("  Added category: {}", category.name).green());
    println!("  {}", category.id.dimmed());

    Ok(())
}
