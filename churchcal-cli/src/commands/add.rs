use anyhow::Result;
use chrono::NaiveDate;
use churchcal_core::event::parse_date;
use churchcal_core::store::EventStore;
use churchcal_core::{Category, NewEvent};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

pub async fn run<S: EventStore>(
    store: &S,
    title: Option<String>,
    date: Option<String>,
    category: Option<String>,
) -> Result<()> {
    let interactive = title.is_none() || date.is_none();

    // --- Title ---
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Date ---
    let date = match date {
        Some(d) => parse_date(&d)?,
        None => prompt_date("  Date (YYYY-MM-DD)")?,
    };

    // --- Category ---
    let categories = store.list_categories().await?;
    let category_id = resolve_category(category.as_deref(), &categories, interactive)?;

    let event = store
        .create_event(NewEvent::new(title, date, category_id))
        .await?;

    if interactive {
        println!();
    }
    println!(
        "{}",
        format!("  Created: {} on {}", event.title, date.format("%d/%m/%Y")).green()
    );
    println!("  {}", event.id.dimmed());

    Ok(())
}

/// Prompt for a date, asking again until it parses.
pub fn prompt_date(prompt: &str) -> Result<NaiveDate> {
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse_date(&input) {
            Ok(date) => return Ok(date),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Resolve which category to tag the event with.
///
/// `arg` may be a category id or name. Without one, an interactive session
/// offers a choice and a non-interactive one leaves the event uncategorised.
pub fn resolve_category(
    arg: Option<&str>,
    categories: &[Category],
    interactive: bool,
) -> Result<Option<String>> {
    if let Some(arg) = arg {
        return find_category(arg, categories).map(|c| Some(c.id.clone()));
    }

    if !interactive || categories.is_empty() {
        return Ok(None);
    }

    let mut items: Vec<&str> = vec!["(none)"];
    items.extend(categories.iter().map(|c| c.name.as_str()));

    let selection = Select::new()
        .with_prompt("  Category")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(selection
        .checked_sub(1)
        .map(|i| categories[i].id.clone()))
}

/// Look up a category by id, or by name ignoring case.
pub fn find_category<'a>(arg: &str, categories: &'a [Category]) -> Result<&'a Category> {
    categories
        .iter()
        .find(|c| c.id == arg)
        .or_else(|| categories.iter().find(|c| c.name.eq_ignore_ascii_case(arg)))
        .ok_or_else(|| {
            let available: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
            anyhow::anyhow!(
                "Category '{}' not found. Available: {}",
                arg,
                available.join(", ")
            )
        })
}
