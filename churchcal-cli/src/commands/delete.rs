use anyhow::Result;
use churchcal_core::store::EventStore;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::find_event;

pub async fn run<S: EventStore>(store: &S, id: &str, yes: bool) -> Result<()> {
    let event = find_event(store, id).await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("  Delete \"{}\"?", event.title))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "  Nothing deleted".dimmed());
            return Ok(());
        }
    }

    store.delete_event(id).await?;
    println!("{}", format!("  Deleted: {}", event.title).red());

    Ok(())
}
