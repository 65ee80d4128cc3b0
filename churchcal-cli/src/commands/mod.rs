pub mod add;
pub mod categories;
pub mod delete;
pub mod edit;
pub mod month;
pub mod schedule;
pub mod year;

use anyhow::Result;
use churchcal_core::Event;
use churchcal_core::store::EventStore;

/// Fetch an event by id, with a helpful error if it doesn't exist.
pub async fn find_event<S: EventStore>(store: &S, id: &str) -> Result<Event> {
    let events = store.list_events().await?;
    events
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| anyhow::anyhow!("Event '{}' not found", id))
}
