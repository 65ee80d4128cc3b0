//! Event and category storage.
//!
//! `EventStore` is the seam to whatever holds the records: a hosted
//! database, or the JSON files of [`FileStore`]. Every operation is a single
//! request; callers re-fetch the full list after a mutation.

mod file;

pub use file::FileStore;

use std::future::Future;

use crate::category::Category;
use crate::error::ChurchCalResult;
use crate::event::{Event, NewEvent};

pub trait EventStore {
    /// All events, with their category joined where it resolves.
    fn list_events(&self) -> impl Future<Output = ChurchCalResult<Vec<Event>>> + Send;

    fn list_categories(&self) -> impl Future<Output = ChurchCalResult<Vec<Category>>> + Send;

    /// Persist a new event. Its start date is stored at midday UTC.
    fn create_event(&self, event: NewEvent) -> impl Future<Output = ChurchCalResult<Event>> + Send;

    /// Replace the title, date and category of an existing event.
    fn update_event(
        &self,
        id: &str,
        event: NewEvent,
    ) -> impl Future<Output = ChurchCalResult<Event>> + Send;

    fn delete_event(&self, id: &str) -> impl Future<Output = ChurchCalResult<()>> + Send;

    /// Append a category. Categories are never edited or removed.
    fn add_category(
        &self,
        name: &str,
        color: &str,
    ) -> impl Future<Output = ChurchCalResult<Category>> + Send;
}
