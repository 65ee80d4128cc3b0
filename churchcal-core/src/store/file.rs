//! JSON-file event store.
//!
//! Layout under the data directory:
//! - `events.json`: array of events, without category joins
//! - `categories.json`: array of categories
//!
//! Missing files read as empty. Writes replace the whole file through a
//! temporary file and a rename.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::EventStore;
use crate::category::{Category, CategoryJoin};
use crate::error::{ChurchCalError, ChurchCalResult};
use crate::event::{Event, NewEvent};

const EVENTS_FILE: &str = "events.json";
const CATEGORIES_FILE: &str = "categories.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    async fn read_records<T: DeserializeOwned>(&self, file: &str) -> ChurchCalResult<Vec<T>> {
        let path = self.dir.join(file);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            ChurchCalError::Serialization(format!("Could not read {}: {e}", path.display()))
        })
    }

    async fn write_records<T: Serialize>(&self, file: &str, records: &[T]) -> ChurchCalResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let content = serde_json::to_string_pretty(records)?;
        let path = self.dir.join(file);
        let tmp_path = self.dir.join(format!(".{file}.tmp"));

        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        Ok(())
    }

    async fn read_events(&self) -> ChurchCalResult<Vec<Event>> {
        self.read_records(EVENTS_FILE).await
    }

    async fn write_events(&self, events: &[Event]) -> ChurchCalResult<()> {
        self.write_records(EVENTS_FILE, events).await
    }

    /// Fails if `category_id` names a category that does not exist.
    async fn check_category(&self, category_id: Option<&str>) -> ChurchCalResult<()> {
        if let Some(category_id) = category_id {
            let categories: Vec<Category> = self.read_records(CATEGORIES_FILE).await?;
            if !categories.iter().any(|c| c.id == category_id) {
                return Err(ChurchCalError::CategoryNotFound(category_id.to_string()));
            }
        }

        Ok(())
    }
}

impl EventStore for FileStore {
    async fn list_events(&self) -> ChurchCalResult<Vec<Event>> {
        let mut events = self.read_events().await?;
        let categories = self.list_categories().await?;

        for event in &mut events {
            event.category = event
                .category_id
                .as_deref()
                .and_then(|id| categories.iter().find(|c| c.id == id))
                .map(CategoryJoin::from);
        }

        tracing::debug!(count = events.len(), dir = %self.dir.display(), "listed events");
        Ok(events)
    }

    async fn list_categories(&self) -> ChurchCalResult<Vec<Category>> {
        self.read_records(CATEGORIES_FILE).await
    }

    async fn create_event(&self, new: NewEvent) -> ChurchCalResult<Event> {
        new.validate()?;
        self.check_category(new.category_id.as_deref()).await?;

        let event = Event {
            id: Uuid::new_v4().to_string(),
            start_date: new.start_date(),
            title: new.title.trim().to_string(),
            category_id: new.category_id,
            category: None,
            description: None,
            location: None,
            end_date: None,
            team_id: None,
        };

        let mut events = self.read_events().await?;
        events.push(event.clone());
        self.write_events(&events).await?;

        tracing::info!(id = %event.id, start = %event.start_date, "created event");
        Ok(event)
    }

    async fn update_event(&self, id: &str, new: NewEvent) -> ChurchCalResult<Event> {
        new.validate()?;

        let mut events = self.read_events().await?;
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ChurchCalError::EventNotFound(id.to_string()))?;

        // An unresolved category kept as-is is left alone.
        if new.category_id != event.category_id {
            self.check_category(new.category_id.as_deref()).await?;
        }

        event.start_date = new.start_date();
        event.title = new.title.trim().to_string();
        event.category_id = new.category_id;
        event.category = None;
        let updated = event.clone();

        self.write_events(&events).await?;

        tracing::info!(id = %updated.id, start = %updated.start_date, "updated event");
        Ok(updated)
    }

    async fn delete_event(&self, id: &str) -> ChurchCalResult<()> {
        let mut events = self.read_events().await?;
        let before = events.len();
        events.retain(|e| e.id != id);

        if events.len() == before {
            return Err(ChurchCalError::EventNotFound(id.to_string()));
        }

        self.write_events(&events).await?;

        tracing::info!(id, "deleted event");
        Ok(())
    }

    async fn add_category(&self, name: &str, color: &str) -> ChurchCalResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChurchCalError::Validation("category name must not be empty".into()));
        }

        let mut categories = self.list_categories().await?;
        if categories.iter().any(|c| c.name.eq_ignore_ascii_case(name)) {
            return Err(ChurchCalError::Validation(format!(
                "category '{name}' already exists"
            )));
        }

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            color: color.trim().to_string(),
        };

        categories.push(category.clone());
        self.write_records(CATEGORIES_FILE, &categories).await?;

        tracing::info!(id = %category.id, name = %category.name, "added category");
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_empty_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("missing"));

        assert!(store.list_events().await.unwrap().is_empty());
        assert!(store.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_stores_midday_utc_and_joins_category() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let youth = store.add_category("Youth", "#3b82f6").await.unwrap();
        let created = store
            .create_event(NewEvent::new("Retreat", date(2026, 1, 18), Some(youth.id.clone())))
            .await
            .unwrap();
        assert_eq!(created.start_date, "2026-01-18T12:00:00Z");

        let events = store.list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, created.id);
        assert_eq!(
            events[0].category,
            Some(CategoryJoin {
                name: "Youth".to_string(),
                color: "#3b82f6".to_string(),
            })
        );

        let on_disk = std::fs::read_to_string(dir.path().join(EVENTS_FILE)).unwrap();
        assert!(!on_disk.contains("\"category\""));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let created = store
            .create_event(NewEvent::new("Culto", date(2026, 3, 1), None))
            .await
            .unwrap();

        let updated = store
            .update_event(&created.id, NewEvent::new("Culto de Ceia", date(2026, 3, 8), None))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Culto de Ceia");
        assert_eq!(updated.start_date, "2026-03-08T12:00:00Z");

        store.delete_event(&created.id).await.unwrap();
        assert!(store.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_event_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(matches!(
            store.delete_event("nope").await,
            Err(ChurchCalError::EventNotFound(_))
        ));
        assert!(matches!(
            store
                .update_event("nope", NewEvent::new("x", date(2026, 1, 1), None))
                .await,
            Err(ChurchCalError::EventNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_category_and_blank_title() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(matches!(
            store
                .create_event(NewEvent::new("Culto", date(2026, 1, 1), Some("ghost".into())))
                .await,
            Err(ChurchCalError::CategoryNotFound(_))
        ));
        assert!(matches!(
            store.create_event(NewEvent::new("", date(2026, 1, 1), None)).await,
            Err(ChurchCalError::Validation(_))
        ));
        assert!(store.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_unresolved_category() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(EVENTS_FILE),
            r#"[{"id":"e1","title":"Culto","start_date":"2026-01-18T12:00:00Z","category_id":"gone"}]"#,
        )
        .unwrap();
        let store = FileStore::new(dir.path());

        let updated = store
            .update_event(
                "e1",
                NewEvent::new("Culto de Ceia", date(2026, 1, 18), Some("gone".into())),
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Culto de Ceia");
        assert_eq!(updated.category_id.as_deref(), Some("gone"));

        assert!(matches!(
            store
                .update_event("e1", NewEvent::new("Culto", date(2026, 1, 18), Some("other".into())))
                .await,
            Err(ChurchCalError::CategoryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_category_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.add_category("Youth", "#3b82f6").await.unwrap();
        assert!(matches!(
            store.add_category("youth", "#000").await,
            Err(ChurchCalError::Validation(_))
        ));
        assert_eq!(store.list_categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reads_records_written_by_another_client() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(EVENTS_FILE),
            r#"[{"id":"e1","title":"Culto","start_date":"2026-01-18T12:00:00+00:00","category_id":"c9","location":"Templo"}]"#,
        )
        .unwrap();
        let store = FileStore::new(dir.path());

        let events = store.list_events().await.unwrap();
        assert_eq!(events[0].location.as_deref(), Some("Templo"));
        // Unknown category: no join, the view falls back.
        assert_eq!(events[0].category, None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CATEGORIES_FILE), "{not json").unwrap();
        let store = FileStore::new(dir.path());

        assert!(matches!(
            store.list_categories().await,
            Err(ChurchCalError::Serialization(_))
        ));
    }
}
