//! Categories and category resolution for events.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::event::Event;

pub const DEFAULT_FALLBACK_COLOR: &str = "#999999";

/// A category (department) used to colour and label events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// The category fields a store joins onto an event when listing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryJoin {
    pub name: String,
    pub color: String,
}

impl From<&Category> for CategoryJoin {
    fn from(category: &Category) -> Self {
        CategoryJoin {
            name: category.name.clone(),
            color: category.color.clone(),
        }
    }
}

/// Label and colour shown for events without a resolvable category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFallback {
    pub label: String,
    pub color: String,
}

impl Default for CategoryFallback {
    fn default() -> Self {
        CategoryFallback {
            label: String::new(),
            color: DEFAULT_FALLBACK_COLOR.to_string(),
        }
    }
}

/// How an event should be tagged on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCategory {
    pub label: String,
    pub color: String,
    pub is_fallback: bool,
}

/// Lookup of categories by id.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    by_id: HashMap<String, Category>,
    fallback: CategoryFallback,
}

impl CategoryIndex {
    pub fn new(categories: &[Category], fallback: CategoryFallback) -> Self {
        let by_id = categories
            .iter()
            .map(|c| (c.id.clone(), c.clone()))
            .collect();

        CategoryIndex { by_id, fallback }
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.by_id.get(id)
    }

    /// Resolve the category for an event.
    ///
    /// A join attached by the store wins; otherwise `category_id` is looked
    /// up in the index. Anything else gets the fallback.
    pub fn resolve(&self, event: &Event) -> ResolvedCategory {
        if let Some(join) = &event.category {
            return ResolvedCategory {
                label: join.name.clone(),
                color: join.color.clone(),
                is_fallback: false,
            };
        }

        match event.category_id.as_deref().and_then(|id| self.get(id)) {
            Some(category) => ResolvedCategory {
                label: category.name.clone(),
                color: category.color.clone(),
                is_fallback: false,
            },
            None => ResolvedCategory {
                label: self.fallback.label.clone(),
                color: self.fallback.color.clone(),
                is_fallback: true,
            },
        }
    }

    /// Reports an event that names a category the index does not know.
    /// Events with no category at all are not reported.
    pub fn diagnose(&self, event: &Event) -> Option<Diagnostic> {
        if event.category.is_some() {
            return None;
        }

        let category_id = event.category_id.as_deref()?;
        if self.by_id.contains_key(category_id) {
            return None;
        }

        Some(Diagnostic::UnresolvedCategory {
            event_id: event.id.clone(),
            category_id: category_id.to_string(),
        })
    }
}
