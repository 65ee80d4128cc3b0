//! Records excluded or degraded while building calendar views.
//!
//! Projection never fails as a whole. An event whose start date cannot be
//! parsed is left out of every bucket and reported here; an event naming an
//! unknown category is still shown, with the fallback tag, and reported here.

use std::fmt;

use crate::error::ChurchCalError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    MalformedDate {
        event_id: String,
        value: String,
        reason: String,
    },
    UnresolvedCategory {
        event_id: String,
        category_id: String,
    },
}

impl Diagnostic {
    pub fn event_id(&self) -> &str {
        match self {
            Diagnostic::MalformedDate { event_id, .. } => event_id,
            Diagnostic::UnresolvedCategory { event_id, .. } => event_id,
        }
    }

    /// Whether the event was left out of the view entirely.
    pub fn is_exclusion(&self) -> bool {
        matches!(self, Diagnostic::MalformedDate { .. })
    }

    /// Converts a projection error into its diagnostic, if it has one.
    pub fn from_error(err: ChurchCalError) -> Option<Self> {
        match err {
            ChurchCalError::MalformedDate {
                event_id,
                value,
                reason,
            } => Some(Diagnostic::MalformedDate {
                event_id,
                value,
                reason,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedDate {
                event_id,
                value,
                reason,
            } => write!(
                f,
                "event '{event_id}' skipped: start date '{value}' is not a date ({reason})"
            ),
            Diagnostic::UnresolvedCategory {
                event_id,
                category_id,
            } => write!(
                f,
                "event '{event_id}' references unknown category '{category_id}'"
            ),
        }
    }
}
