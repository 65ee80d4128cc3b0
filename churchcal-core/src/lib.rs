//! Core library for churchcal.
//!
//! - `event`, `category`, `month`: the records and calendar values
//! - `projector`: pure bucketing of events into days and months
//! - `view`: year and month views built from projector output
//! - `store`: the `EventStore` seam and a JSON-file implementation
//! - `config`: global configuration

pub mod category;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod event;
pub mod month;
pub mod projector;
pub mod store;
pub mod view;

pub use category::{Category, CategoryFallback, CategoryIndex, CategoryJoin, ResolvedCategory};
pub use diagnostic::Diagnostic;
pub use error::{ChurchCalError, ChurchCalResult};
pub use event::{DatedEvent, Event, EventStart, NewEvent};
pub use month::Month;
