//! Core types for calgrid.
//!
//! This crate holds everything except the presentation layer:
//! - `grid` and `format` for month grids and date/time labels
//! - `event` and `store` for the event model and its in-memory collection
//! - `state` for the view-state reducer and the effects it emits
//! - `storage` for the key-value persistence seam
//! - `session` to tie state and storage together
//! - `calgrid_config` for the settings file
//! - `view` for render-ready models derived from state

pub mod calgrid_config;
pub mod error;
pub mod event;
pub mod format;
pub mod grid;
pub mod session;
pub mod state;
pub mod storage;
pub mod store;
pub mod view;

pub use calgrid_config::CalgridConfig;
pub use error::{CalGridError, CalGridResult, ValidationError};
pub use event::{Event, EventDraft, EventId};
pub use grid::{CalendarCell, Month};
pub use session::Session;
pub use state::{CalendarState, Effect, Intent, Theme, ViewMode, ViewState};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{DayPreview, EventStore};
