//! Key-value persistence.
//!
//! The core never touches a storage backend directly. The session reads the
//! keys below once at startup and writes them back through a `KeyValueStore`.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::CalGridResult;

/// JSON array of every event
pub const EVENTS_KEY: &str = "calendarEvents";
/// JSON boolean, true = dark
pub const THEME_KEY: &str = "calendarTheme";
/// Plain string, `grid` or `list`
pub const VIEW_MODE_KEY: &str = "calendarViewMode";

/// A string blob store. An absent key is `Ok(None)`, not an error.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> CalGridResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> CalGridResult<()>;
}
