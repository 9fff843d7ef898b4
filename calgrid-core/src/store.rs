//! In-memory event collection.
//!
//! Insertion order is kept but carries no meaning, except as the tie-break
//! for which events make it into a truncated day preview.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::error::CalGridResult;
use crate::event::{Event, EventDraft, EventId};
use crate::format::parse_storage_key;

/// Events on one day, capped for display in a small grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPreview<'a> {
    pub events: Vec<&'a Event>,
    /// How many events were left out ("+N more")
    pub overflow: usize,
}

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
    /// Highest id handed out or loaded so far
    last_id: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted events. Records that would break the
    /// store's invariants (blank title, repeated id) are dropped.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut seen = HashSet::new();
        let mut store = EventStore::new();

        for event in events {
            if event.title.trim().is_empty() {
                warn!(id = %event.id, "Dropping persisted event without a title");
                continue;
            }
            if !seen.insert(event.id) {
                warn!(id = %event.id, "Dropping persisted event with duplicate id");
                continue;
            }
            store.last_id = store.last_id.max(event.id.0);
            store.events.push(event);
        }

        store
    }

    /// Validate `draft` and append it as a new event. Nothing changes if the
    /// draft is invalid.
    pub fn create(&mut self, draft: &EventDraft, now: DateTime<Utc>) -> CalGridResult<&Event> {
        let valid = draft.validate()?;
        let id = self.next_id(now);
        let event = valid.into_event(id, now);

        debug!(%id, date = %event.date, "Created event");
        self.events.push(event);
        Ok(&self.events[self.events.len() - 1])
    }

    /// Remove the event with `id`. Returns false if there was none.
    pub fn delete(&mut self, id: EventId) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        let removed = self.events.len() != before;

        if removed {
            debug!(%id, "Deleted event");
        }
        removed
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events on `date`, in insertion order.
    pub fn query_by_date(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    /// Same as [`query_by_date`](Self::query_by_date) for a `YYYY-MM-DD` key.
    /// A malformed key matches nothing.
    pub fn query_by_key(&self, key: &str) -> Vec<&Event> {
        match parse_storage_key(key) {
            Ok(date) => self.query_by_date(date),
            Err(_) => Vec::new(),
        }
    }

    /// At most `limit` events on `date`, plus the count of those omitted.
    pub fn query_truncated(&self, date: NaiveDate, limit: usize) -> DayPreview<'_> {
        let mut events = self.query_by_date(date);
        let overflow = events.len().saturating_sub(limit);
        events.truncate(limit);
        DayPreview { events, overflow }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The whole collection, for a full overwrite of the persisted copy.
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.clone()
    }

    /// Millisecond timestamps, bumped past the last issued id when the clock
    /// hasn't moved (or moved backwards).
    fn next_id(&mut self, now: DateTime<Utc>) -> EventId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id.saturating_add(1));
        self.last_id = id;
        EventId(id)
    }
}
