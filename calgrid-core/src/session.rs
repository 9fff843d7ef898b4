//! A running calendar: state plus the store it is persisted to.
//!
//! Storage is best-effort. Anything unreadable at startup falls back to its
//! default and failed writes are logged; the in-memory state stays
//! authoritative for the rest of the session either way.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, error, warn};

use crate::error::CalGridResult;
use crate::event::Event;
use crate::state::{CalendarState, Effect, Intent, Theme, ViewMode, ViewState};
use crate::storage::{EVENTS_KEY, KeyValueStore, THEME_KEY, VIEW_MODE_KEY};
use crate::store::EventStore;
use crate::view::{DayView, GridView, ListView};

pub struct Session<S> {
    state: CalendarState,
    store: S,
    today: NaiveDate,
}

impl<S: KeyValueStore> Session<S> {
    /// Load persisted events, theme and view mode from `store`. The month
    /// cursor starts on `today`.
    pub fn open(store: S, today: NaiveDate) -> Self {
        let events = load_events(&store);
        let mut view = ViewState::new(today);
        view.theme = load_theme(&store);
        view.view_mode = load_view_mode(&store);

        debug!(
            events = events.len(),
            theme = ?view.theme,
            view_mode = %view.view_mode,
            "Opened session"
        );

        Session {
            state: CalendarState::new(events, view),
            store,
            today,
        }
    }

    pub fn dispatch(&mut self, intent: Intent) -> CalGridResult<()> {
        self.dispatch_at(intent, Utc::now())
    }

    /// Apply `intent` as of `now`, then write out whatever it changed.
    /// Only validation errors are returned.
    pub fn dispatch_at(&mut self, intent: Intent, now: DateTime<Utc>) -> CalGridResult<()> {
        let effects = self.state.update(intent, now)?;
        for effect in &effects {
            self.persist(effect);
        }
        Ok(())
    }

    fn persist(&mut self, effect: &Effect) {
        let key = effect.key();
        let result = effect
            .encode()
            .and_then(|value| self.store.set(key, &value));

        if let Err(e) = result {
            error!(key, error = %e, "Failed to persist change, keeping it in memory only");
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn grid_view(&self, preview_limit: usize) -> GridView {
        GridView::build(&self.state, self.today, preview_limit)
    }

    pub fn list_view(&self) -> ListView {
        ListView::build(&self.state)
    }

    pub fn day_view(&self, date: NaiveDate) -> DayView {
        DayView::build(&self.state.events, date)
    }
}

/// Parse a stored `calendarEvents` blob. Individual records that don't
/// parse are skipped; a blob that isn't a JSON array is an error.
pub fn decode_events(raw: &str) -> CalGridResult<Vec<Event>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;

    let events = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Event>(value) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable stored event");
                None
            }
        })
        .collect();

    Ok(events)
}

fn read<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Could not read stored value, using default");
            None
        }
    }
}

fn load_events<S: KeyValueStore>(store: &S) -> EventStore {
    let Some(raw) = read(store, EVENTS_KEY) else {
        return EventStore::new();
    };

    match decode_events(&raw) {
        Ok(events) => EventStore::from_events(events),
        Err(e) => {
            warn!(key = EVENTS_KEY, error = %e, "Stored events are malformed, starting empty");
            EventStore::new()
        }
    }
}

fn load_theme<S: KeyValueStore>(store: &S) -> Theme {
    let Some(raw) = read(store, THEME_KEY) else {
        return Theme::default();
    };

    match serde_json::from_str::<bool>(&raw) {
        Ok(dark) => Theme::from_dark(dark),
        Err(e) => {
            warn!(key = THEME_KEY, error = %e, "Stored theme is malformed, using light");
            Theme::default()
        }
    }
}

fn load_view_mode<S: KeyValueStore>(store: &S) -> ViewMode {
    let Some(raw) = read(store, VIEW_MODE_KEY) else {
        return ViewMode::default();
    };

    raw.parse().unwrap_or_else(|e: String| {
        warn!(key = VIEW_MODE_KEY, error = %e, "Stored view mode is malformed, using grid");
        ViewMode::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CalGridError, ValidationError};
    use crate::event::{EventDraft, EventId};
    use crate::grid::Month;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    /// Reads work, every write fails.
    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> CalGridResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> CalGridResult<()> {
            Err(CalGridError::Storage("quota exceeded".into()))
        }
    }

    /// Every read fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> CalGridResult<Option<String>> {
            Err(CalGridError::Storage(format!("cannot read {key}")))
        }

        fn set(&mut self, _key: &str, _value: &str) -> CalGridResult<()> {
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_store_gives_defaults() {
        let session = Session::open(MemoryStore::new(), today());
        let view = &session.state().view;

        assert!(session.state().events.is_empty());
        assert_eq!(view.theme, Theme::Light);
        assert_eq!(view.view_mode, ViewMode::Grid);
        assert_eq!(view.month, Month::new(2024, 3).unwrap());
        assert_eq!(view.selected, None);
    }

    #[test]
    fn test_loads_stored_camel_case_records() {
        let store = MemoryStore::with_entries([
            (
                EVENTS_KEY,
                r#"[{"id":1709629200000,"title":"Standup","date":"2024-03-05","time":"09:30",
                    "description":"","location":"","createdAt":"2024-03-01T08:00:00.000Z"}]"#,
            ),
            (THEME_KEY, "true"),
            (VIEW_MODE_KEY, "list"),
        ]);

        let session = Session::open(store, today());
        let state = session.state();

        assert_eq!(state.events.len(), 1);
        assert_eq!(state.view.theme, Theme::Dark);
        assert_eq!(state.view.view_mode, ViewMode::List);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let store = MemoryStore::with_entries([
            (EVENTS_KEY, "{not json"),
            (THEME_KEY, "\"nope\""),
            (VIEW_MODE_KEY, "calendar"),
        ]);

        let session = Session::open(store, today());
        let view = &session.state().view;

        assert!(session.state().events.is_empty());
        assert_eq!(view.theme, Theme::Light);
        assert_eq!(view.view_mode, ViewMode::Grid);
    }

    #[test]
    fn test_read_failures_fall_back() {
        let session = Session::open(BrokenStore, today());
        assert!(session.state().events.is_empty());
        assert_eq!(session.state().view.theme, Theme::Light);
    }

    #[test]
    fn test_decode_skips_bad_records() {
        let raw = r#"[
            {"id": 1, "title": "Good", "date": "2024-03-05"},
            {"id": 2, "title": "Bad date", "date": ""},
            {"id": 3, "title": "Also good", "date": "2024-03-06", "time": "14:00"}
        ]"#;

        let titles: Vec<_> = decode_events(raw)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Good", "Also good"]);
        assert!(decode_events(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn test_lenient_records_survive_the_next_write() {
        let store = MemoryStore::with_entries([(
            EVENTS_KEY,
            r#"[
                {"id": 1, "title": "With seconds", "date": "2024-03-05", "time": "09:30:00"},
                {"id": 2, "title": "No timestamp", "date": "2024-03-06", "createdAt": ""}
            ]"#,
        )]);

        let mut session = Session::open(store, today());
        assert_eq!(session.state().events.len(), 2);

        session
            .dispatch_at(Intent::Create(EventDraft::new("New", "2024-03-07")), now())
            .unwrap();

        let stored = decode_events(session.store().raw(EVENTS_KEY).unwrap()).unwrap();
        let ids: Vec<_> = stored.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(&ids[..2], &[EventId(1), EventId(2)]);
        assert_eq!(stored[0].time, chrono::NaiveTime::from_hms_opt(9, 30, 0));
    }

    #[test]
    fn test_mutations_are_written_through() {
        let mut session = Session::open(MemoryStore::new(), today());

        session
            .dispatch_at(Intent::Create(EventDraft::new("Standup", "2024-03-05")), now())
            .unwrap();
        session.dispatch_at(Intent::ToggleTheme, now()).unwrap();
        session
            .dispatch_at(Intent::SetViewMode(ViewMode::List), now())
            .unwrap();

        let store = session.store();
        let stored = decode_events(store.raw(EVENTS_KEY).unwrap()).unwrap();
        assert_eq!(stored, session.state().events.snapshot());
        assert_eq!(store.raw(THEME_KEY), Some("true"));
        assert_eq!(store.raw(VIEW_MODE_KEY), Some("list"));

        // A second session picks everything back up
        let reopened = Session::open(store.clone(), today());
        assert_eq!(reopened.state().events.snapshot(), stored);
        assert_eq!(reopened.state().view.theme, Theme::Dark);
        assert_eq!(reopened.state().view.view_mode, ViewMode::List);
    }

    #[test]
    fn test_navigation_is_not_persisted() {
        let mut session = Session::open(MemoryStore::new(), today());
        session.dispatch_at(Intent::Navigate(-3), now()).unwrap();
        session.dispatch_at(Intent::SelectDate(today()), now()).unwrap();

        assert_eq!(session.state().view.month, Month::new(2023, 12).unwrap());
        assert!(session.store().raw(EVENTS_KEY).is_none());
        assert!(session.store().raw(THEME_KEY).is_none());
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let mut session = Session::open(ReadOnlyStore::default(), today());

        session
            .dispatch_at(Intent::Create(EventDraft::new("Standup", "2024-03-05")), now())
            .unwrap();
        session.dispatch_at(Intent::ToggleTheme, now()).unwrap();

        assert_eq!(session.state().events.len(), 1);
        assert_eq!(session.state().view.theme, Theme::Dark);
    }

    #[test]
    fn test_validation_errors_reach_the_caller() {
        let mut session = Session::open(MemoryStore::new(), today());
        let err = session
            .dispatch_at(Intent::Create(EventDraft::new("Standup", "")), now())
            .unwrap_err();

        assert!(matches!(err, CalGridError::Validation(ValidationError::EmptyDate)));
        assert!(session.store().raw(EVENTS_KEY).is_none());
    }
}
