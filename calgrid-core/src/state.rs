//! View state and the reducer that drives it.
//!
//! `CalendarState::update` is the only way state changes. It never talks to
//! storage; it returns the writes it wants as [`Effect`]s and the session
//! carries them out.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::CalGridResult;
use crate::event::{Event, EventDraft, EventId};
use crate::grid::Month;
use crate::storage::{EVENTS_KEY, THEME_KEY, VIEW_MODE_KEY};
use crate::store::EventStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Month calendar
    #[default]
    Grid,
    /// Day-by-day agenda
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(format!("Unknown view mode '{other}'. Expected grid or list")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn toggled(&self) -> Self {
        Theme::from_dark(!self.is_dark())
    }
}

/// Per-session UI state. Only `view_mode` and `theme` outlive the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub month: Month,
    pub selected: Option<NaiveDate>,
    pub view_mode: ViewMode,
    pub theme: Theme,
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        ViewState {
            month: Month::of(today),
            selected: None,
            view_mode: ViewMode::default(),
            theme: Theme::default(),
        }
    }
}

/// Everything the presentation layer can ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Create(EventDraft),
    Delete(EventId),
    /// Move the month cursor by this many months
    Navigate(i32),
    /// Move the month cursor to the month containing this date
    JumpTo(NaiveDate),
    SelectDate(NaiveDate),
    ClearSelection,
    ToggleTheme,
    SetViewMode(ViewMode),
}

/// A durable write requested by [`CalendarState::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Full overwrite of the stored collection
    PersistEvents(Vec<Event>),
    PersistTheme(Theme),
    PersistViewMode(ViewMode),
}

impl Effect {
    pub fn key(&self) -> &'static str {
        match self {
            Effect::PersistEvents(_) => EVENTS_KEY,
            Effect::PersistTheme(_) => THEME_KEY,
            Effect::PersistViewMode(_) => VIEW_MODE_KEY,
        }
    }

    /// The stored value for this write.
    pub fn encode(&self) -> CalGridResult<String> {
        match self {
            Effect::PersistEvents(events) => Ok(serde_json::to_string(events)?),
            Effect::PersistTheme(theme) => Ok(serde_json::to_string(&theme.is_dark())?),
            // Stored bare, not as a JSON string
            Effect::PersistViewMode(mode) => Ok(mode.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    pub events: EventStore,
    pub view: ViewState,
}

impl CalendarState {
    pub fn new(events: EventStore, view: ViewState) -> Self {
        CalendarState { events, view }
    }

    /// Apply `intent`. On error the state is left exactly as it was.
    pub fn update(&mut self, intent: Intent, now: DateTime<Utc>) -> CalGridResult<Vec<Effect>> {
        let effects = match intent {
            Intent::Create(draft) => {
                self.events.create(&draft, now)?;
                vec![self.persist_events()]
            }
            Intent::Delete(id) => {
                self.events.delete(id);
                self.view.selected = None;
                vec![self.persist_events()]
            }
            Intent::Navigate(delta) => {
                self.view.month = self.view.month.shift(delta);
                vec![]
            }
            Intent::JumpTo(today) => {
                self.view.month = Month::of(today);
                vec![]
            }
            Intent::SelectDate(date) => {
                self.view.selected = Some(date);
                vec![]
            }
            Intent::ClearSelection => {
                self.view.selected = None;
                vec![]
            }
            Intent::ToggleTheme => {
                self.view.theme = self.view.theme.toggled();
                vec![Effect::PersistTheme(self.view.theme)]
            }
            Intent::SetViewMode(mode) => {
                self.view.view_mode = mode;
                vec![Effect::PersistViewMode(mode)]
            }
        };

        Ok(effects)
    }

    /// Draft for the create form, pre-filled with the selected date if any.
    pub fn new_draft(&self) -> EventDraft {
        self.view
            .selected
            .map(EventDraft::for_date)
            .unwrap_or_default()
    }

    fn persist_events(&self) -> Effect {
        Effect::PersistEvents(self.events.snapshot())
    }
}

impl From<ViewMode> for Intent {
    fn from(mode: ViewMode) -> Self {
        Intent::SetViewMode(mode)
    }
}
