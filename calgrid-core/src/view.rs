//! Render-ready models derived from [`CalendarState`].
//!
//! Nothing here is stored. The presentation layer rebuilds these after every
//! dispatch and only has to lay out the strings it is given.

use chrono::{Datelike, NaiveDate};

use crate::event::{Event, EventId};
use crate::format::{WEEKDAY_LABELS, display_key, storage_key, weekday_label};
use crate::grid::{CalendarCell, month_day_list, month_grid_cells};
use crate::state::CalendarState;
use crate::store::EventStore;

/// Events shown in a grid cell before the "+N more" line.
pub const DEFAULT_PREVIEW_LIMIT: usize = 2;

const GRID_COLUMNS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    /// e.g. `March 2024`
    pub title: String,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    /// Storage key, for matching the cell back to its events
    pub key: String,
    /// `9:30 AM Standup`, first events in insertion order
    pub labels: Vec<String>,
    pub overflow: usize,
    pub is_today: bool,
    pub is_selected: bool,
}

impl DayCell {
    /// `+5 more`, when some events did not fit.
    pub fn more_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more", self.overflow))
    }
}

impl GridView {
    pub fn build(state: &CalendarState, today: NaiveDate, preview_limit: usize) -> Self {
        let month = state.view.month;

        let cells = month_grid_cells(month.first_day())
            .into_iter()
            .map(|cell| match cell {
                CalendarCell::Blank => GridCell::Blank,
                CalendarCell::Day(date) => {
                    let preview = state.events.query_truncated(date, preview_limit);
                    GridCell::Day(DayCell {
                        date,
                        day: date.day(),
                        key: storage_key(date),
                        labels: preview.events.iter().map(|e| e.grid_label()).collect(),
                        overflow: preview.overflow,
                        is_today: date == today,
                        is_selected: state.view.selected == Some(date),
                    })
                }
            })
            .collect();

        GridView {
            title: month.title(),
            weekdays: WEEKDAY_LABELS,
            cells,
        }
    }

    /// Cells split into weeks. The last week may be short.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(GRID_COLUMNS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub title: String,
    pub rows: Vec<ListRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub date: NaiveDate,
    pub day: u32,
    pub weekday: &'static str,
    /// Empty renders as "No events"
    pub entries: Vec<ListEntry>,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: EventId,
    /// `9:30 AM - Standup`
    pub label: String,
    pub location: Option<String>,
    pub timed: bool,
}

impl ListView {
    pub fn build(state: &CalendarState) -> Self {
        let month = state.view.month;

        let rows = month_day_list(month.first_day())
            .into_iter()
            .map(|date| ListRow {
                date,
                day: date.day(),
                weekday: weekday_label(date),
                entries: state
                    .events
                    .query_by_date(date)
                    .into_iter()
                    .map(|event| ListEntry {
                        id: event.id,
                        label: event.list_label(),
                        location: event.location.clone(),
                        timed: !event.is_all_day(),
                    })
                    .collect(),
                is_selected: state.view.selected == Some(date),
            })
            .collect();

        ListView {
            title: month.title(),
            rows,
        }
    }
}

/// The detail panel for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub date: NaiveDate,
    /// `Events for 05/03/2024`
    pub heading: String,
    /// `Create Event for 05/03/2024`
    pub create_label: String,
    pub events: Vec<EventDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventDetail {
    pub id: EventId,
    pub title: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl From<&Event> for EventDetail {
    fn from(event: &Event) -> Self {
        EventDetail {
            id: event.id,
            title: event.title.clone(),
            time: (!event.is_all_day()).then(|| event.time_label()),
            location: event.location.clone(),
            description: event.description.clone(),
        }
    }
}

impl DayView {
    pub fn build(events: &EventStore, date: NaiveDate) -> Self {
        let label = display_key(date);
        DayView {
            date,
            heading: format!("Events for {label}"),
            create_label: format!("Create Event for {label}"),
            events: events
                .query_by_date(date)
                .into_iter()
                .map(EventDetail::from)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;
    use crate::state::{Intent, ViewState};
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march_state() -> CalendarState {
        let mut state = CalendarState::new(EventStore::new(), ViewState::new(date(2024, 3, 10)));
        let drafts = [
            EventDraft::new("Standup", "2024-03-05").with_time("09:30"),
            EventDraft::new("Review", "2024-03-05").with_time("15:00"),
            EventDraft::new("Retro", "2024-03-05"),
            EventDraft::new("Offsite", "2024-03-20")
                .with_location("Lisbon")
                .with_description("Bring a jacket"),
            EventDraft::new("Next month", "2024-04-01"),
        ];
        for draft in drafts {
            state.update(Intent::Create(draft), now()).unwrap();
        }
        state
    }

    fn day_cell(view: &GridView, day: u32) -> &DayCell {
        view.cells
            .iter()
            .find_map(|c| match c {
                GridCell::Day(cell) if cell.day == day => Some(cell),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_grid_view_previews_and_overflow() {
        let state = march_state();
        let view = GridView::build(&state, date(2024, 3, 10), DEFAULT_PREVIEW_LIMIT);

        assert_eq!(view.title, "March 2024");
        assert_eq!(view.weekdays[0], "Sun");
        // March 2024 starts on a Friday
        assert_eq!(view.cells.len(), 5 + 31);
        assert!(matches!(view.cells[4], GridCell::Blank));

        let busy = day_cell(&view, 5);
        assert_eq!(busy.labels, vec!["9:30 AM Standup", "3:00 PM Review"]);
        assert_eq!(busy.overflow, 1);
        assert_eq!(busy.more_label().as_deref(), Some("+1 more"));

        let quiet = day_cell(&view, 6);
        assert!(quiet.labels.is_empty());
        assert_eq!(quiet.more_label(), None);

        assert!(day_cell(&view, 10).is_today);
        assert!(!day_cell(&view, 5).is_today);
    }

    #[test]
    fn test_grid_cell_key_identifies_same_events() {
        let state = march_state();
        let view = GridView::build(&state, date(2024, 3, 10), usize::MAX);

        for cell in view.cells.iter().filter_map(|c| match c {
            GridCell::Day(cell) => Some(cell),
            GridCell::Blank => None,
        }) {
            let by_key: Vec<String> = state
                .events
                .query_by_key(&cell.key)
                .iter()
                .map(|e| e.grid_label())
                .collect();
            assert_eq!(by_key, cell.labels, "{}", cell.key);
        }
    }

    #[test]
    fn test_weeks_are_seven_wide() {
        let state = march_state();
        let view = GridView::build(&state, date(2024, 3, 10), 2);
        let weeks: Vec<_> = view.weeks().collect();

        assert_eq!(weeks.len(), 6);
        assert!(weeks[..5].iter().all(|w| w.len() == 7));
        assert_eq!(weeks[5].len(), 1);
    }

    #[test]
    fn test_list_view_covers_every_day() {
        let mut state = march_state();
        state.update(Intent::SelectDate(date(2024, 3, 20)), now()).unwrap();
        let view = ListView::build(&state);

        assert_eq!(view.rows.len(), 31);
        let row = &view.rows[4];
        assert_eq!((row.day, row.weekday), (5, "Tue"));
        let labels: Vec<_> = row.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["9:30 AM - Standup", "3:00 PM - Review", "Retro"]);
        assert!(!row.entries[2].timed);

        let offsite = &view.rows[19];
        assert!(offsite.is_selected);
        assert_eq!(offsite.entries[0].location.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn test_list_view_follows_navigation() {
        let mut state = march_state();
        state.update(Intent::Navigate(1), now()).unwrap();
        let view = ListView::build(&state);

        assert_eq!(view.title, "April 2024");
        assert_eq!(view.rows.len(), 30);
        assert_eq!(view.rows[0].entries[0].label, "Next month");
    }

    #[test]
    fn test_day_view() {
        let state = march_state();
        let view = DayView::build(&state.events, date(2024, 3, 20));

        assert_eq!(view.heading, "Events for 20/03/2024");
        assert_eq!(view.create_label, "Create Event for 20/03/2024");
        assert_eq!(view.events.len(), 1);

        let detail = &view.events[0];
        assert_eq!(detail.title, "Offsite");
        assert_eq!(detail.time, None);
        assert_eq!(detail.location.as_deref(), Some("Lisbon"));
        assert_eq!(detail.description.as_deref(), Some("Bring a jacket"));

        assert!(DayView::build(&state.events, date(2024, 3, 21)).is_empty());
    }
}
