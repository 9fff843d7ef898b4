//! Calendar event types.
//!
//! `Event` is the only persisted record, stored as a JSON array under
//! `calendarEvents`. Fields are camelCase and empty strings read as absent.
//! Loading is lenient: `time` may carry seconds and an unreadable
//! `createdAt` falls back to the epoch.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::format::{format_time, parse_storage_key, parse_time, storage_key};

/// Event identifier. Millisecond-timestamp shaped, unique within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EventId)
    }
}

/// A calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Partition key for every date query
    pub date: NaiveDate,
    /// None means all-day
    #[serde(default, with = "hhmm", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Informational only
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn is_all_day(&self) -> bool {
        self.time.is_none()
    }

    /// `9:30 AM`, or empty for all-day events.
    pub fn time_label(&self) -> String {
        self.time.map(format_time).unwrap_or_default()
    }

    /// Compact label for a grid cell: `9:30 AM Standup`.
    pub fn grid_label(&self) -> String {
        match self.time {
            Some(t) => format!("{} {}", format_time(t), self.title),
            None => self.title.clone(),
        }
    }

    /// Label for an agenda row: `9:30 AM - Standup`.
    pub fn list_label(&self) -> String {
        match self.time {
            Some(t) => format!("{} - {}", format_time(t), self.title),
            None => self.title.clone(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Raw input of the create-event form. Nothing here is trusted until
/// [`EventDraft::validate`] has run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        EventDraft {
            title: title.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    /// Empty form with the date pre-filled, as when creating from a day's
    /// detail panel.
    pub fn for_date(date: NaiveDate) -> Self {
        EventDraft {
            date: storage_key(date),
            ..Default::default()
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether the confirm action should be enabled. The store validates
    /// again regardless.
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty() && !self.date.trim().is_empty()
    }

    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let date = parse_storage_key(&self.date)?;

        let time = match self.time.trim() {
            "" => None,
            t => Some(parse_time(t)?),
        };

        Ok(ValidDraft {
            title: title.to_string(),
            date,
            time,
            location: non_empty(&self.location),
            description: non_empty(&self.description),
        })
    }
}

/// A draft that passed validation. Only the store turns it into an [`Event`],
/// since only the store can hand out ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl ValidDraft {
    pub(crate) fn into_event(self, id: EventId, created_at: DateTime<Utc>) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            time: self.time,
            location: self.location,
            description: self.description,
            created_at,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| s.trim().parse::<DateTime<Utc>>().ok())
        .unwrap_or_default())
}

/// `Option<NaiveTime>` as `"HH:MM"`, with `""` read as None. Reads also
/// accept `"HH:MM:SS"`.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";
    const FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveTime::parse_from_str(s, FORMAT)
                .or_else(|_| NaiveTime::parse_from_str(s, FORMAT_WITH_SECONDS))
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
