use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::time::TimeOfDay;

pub const DAYS_PER_WEEK: u8 = 7;

/// Returns the day index unchanged if it lies in `0..=6` (0 = Sunday).
pub fn ensure_day(day: u8) -> AppResult<u8> {
    if day < DAYS_PER_WEEK {
        Ok(day)
    } else {
        Err(AppError::invalid_event(format!(
            "day must be between 0 and 6, got {day}"
        )))
    }
}

/// Opaque identifier assigned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(value: impl Into<String>) -> Self {
        EventId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        EventId::new(value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Class,
    Meeting,
    Exam,
    Lab,
    Seminar,
    Break,
    Personal,
    Event,
}

impl EventCategory {
    pub const ALL: [EventCategory; 8] = [
        EventCategory::Class,
        EventCategory::Meeting,
        EventCategory::Exam,
        EventCategory::Lab,
        EventCategory::Seminar,
        EventCategory::Break,
        EventCategory::Personal,
        EventCategory::Event,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Class => "class",
            EventCategory::Meeting => "meeting",
            EventCategory::Exam => "exam",
            EventCategory::Lab => "lab",
            EventCategory::Seminar => "seminar",
            EventCategory::Break => "break",
            EventCategory::Personal => "personal",
            EventCategory::Event => "event",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EventCategory {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        EventCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| format!("unsupported event category: {value}"))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EventPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl EventPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventPriority::Low => "low",
            EventPriority::Medium => "medium",
            EventPriority::High => "high",
            EventPriority::Urgent => "urgent",
        }
    }

    /// Pinned events are never proposed for automatic relocation.
    pub fn is_pinned(&self) -> bool {
        matches!(self, EventPriority::High | EventPriority::Urgent)
    }
}

impl Default for EventPriority {
    fn default() -> Self {
        EventPriority::Medium
    }
}

impl fmt::Display for EventPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EventPriority {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "low" => Ok(EventPriority::Low),
            "medium" => Ok(EventPriority::Medium),
            "high" => Ok(EventPriority::High),
            "urgent" => Ok(EventPriority::Urgent),
            other => Err(format!("unsupported event priority: {other}")),
        }
    }
}

/// Wire shape of an event. Converting it into an [`Event`] runs validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default)]
    pub id: Option<EventId>,
    pub title: String,
    pub day: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub category: EventCategory,
    #[serde(default)]
    pub priority: EventPriority,
    #[serde(default)]
    pub location: Option<String>,
}

/// A single placement on the weekly grid.
///
/// Invariants: `day` is in `0..=6` and `start_time < end_time`. Both are
/// checked on every construction path, including deserialization, so the
/// scheduling services never see an invalid event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "EventRecord", into = "EventRecord")]
pub struct Event {
    id: Option<EventId>,
    title: String,
    day: u8,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    category: EventCategory,
    priority: EventPriority,
    location: Option<String>,
}

impl Event {
    /// Creates an unpersisted class with medium priority.
    pub fn new(
        title: impl Into<String>,
        day: u8,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> AppResult<Self> {
        ensure_placement(day, start_time, end_time)?;
        Ok(Self {
            id: None,
            title: title.into(),
            day,
            start_time,
            end_time,
            category: EventCategory::Class,
            priority: EventPriority::default(),
            location: None,
        })
    }

    pub fn with_id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_category(mut self, category: EventCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: EventPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns a copy placed at a new slot; the original is left untouched.
    pub fn with_placement(
        &self,
        day: u8,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> AppResult<Self> {
        ensure_placement(day, start_time, end_time)?;
        Ok(Self {
            day,
            start_time,
            end_time,
            ..self.clone()
        })
    }

    pub fn id(&self) -> Option<&EventId> {
        self.id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn start_time(&self) -> TimeOfDay {
        self.start_time
    }

    pub fn end_time(&self) -> TimeOfDay {
        self.end_time
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end_time.minutes() - self.start_time.minutes()
    }

    pub fn category(&self) -> EventCategory {
        self.category
    }

    pub fn priority(&self) -> EventPriority {
        self.priority
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// True when this event carries the given id.
    pub fn has_id(&self, id: &EventId) -> bool {
        self.id.as_ref() == Some(id)
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = AppError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        ensure_placement(record.day, record.start_time, record.end_time)?;
        Ok(Self {
            id: record.id,
            title: record.title,
            day: record.day,
            start_time: record.start_time,
            end_time: record.end_time,
            category: record.category,
            priority: record.priority,
            location: record.location,
        })
    }
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        EventRecord {
            id: event.id,
            title: event.title,
            day: event.day,
            start_time: event.start_time,
            end_time: event.end_time,
            category: event.category,
            priority: event.priority,
            location: event.location,
        }
    }
}

fn ensure_placement(day: u8, start_time: TimeOfDay, end_time: TimeOfDay) -> AppResult<()> {
    ensure_day(day)?;
    if start_time >= end_time {
        return Err(AppError::invalid_event(format!(
            "start time {start_time} must be earlier than end time {end_time}"
        )));
    }
    Ok(())
}
