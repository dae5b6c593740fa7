use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::time::TimeOfDay;

/// Daily window the slot finder is allowed to place events in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayWindow {
    pub day_start: TimeOfDay,
    pub day_end: TimeOfDay,
}

impl DayWindow {
    pub fn new(day_start: TimeOfDay, day_end: TimeOfDay) -> AppResult<Self> {
        let window = Self { day_start, day_end };
        window.ensure_valid()?;
        Ok(window)
    }

    pub fn ensure_valid(&self) -> AppResult<()> {
        if self.day_end <= self.day_start {
            Err(AppError::validation(format!(
                "window end {} must be later than window start {}",
                self.day_end, self.day_start
            )))
        } else {
            Ok(())
        }
    }

    pub fn length_minutes(&self) -> i64 {
        self.day_end.minutes() - self.day_start.minutes()
    }
}

impl Default for DayWindow {
    /// 08:00 to 22:00.
    fn default() -> Self {
        Self {
            day_start: TimeOfDay::from_minutes(8 * 60).unwrap_or(TimeOfDay::MIDNIGHT),
            day_end: TimeOfDay::from_minutes(22 * 60).unwrap_or(TimeOfDay::LAST_MINUTE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub candidate: Event,
    /// Existing events overlapping the candidate, in input order.
    pub conflicts: Vec<Event>,
}

impl ConflictReport {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn first_conflict(&self) -> Option<&Event> {
        self.conflicts.first()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SlotSuggestion {
    pub day: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl SlotSuggestion {
    pub fn duration_minutes(&self) -> i64 {
        self.end_time.minutes() - self.start_time.minutes()
    }
}

/// Outcome of a slot search. `NotFound` is an expected answer, not an error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SlotSearch {
    Found(SlotSuggestion),
    NotFound,
}

impl SlotSearch {
    pub fn suggestion(&self) -> Option<SlotSuggestion> {
        match self {
            SlotSearch::Found(slot) => Some(*slot),
            SlotSearch::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SlotSearch::Found(_))
    }
}
