//! Decision object for an edit or drop that may overlap existing events.
//!
//! A resolution starts `Pending`, is evaluated once against the current
//! event set, and ends `Resolved`. It only stops in `Conflicting` when there
//! is something for the user to decide.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::event::{Event, EventId};
use crate::models::schedule::{ConflictReport, SlotSuggestion};
use crate::models::settings::SchedulerSettings;
use crate::models::time::TimeOfDay;
use crate::services::slot_finder::{self, SlotRequest};
use crate::services::{conflict_detector, schedule_utils};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionChoice {
    Override,
    Reschedule,
    Cancel,
}

impl ResolutionChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionChoice::Override => "override",
            ResolutionChoice::Reschedule => "reschedule",
            ResolutionChoice::Cancel => "cancel",
        }
    }
}

impl fmt::Display for ResolutionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller should persist once a resolution is final.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", content = "event", rename_all = "camelCase")]
pub enum ResolutionOutcome {
    /// Keep the candidate as proposed, overlaps included.
    Override(Event),
    /// Candidate moved onto the attached suggestion.
    Rescheduled(Event),
    Cancelled,
}

impl ResolutionOutcome {
    pub fn event(&self) -> Option<&Event> {
        match self {
            ResolutionOutcome::Override(event) | ResolutionOutcome::Rescheduled(event) => {
                Some(event)
            }
            ResolutionOutcome::Cancelled => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ResolutionState {
    Pending,
    Conflicting {
        report: ConflictReport,
        #[serde(default)]
        suggestion: Option<SlotSuggestion>,
    },
    Resolved {
        outcome: ResolutionOutcome,
    },
}

impl ResolutionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionState::Pending => "pending",
            ResolutionState::Conflicting { .. } => "conflicting",
            ResolutionState::Resolved { .. } => "resolved",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResolution {
    resolution_id: Uuid,
    candidate: Event,
    exclude_id: Option<EventId>,
    state: ResolutionState,
}

impl ConflictResolution {
    pub fn new(candidate: Event, exclude_id: Option<EventId>) -> Self {
        Self {
            resolution_id: Uuid::new_v4(),
            candidate,
            exclude_id,
            state: ResolutionState::Pending,
        }
    }

    /// Builds the resolution for a drag-and-drop of `original` onto
    /// `new_day`/`new_start`, keeping the original duration.
    pub fn for_drop(original: &Event, new_day: u8, new_start: TimeOfDay) -> AppResult<Self> {
        let candidate = schedule_utils::shift_preserving_duration(original, new_day, new_start)?;
        Ok(Self::new(candidate, original.id().cloned()))
    }

    pub fn resolution_id(&self) -> Uuid {
        self.resolution_id
    }

    pub fn candidate(&self) -> &Event {
        &self.candidate
    }

    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    pub fn outcome(&self) -> Option<&ResolutionOutcome> {
        match &self.state {
            ResolutionState::Resolved { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// Runs conflict detection. Without conflicts the placement is accepted
    /// immediately; otherwise a slot suggestion is searched from the
    /// candidate's own day.
    pub fn evaluate(
        &mut self,
        existing: &[Event],
        settings: &SchedulerSettings,
    ) -> AppResult<&ResolutionState> {
        if !matches!(self.state, ResolutionState::Pending) {
            return Err(AppError::illegal_transition(self.state.as_str(), "evaluate"));
        }

        let exclude_id = self
            .exclude_id
            .clone()
            .or_else(|| self.candidate.id().cloned());
        let report =
            conflict_detector::detect_conflicts(&self.candidate, existing, exclude_id.as_ref());

        if !report.has_conflicts() {
            info!(
                target: "app::resolution",
                resolution_id = %self.resolution_id,
                "no conflicts, placement accepted"
            );
            self.state = ResolutionState::Resolved {
                outcome: ResolutionOutcome::Override(self.candidate.clone()),
            };
            return Ok(&self.state);
        }

        let request = SlotRequest::from_settings(
            settings,
            self.candidate.duration_minutes(),
            self.candidate.day(),
        )
        .excluding(exclude_id);
        let suggestion = slot_finder::find_next_available_slot(existing, &request)?.suggestion();

        info!(
            target: "app::resolution",
            resolution_id = %self.resolution_id,
            conflicts = report.conflicts.len(),
            has_suggestion = suggestion.is_some(),
            "placement conflicts with existing events"
        );
        self.state = ResolutionState::Conflicting { report, suggestion };
        Ok(&self.state)
    }

    /// Applies the user's choice. Only legal while `Conflicting`; a failed
    /// call leaves the state unchanged.
    pub fn resolve(&mut self, choice: ResolutionChoice) -> AppResult<ResolutionOutcome> {
        let suggestion = match &self.state {
            ResolutionState::Conflicting { suggestion, .. } => *suggestion,
            other => {
                return Err(AppError::illegal_transition(other.as_str(), choice.as_str()));
            }
        };

        let outcome = match choice {
            ResolutionChoice::Override => ResolutionOutcome::Override(self.candidate.clone()),
            ResolutionChoice::Reschedule => {
                let slot = suggestion.ok_or_else(|| {
                    AppError::illegal_transition("conflicting without suggestion", choice.as_str())
                })?;
                ResolutionOutcome::Rescheduled(self.candidate.with_placement(
                    slot.day,
                    slot.start_time,
                    slot.end_time,
                )?)
            }
            ResolutionChoice::Cancel => ResolutionOutcome::Cancelled,
        };

        info!(
            target: "app::resolution",
            resolution_id = %self.resolution_id,
            choice = choice.as_str(),
            "conflict resolved"
        );
        self.state = ResolutionState::Resolved {
            outcome: outcome.clone(),
        };
        Ok(outcome)
    }
}
