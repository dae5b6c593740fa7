use serde_json::json;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::event::{ensure_day, Event, EventId, DAYS_PER_WEEK};
use crate::models::schedule::{DayWindow, SlotSearch, SlotSuggestion};
use crate::models::settings::{SchedulerSettings, DEFAULT_STEP_MINUTES};
use crate::models::time::TimeOfDay;
use crate::services::{conflict_detector, schedule_utils};

/// Parameters for a forward search over the week.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRequest {
    pub duration_minutes: i64,
    pub start_day: u8,
    pub window: DayWindow,
    /// Distinct days examined, wrapping Saturday to Sunday. Capped at 7.
    pub horizon_days: u8,
    pub step_minutes: i64,
    /// Event ignored while checking conflicts, usually the one being moved.
    pub exclude_id: Option<EventId>,
}

impl SlotRequest {
    pub fn new(duration_minutes: i64, start_day: u8) -> Self {
        Self {
            duration_minutes,
            start_day,
            window: DayWindow::default(),
            horizon_days: DAYS_PER_WEEK,
            step_minutes: DEFAULT_STEP_MINUTES,
            exclude_id: None,
        }
    }

    pub fn from_settings(settings: &SchedulerSettings, duration_minutes: i64, start_day: u8) -> Self {
        Self {
            duration_minutes,
            start_day,
            window: settings.window(),
            horizon_days: settings.horizon_days,
            step_minutes: settings.step_minutes,
            exclude_id: None,
        }
    }

    pub fn with_window(mut self, window: DayWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_horizon(mut self, horizon_days: u8) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    pub fn excluding(mut self, id: Option<EventId>) -> Self {
        self.exclude_id = id;
        self
    }

    fn validate(&self) -> AppResult<()> {
        if self.duration_minutes <= 0 {
            return Err(AppError::invalid_event(format!(
                "duration must be positive, got {} minutes",
                self.duration_minutes
            )));
        }
        ensure_day(self.start_day)?;
        self.window.ensure_valid()?;
        if self.step_minutes <= 0 {
            return Err(AppError::validation_with_details(
                "step minutes must be positive",
                json!({"stepMinutes": self.step_minutes}),
            ));
        }
        Ok(())
    }
}

/// Greedy search for the first conflict-free placement: earliest day in the
/// horizon first, then earliest start on that day.
pub fn find_next_available_slot(existing: &[Event], request: &SlotRequest) -> AppResult<SlotSearch> {
    request.validate()?;

    let window = request.window;
    let latest_start = window.day_end.minutes() - request.duration_minutes;
    let horizon = request.horizon_days.min(DAYS_PER_WEEK);

    if latest_start < window.day_start.minutes() {
        debug!(
            target: "app::slot_finder",
            duration = request.duration_minutes,
            window_minutes = window.length_minutes(),
            "duration does not fit the daily window"
        );
        return Ok(SlotSearch::NotFound);
    }

    for offset in 0..horizon {
        let day = (request.start_day + offset) % DAYS_PER_WEEK;
        if let Some(slot) = first_free_slot_on_day(existing, request, day, latest_start)? {
            debug!(
                target: "app::slot_finder",
                day,
                start = %slot.start_time,
                end = %slot.end_time,
                "slot found"
            );
            return Ok(SlotSearch::Found(slot));
        }
    }

    info!(
        target: "app::slot_finder",
        start_day = request.start_day,
        horizon,
        duration = request.duration_minutes,
        "no free slot within horizon"
    );
    Ok(SlotSearch::NotFound)
}

fn first_free_slot_on_day(
    existing: &[Event],
    request: &SlotRequest,
    day: u8,
    latest_start: i64,
) -> AppResult<Option<SlotSuggestion>> {
    let mut start = request.window.day_start.minutes();
    while start <= latest_start {
        let start_time = TimeOfDay::from_minutes(start)
            .ok_or_else(|| AppError::time_overflow(start.to_string(), 0))?;
        let end_time = schedule_utils::add_minutes(start_time, request.duration_minutes)?;
        let probe = Event::new(String::new(), day, start_time, end_time)?;

        if !conflict_detector::has_conflict(&probe, existing, request.exclude_id.as_ref()) {
            return Ok(Some(SlotSuggestion {
                day,
                start_time,
                end_time,
            }));
        }
        start += request.step_minutes;
    }
    Ok(None)
}
