use crate::error::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::time::TimeOfDay;

pub fn parse_time(value: &str) -> AppResult<TimeOfDay> {
    TimeOfDay::parse(value)
}

pub fn format_time(time: TimeOfDay) -> String {
    time.to_string()
}

/// Half-open overlap test: back-to-back intervals do not overlap.
pub fn overlaps(
    a_start: TimeOfDay,
    a_end: TimeOfDay,
    b_start: TimeOfDay,
    b_end: TimeOfDay,
) -> bool {
    a_start < b_end && b_start < a_end
}

pub fn duration_minutes(start: TimeOfDay, end: TimeOfDay) -> i64 {
    end.minutes() - start.minutes()
}

/// Shifts `time` by `delta` minutes. Leaving `00:00..=23:59` is an error,
/// never a wrap.
pub fn add_minutes(time: TimeOfDay, delta: i64) -> AppResult<TimeOfDay> {
    time.minutes()
        .checked_add(delta)
        .and_then(TimeOfDay::from_minutes)
        .ok_or_else(|| AppError::time_overflow(time.to_string(), delta))
}

/// Moves `event` to `new_day` at `new_start` keeping its duration, the way a
/// drag-and-drop on the grid does.
pub fn shift_preserving_duration(
    event: &Event,
    new_day: u8,
    new_start: TimeOfDay,
) -> AppResult<Event> {
    let new_end = add_minutes(new_start, event.duration_minutes())?;
    event.with_placement(new_day, new_start, new_end)
}
