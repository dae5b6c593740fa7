use tracing::debug;

use crate::models::event::{Event, EventId};
use crate::models::schedule::ConflictReport;
use crate::services::schedule_utils;

/// Collects every event in `existing` that overlaps `candidate` on the same
/// day, skipping the event identified by `exclude_id`.
pub fn detect_conflicts(
    candidate: &Event,
    existing: &[Event],
    exclude_id: Option<&EventId>,
) -> ConflictReport {
    let conflicts: Vec<Event> = conflicting_events(candidate, existing, exclude_id)
        .cloned()
        .collect();

    debug!(
        target: "app::conflict",
        day = candidate.day(),
        start = %candidate.start_time(),
        end = %candidate.end_time(),
        conflicts = conflicts.len(),
        "conflict check finished"
    );

    ConflictReport {
        candidate: candidate.clone(),
        conflicts,
    }
}

/// Cheaper form of [`detect_conflicts`] for callers that only need a yes/no.
pub fn has_conflict(candidate: &Event, existing: &[Event], exclude_id: Option<&EventId>) -> bool {
    conflicting_events(candidate, existing, exclude_id)
        .next()
        .is_some()
}

fn conflicting_events<'a>(
    candidate: &'a Event,
    existing: &'a [Event],
    exclude_id: Option<&'a EventId>,
) -> impl Iterator<Item = &'a Event> + 'a {
    existing.iter().filter(move |event| {
        event.day() == candidate.day()
            && !exclude_id.is_some_and(|id| event.has_id(id))
            && schedule_utils::overlaps(
                candidate.start_time(),
                candidate.end_time(),
                event.start_time(),
                event.end_time(),
            )
    })
}
