use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::event::Event;
use crate::models::schedule::SlotSearch;
use crate::models::settings::SchedulerSettings;
use crate::models::workload::{BalanceSuggestion, LoadChange, WorkloadProfile};
use crate::services::slot_finder::{self, SlotRequest};

/// Proposes at most one move from the busiest day towards the least busy day
/// using default settings. An empty list means nothing worth moving.
pub fn balance_workload(
    existing: &[Event],
    profile: &WorkloadProfile,
) -> AppResult<Vec<BalanceSuggestion>> {
    balance_workload_with(existing, profile, &SchedulerSettings::default())
}

pub fn balance_workload_with(
    existing: &[Event],
    profile: &WorkloadProfile,
    settings: &SchedulerSettings,
) -> AppResult<Vec<BalanceSuggestion>> {
    let from_day = profile.busiest_day;

    if from_day == profile.least_busy_day {
        debug!(target: "app::workload", "load is uniform, nothing to balance");
        return Ok(Vec::new());
    }

    if !settings.balance.is_significant(profile) {
        debug!(
            target: "app::workload",
            imbalance = profile.imbalance_minutes(),
            "imbalance below threshold"
        );
        return Ok(Vec::new());
    }

    // High and urgent events stay where they are no matter the load.
    let mut movable: Vec<&Event> = existing
        .iter()
        .filter(|event| {
            event.day() == from_day
                && !event.priority().is_pinned()
                && settings.workload.counts(event)
        })
        .collect();
    movable.sort_by_key(|event| event.duration_minutes());

    for event in movable {
        let duration = event.duration_minutes();
        let request = SlotRequest::from_settings(settings, duration, profile.least_busy_day)
            .excluding(event.id().cloned());

        let slot = match slot_finder::find_next_available_slot(existing, &request)? {
            SlotSearch::Found(slot) if slot.day != from_day => slot,
            _ => continue,
        };

        let from_before = profile.minutes_on(from_day);
        let to_before = profile.minutes_on(slot.day);
        let suggestion = BalanceSuggestion {
            event_to_move: event.clone(),
            target_slot: slot,
            from_day,
            to_day: slot.day,
            from_day_load: LoadChange {
                before: from_before,
                after: from_before - duration,
            },
            to_day_load: LoadChange {
                before: to_before,
                after: to_before + duration,
            },
        };

        info!(
            target: "app::workload",
            title = event.title(),
            from_day,
            to_day = slot.day,
            start = %slot.start_time,
            "balance move proposed"
        );
        return Ok(vec![suggestion]);
    }

    info!(target: "app::workload", busiest_day = from_day, "no movable event found");
    Ok(Vec::new())
}
