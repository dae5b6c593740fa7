use tracing::debug;

use crate::models::event::{Event, DAYS_PER_WEEK};
use crate::models::workload::{WorkloadOptions, WorkloadProfile};
use crate::services::schedule_utils;

/// Total scheduled minutes per day across every event.
pub fn analyze_workload(existing: &[Event]) -> WorkloadProfile {
    analyze_workload_with(existing, &WorkloadOptions::default())
}

pub fn analyze_workload_with(existing: &[Event], options: &WorkloadOptions) -> WorkloadProfile {
    let mut minutes_by_day = [0i64; DAYS_PER_WEEK as usize];
    for event in existing.iter().filter(|event| options.counts(event)) {
        minutes_by_day[usize::from(event.day())] +=
            schedule_utils::duration_minutes(event.start_time(), event.end_time());
    }

    let profile = WorkloadProfile::from_minutes(minutes_by_day);
    debug!(
        target: "app::workload",
        total_minutes = profile.total_minutes,
        busiest_day = profile.busiest_day,
        least_busy_day = profile.least_busy_day,
        "workload analyzed"
    );
    profile
}
