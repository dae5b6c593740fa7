use std::collections::{BTreeMap, HashMap};

use crate::models::event::{Event, DAYS_PER_WEEK};
use crate::models::stats::TimetableStats;

/// Summary figures for a timetable view. `None` when there are no events.
pub fn timetable_statistics(existing: &[Event]) -> Option<TimetableStats> {
    if existing.is_empty() {
        return None;
    }

    let mut categories = BTreeMap::new();
    let mut daily_distribution = [0usize; DAYS_PER_WEEK as usize];
    let mut total_weekly_minutes = 0;
    for event in existing {
        *categories.entry(event.category()).or_insert(0) += 1;
        daily_distribution[usize::from(event.day())] += 1;
        total_weekly_minutes += event.duration_minutes();
    }

    let mut busiest_day = 0usize;
    for (day, count) in daily_distribution.iter().enumerate().skip(1) {
        if *count > daily_distribution[busiest_day] {
            busiest_day = day;
        }
    }

    Some(TimetableStats {
        total_events: existing.len(),
        categories,
        total_weekly_minutes,
        busiest_day: busiest_day as u8,
        most_common_location: most_common_location(existing),
        daily_distribution,
    })
}

// Ties go to the location seen first.
fn most_common_location(existing: &[Event]) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, location) in existing.iter().filter_map(Event::location).enumerate() {
        let entry = counts.entry(location).or_insert((0, index));
        entry.0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (a_count, a_first)), (_, (b_count, b_first))| {
            a_count.cmp(b_count).then_with(|| b_first.cmp(a_first))
        })
        .map(|(location, _)| location.to_string())
}
