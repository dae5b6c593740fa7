use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::event::{EventCategory, DAYS_PER_WEEK};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimetableStats {
    pub total_events: usize,
    pub categories: BTreeMap<EventCategory, usize>,
    pub total_weekly_minutes: i64,
    /// Day with the most events (not minutes), lowest index on ties.
    pub busiest_day: u8,
    #[serde(default)]
    pub most_common_location: Option<String>,
    pub daily_distribution: [usize; DAYS_PER_WEEK as usize],
}

impl TimetableStats {
    pub fn count_for(&self, category: EventCategory) -> usize {
        self.categories.get(&category).copied().unwrap_or(0)
    }

    pub fn total_weekly_hours(&self) -> f64 {
        self.total_weekly_minutes as f64 / 60.0
    }
}
