use serde::{Deserialize, Serialize};

use crate::models::event::{Event, EventCategory, DAYS_PER_WEEK};
use crate::models::schedule::SlotSuggestion;

/// Scheduled minutes per weekday, index 0 = Sunday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadProfile {
    pub minutes_by_day: [i64; DAYS_PER_WEEK as usize],
    pub busiest_day: u8,
    pub least_busy_day: u8,
    pub total_minutes: i64,
}

impl WorkloadProfile {
    /// Builds the profile from per-day totals. Ties on either end go to the
    /// lowest day index.
    pub fn from_minutes(minutes_by_day: [i64; DAYS_PER_WEEK as usize]) -> Self {
        let mut busiest_day = 0usize;
        let mut least_busy_day = 0usize;
        for (day, minutes) in minutes_by_day.iter().enumerate().skip(1) {
            if *minutes > minutes_by_day[busiest_day] {
                busiest_day = day;
            }
            if *minutes < minutes_by_day[least_busy_day] {
                least_busy_day = day;
            }
        }

        Self {
            minutes_by_day,
            busiest_day: busiest_day as u8,
            least_busy_day: least_busy_day as u8,
            total_minutes: minutes_by_day.iter().sum(),
        }
    }

    pub fn minutes_on(&self, day: u8) -> i64 {
        self.minutes_by_day
            .get(usize::from(day))
            .copied()
            .unwrap_or(0)
    }

    pub fn average_minutes(&self) -> f64 {
        self.total_minutes as f64 / f64::from(DAYS_PER_WEEK)
    }

    /// Spread between the busiest and the least busy day.
    pub fn imbalance_minutes(&self) -> i64 {
        self.minutes_on(self.busiest_day) - self.minutes_on(self.least_busy_day)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoadChange {
    pub before: i64,
    pub after: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSuggestion {
    pub event_to_move: Event,
    pub target_slot: SlotSuggestion,
    pub from_day: u8,
    pub to_day: u8,
    pub from_day_load: LoadChange,
    pub to_day_load: LoadChange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadOptions {
    /// Categories left out of the per-day totals.
    #[serde(default)]
    pub excluded_categories: Vec<EventCategory>,
}

impl WorkloadOptions {
    pub fn counts(&self, event: &Event) -> bool {
        !self.excluded_categories.contains(&event.category())
    }
}

/// Gate that decides whether an imbalance is worth acting on. The defaults
/// leave the gate open.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BalanceOptions {
    #[serde(default)]
    pub min_gap_minutes: i64,
    /// Busiest day must exceed the weekly average times this ratio.
    #[serde(default)]
    pub overload_ratio: Option<f64>,
}

impl BalanceOptions {
    pub fn is_significant(&self, profile: &WorkloadProfile) -> bool {
        if profile.imbalance_minutes() < self.min_gap_minutes {
            return false;
        }
        match self.overload_ratio {
            Some(ratio) => {
                profile.minutes_on(profile.busiest_day) as f64 > profile.average_minutes() * ratio
            }
            None => true,
        }
    }
}
