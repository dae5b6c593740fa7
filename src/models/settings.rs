use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::models::event::DAYS_PER_WEEK;
use crate::models::schedule::DayWindow;
use crate::models::time::TimeOfDay;
use crate::models::workload::{BalanceOptions, WorkloadOptions};

pub const DEFAULT_STEP_MINUTES: i64 = 30;
pub const MAX_STEP_MINUTES: i64 = 240;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerSettings {
    pub day_start: TimeOfDay,
    pub day_end: TimeOfDay,
    pub step_minutes: i64,
    pub horizon_days: u8,
    pub balance: BalanceOptions,
    pub workload: WorkloadOptions,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        let window = DayWindow::default();
        Self {
            day_start: window.day_start,
            day_end: window.day_end,
            step_minutes: DEFAULT_STEP_MINUTES,
            horizon_days: DAYS_PER_WEEK,
            balance: BalanceOptions::default(),
            workload: WorkloadOptions::default(),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdateInput {
    #[serde(default)]
    pub day_start: Option<TimeOfDay>,
    #[serde(default)]
    pub day_end: Option<TimeOfDay>,
    #[serde(default)]
    pub step_minutes: Option<i64>,
    #[serde(default)]
    pub horizon_days: Option<u8>,
    #[serde(default)]
    pub balance: Option<BalanceOptions>,
    #[serde(default)]
    pub workload: Option<WorkloadOptions>,
}

impl SchedulerSettings {
    pub fn window(&self) -> DayWindow {
        DayWindow {
            day_start: self.day_start,
            day_end: self.day_end,
        }
    }

    /// Applies a partial update, returning new settings. `self` is untouched
    /// when validation fails.
    pub fn apply(&self, input: SettingsUpdateInput) -> AppResult<Self> {
        let mut next = self.clone();
        if let Some(day_start) = input.day_start {
            next.day_start = day_start;
        }
        if let Some(day_end) = input.day_end {
            next.day_end = day_end;
        }
        if let Some(step) = input.step_minutes {
            next.step_minutes = step;
        }
        if let Some(horizon) = input.horizon_days {
            next.horizon_days = horizon;
        }
        if let Some(balance) = input.balance {
            next.balance = balance;
        }
        if let Some(workload) = input.workload {
            next.workload = workload;
        }
        next.validate()?;
        Ok(next)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.window().ensure_valid()?;

        if !(1..=MAX_STEP_MINUTES).contains(&self.step_minutes) {
            return Err(AppError::validation_with_details(
                "step minutes out of range",
                json!({"stepMinutes": self.step_minutes, "max": MAX_STEP_MINUTES}),
            ));
        }

        if !(1..=DAYS_PER_WEEK).contains(&self.horizon_days) {
            return Err(AppError::validation_with_details(
                "horizon days out of range",
                json!({"horizonDays": self.horizon_days, "max": DAYS_PER_WEEK}),
            ));
        }

        if self.balance.min_gap_minutes < 0 {
            return Err(AppError::validation("minimum balance gap cannot be negative"));
        }

        if let Some(ratio) = self.balance.overload_ratio {
            if !ratio.is_finite() || ratio < 1.0 {
                return Err(AppError::validation_with_details(
                    "overload ratio must be at least 1.0",
                    json!({"overloadRatio": ratio}),
                ));
            }
        }

        Ok(())
    }
}
