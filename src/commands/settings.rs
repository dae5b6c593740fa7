use serde::Deserialize;

use crate::error::AppResult;
use crate::models::settings::{SchedulerSettings, SettingsUpdateInput};
use crate::models::time::TimeOfDay;
use crate::models::workload::{BalanceOptions, WorkloadOptions};

use super::{CommandResult, EngineState};

pub fn settings_get(state: &EngineState) -> SchedulerSettings {
    state.settings().as_ref().clone()
}

/// Validates the update and returns a fresh state; `state` is not modified.
pub fn settings_update(
    state: &EngineState,
    payload: SettingsUpdatePayload,
) -> CommandResult<EngineState> {
    let input = payload.into_input()?;
    let updated = state.settings().apply(input)?;
    Ok(EngineState::new(updated)?)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdatePayload {
    #[serde(default)]
    day_start: Option<String>,
    #[serde(default)]
    day_end: Option<String>,
    #[serde(default)]
    step_minutes: Option<i64>,
    #[serde(default)]
    horizon_days: Option<u8>,
    #[serde(default)]
    balance: Option<BalanceOptions>,
    #[serde(default)]
    workload: Option<WorkloadOptions>,
}

impl SettingsUpdatePayload {
    fn into_input(self) -> AppResult<SettingsUpdateInput> {
        Ok(SettingsUpdateInput {
            day_start: self.day_start.as_deref().map(TimeOfDay::parse).transpose()?,
            day_end: self.day_end.as_deref().map(TimeOfDay::parse).transpose()?,
            step_minutes: self.step_minutes,
            horizon_days: self.horizon_days,
            balance: self.balance,
            workload: self.workload,
        })
    }
}
