use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::event::{Event, EventId};
use crate::models::schedule::{ConflictReport, DayWindow, SlotSearch};
use crate::models::stats::TimetableStats;
use crate::models::time::TimeOfDay;
use crate::models::workload::{BalanceSuggestion, WorkloadProfile};
use crate::services::conflict_resolution::{
    ConflictResolution, ResolutionChoice, ResolutionOutcome, ResolutionState,
};
use crate::services::slot_finder::{self, SlotRequest};
use crate::services::{
    conflict_detector, timetable_stats, workload_analyzer, workload_balancer,
};

use super::{CommandResult, EngineState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectConflictsPayload {
    pub candidate: Event,
    #[serde(default)]
    pub existing: Vec<Event>,
    #[serde(default)]
    pub exclude_id: Option<EventId>,
}

pub fn timetable_detect_conflicts(payload: DetectConflictsPayload) -> ConflictReport {
    conflict_detector::detect_conflicts(
        &payload.candidate,
        &payload.existing,
        payload.exclude_id.as_ref(),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindSlotPayload {
    #[serde(default)]
    pub existing: Vec<Event>,
    pub duration_minutes: i64,
    pub start_day: u8,
    #[serde(default)]
    pub window: Option<DayWindow>,
    #[serde(default)]
    pub horizon_days: Option<u8>,
    #[serde(default)]
    pub exclude_id: Option<EventId>,
}

pub fn timetable_find_slot(
    state: &EngineState,
    payload: FindSlotPayload,
) -> CommandResult<SlotSearch> {
    let settings = state.settings();
    let mut request =
        SlotRequest::from_settings(&settings, payload.duration_minutes, payload.start_day)
            .excluding(payload.exclude_id);
    if let Some(window) = payload.window {
        request = request.with_window(window);
    }
    if let Some(horizon) = payload.horizon_days {
        request = request.with_horizon(horizon);
    }

    Ok(slot_finder::find_next_available_slot(
        &payload.existing,
        &request,
    )?)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeWorkloadPayload {
    #[serde(default)]
    pub existing: Vec<Event>,
}

pub fn timetable_analyze_workload(
    state: &EngineState,
    payload: AnalyzeWorkloadPayload,
) -> WorkloadProfile {
    let settings = state.settings();
    workload_analyzer::analyze_workload_with(&payload.existing, &settings.workload)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceWorkloadPayload {
    #[serde(default)]
    pub existing: Vec<Event>,
    /// Profile computed earlier by the caller; recomputed when absent.
    #[serde(default)]
    pub profile: Option<WorkloadProfile>,
}

pub fn timetable_balance_workload(
    state: &EngineState,
    payload: BalanceWorkloadPayload,
) -> CommandResult<Vec<BalanceSuggestion>> {
    let settings = state.settings();
    let profile = payload.profile.unwrap_or_else(|| {
        workload_analyzer::analyze_workload_with(&payload.existing, &settings.workload)
    });
    Ok(workload_balancer::balance_workload_with(
        &payload.existing,
        &profile,
        &settings,
    )?)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveConflictPayload {
    pub candidate: Event,
    #[serde(default)]
    pub existing: Vec<Event>,
    #[serde(default)]
    pub exclude_id: Option<EventId>,
    pub choice: ResolutionChoice,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveConflictResponse {
    pub resolution_id: Uuid,
    pub conflicts: Vec<Event>,
    pub outcome: ResolutionOutcome,
}

/// Evaluates the candidate and applies `choice` in one call. When nothing
/// conflicts the placement is accepted as proposed and `choice` is not
/// consulted.
pub fn timetable_resolve_conflict(
    state: &EngineState,
    payload: ResolveConflictPayload,
) -> CommandResult<ResolveConflictResponse> {
    let settings = state.settings();
    let mut resolution = ConflictResolution::new(payload.candidate, payload.exclude_id);

    let conflicts = match resolution.evaluate(&payload.existing, &settings)? {
        ResolutionState::Conflicting { report, .. } => report.conflicts.clone(),
        _ => Vec::new(),
    };

    let outcome = match resolution.outcome().cloned() {
        Some(outcome) => outcome,
        None => resolution.resolve(payload.choice)?,
    };

    Ok(ResolveConflictResponse {
        resolution_id: resolution.resolution_id(),
        conflicts,
        outcome,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateDropPayload {
    pub event: Event,
    pub new_day: u8,
    pub new_start: TimeOfDay,
    #[serde(default)]
    pub existing: Vec<Event>,
}

pub fn timetable_evaluate_drop(
    state: &EngineState,
    payload: EvaluateDropPayload,
) -> CommandResult<ConflictResolution> {
    let settings = state.settings();
    let mut resolution =
        ConflictResolution::for_drop(&payload.event, payload.new_day, payload.new_start)?;
    resolution.evaluate(&payload.existing, &settings)?;
    Ok(resolution)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsPayload {
    #[serde(default)]
    pub existing: Vec<Event>,
}

pub fn timetable_statistics(payload: StatisticsPayload) -> Option<TimetableStats> {
    timetable_stats::timetable_statistics(&payload.existing)
}
