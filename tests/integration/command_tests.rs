use serde_json::json;
use timetable_engine_lib::commands::settings::{settings_get, settings_update, SettingsUpdatePayload};
use timetable_engine_lib::commands::timetable::{
    timetable_analyze_workload, timetable_balance_workload, timetable_detect_conflicts,
    timetable_evaluate_drop, timetable_find_slot, timetable_resolve_conflict,
    timetable_statistics, AnalyzeWorkloadPayload, BalanceWorkloadPayload, DetectConflictsPayload,
    EvaluateDropPayload, FindSlotPayload, ResolveConflictPayload, StatisticsPayload,
};
use timetable_engine_lib::commands::{CommandError, EngineState};
use timetable_engine_lib::error::AppError;
use timetable_engine_lib::models::event::EventCategory;
use timetable_engine_lib::models::schedule::SlotSearch;
use timetable_engine_lib::services::conflict_resolution::ResolutionOutcome;

fn week() -> serde_json::Value {
    json!([
        {"id": "calc", "title": "Calculus", "day": 1, "startTime": "09:00", "endTime": "10:00",
         "category": "class", "location": "Room 101"},
        {"id": "lab", "title": "Chemistry Lab", "day": 1, "startTime": "10:00", "endTime": "12:00",
         "category": "lab", "location": "Lab B"},
        {"id": "exam", "title": "Midterm", "day": 3, "startTime": "08:00", "endTime": "10:00",
         "category": "exam", "priority": "urgent", "location": "Room 101"}
    ])
}

fn payload<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}

#[test]
fn detect_conflicts_over_json() {
    let report = timetable_detect_conflicts(payload::<DetectConflictsPayload>(json!({
        "candidate": {"title": "Office hours", "day": 1, "startTime": "09:30",
                      "endTime": "10:30", "category": "meeting"},
        "existing": week()
    })));
    let ids: Vec<_> = report
        .conflicts
        .iter()
        .filter_map(|event| event.id().map(|id| id.as_str().to_string()))
        .collect();
    assert_eq!(ids, vec!["calc", "lab"]);

    let body = serde_json::to_value(&report).unwrap();
    assert_eq!(body["conflicts"][0]["startTime"], "09:00");
    assert_eq!(body["candidate"]["priority"], "medium");
}

#[test]
fn find_slot_uses_state_defaults_and_payload_overrides() {
    let state = EngineState::default();
    let found = timetable_find_slot(
        &state,
        payload::<FindSlotPayload>(json!({
            "existing": week(),
            "durationMinutes": 90,
            "startDay": 1
        })),
    )
    .unwrap();
    let slot = found.suggestion().unwrap();
    assert_eq!((slot.day, slot.start_time.to_string()), (1, "12:00".to_string()));
    assert_eq!(
        serde_json::to_value(found).unwrap(),
        json!({"status": "found", "day": 1, "startTime": "12:00", "endTime": "13:30"})
    );

    let not_found = timetable_find_slot(
        &state,
        payload::<FindSlotPayload>(json!({
            "durationMinutes": 120,
            "startDay": 0,
            "window": {"dayStart": "09:00", "dayEnd": "10:00"}
        })),
    )
    .unwrap();
    assert_eq!(not_found, SlotSearch::NotFound);
    assert_eq!(serde_json::to_value(not_found).unwrap(), json!({"status": "notFound"}));
}

#[test]
fn invalid_requests_map_to_command_errors() {
    let state = EngineState::default();
    let err = timetable_find_slot(
        &state,
        payload::<FindSlotPayload>(json!({"durationMinutes": -15, "startDay": 2})),
    )
    .unwrap_err();
    assert_eq!(err.code, "INVALID_EVENT");

    let from_time: CommandError = AppError::invalid_time_format("7pm", "missing ':' separator").into();
    assert_eq!(from_time.code, "INVALID_TIME_FORMAT");
    assert_eq!(from_time.details.unwrap()["value"], "7pm");

    let overflow: CommandError = AppError::time_overflow("23:30", 60).into();
    let body = serde_json::to_value(&overflow).unwrap();
    assert_eq!(body["code"], "TIME_OVERFLOW");
    assert_eq!(body["details"]["deltaMinutes"], 60);

    let plain: CommandError = AppError::invalid_event("bad").into();
    assert!(serde_json::to_value(&plain).unwrap().get("details").is_none());
}

#[test]
fn workload_commands_respect_excluded_categories() {
    let state = EngineState::default();
    let state = settings_update(
        &state,
        payload::<SettingsUpdatePayload>(json!({
            "workload": {"excludedCategories": ["exam"]}
        })),
    )
    .unwrap();

    let profile = timetable_analyze_workload(
        &state,
        payload::<AnalyzeWorkloadPayload>(json!({"existing": week()})),
    );
    assert_eq!(profile.minutes_by_day[1], 180);
    assert_eq!(profile.minutes_by_day[3], 0);
    assert_eq!(profile.busiest_day, 1);

    let suggestions = timetable_balance_workload(
        &state,
        payload::<BalanceWorkloadPayload>(json!({"existing": week()})),
    )
    .unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].event_to_move.title(), "Calculus");
    assert_eq!(suggestions[0].to_day, 0);
}

#[test]
fn balance_command_uses_supplied_profile() {
    let state = EngineState::default();
    let suggestions = timetable_balance_workload(
        &state,
        payload::<BalanceWorkloadPayload>(json!({
            "existing": week(),
            "profile": {
                "minutesByDay": [0, 180, 0, 120, 0, 0, 0],
                "busiestDay": 1,
                "leastBusyDay": 6,
                "totalMinutes": 300
            }
        })),
    )
    .unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].event_to_move.title(), "Calculus");
    assert_eq!(suggestions[0].to_day, 6);
    assert_eq!(suggestions[0].target_slot.start_time.to_string(), "08:00");
}

#[test]
fn resolve_conflict_applies_choice_in_one_call() {
    let state = EngineState::default();
    let response = timetable_resolve_conflict(
        &state,
        payload::<ResolveConflictPayload>(json!({
            "candidate": {"title": "Study group", "day": 3, "startTime": "09:00",
                          "endTime": "10:00", "category": "seminar"},
            "existing": week(),
            "choice": "reschedule"
        })),
    )
    .unwrap();
    assert_eq!(response.conflicts.len(), 1);
    match &response.outcome {
        ResolutionOutcome::Rescheduled(event) => {
            assert_eq!(event.day(), 3);
            assert_eq!(event.start_time().to_string(), "10:00");
            assert_eq!(event.category(), EventCategory::Seminar);
        }
        other => panic!("expected reschedule, got {other:?}"),
    }

    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["outcome"]["outcome"], "rescheduled");
    assert!(body["resolutionId"].is_string());

    let clear = timetable_resolve_conflict(
        &state,
        payload::<ResolveConflictPayload>(json!({
            "candidate": {"title": "Walk", "day": 6, "startTime": "09:00",
                          "endTime": "10:00", "category": "personal"},
            "existing": week(),
            "choice": "cancel"
        })),
    )
    .unwrap();
    assert!(clear.conflicts.is_empty());
    assert!(matches!(clear.outcome, ResolutionOutcome::Override(_)));
}

#[test]
fn evaluate_drop_serializes_conflicting_state() {
    let state = EngineState::default();
    let resolution = timetable_evaluate_drop(
        &state,
        payload::<EvaluateDropPayload>(json!({
            "event": {"id": "calc", "title": "Calculus", "day": 1, "startTime": "09:00",
                      "endTime": "10:00", "category": "class"},
            "newDay": 3,
            "newStart": "09:30",
            "existing": week()
        })),
    )
    .unwrap();

    let body = serde_json::to_value(&resolution).unwrap();
    assert_eq!(body["state"]["state"], "conflicting");
    assert_eq!(body["state"]["report"]["conflicts"][0]["id"], "exam");
    assert_eq!(body["state"]["suggestion"]["startTime"], "10:00");
    assert_eq!(body["candidate"]["endTime"], "10:30");
    assert_eq!(body["excludeId"], "calc");

    let err = timetable_evaluate_drop(
        &state,
        payload::<EvaluateDropPayload>(json!({
            "event": {"title": "Late", "day": 5, "startTime": "20:00",
                      "endTime": "23:00", "category": "personal"},
            "newDay": 5,
            "newStart": "22:00"
        })),
    )
    .unwrap_err();
    assert_eq!(err.code, "TIME_OVERFLOW");
}

#[test]
fn statistics_command_summarises_week() {
    let stats = timetable_statistics(payload::<StatisticsPayload>(json!({"existing": week()})))
        .unwrap();
    assert_eq!(stats.total_events, 3);
    assert_eq!(stats.total_weekly_minutes, 300);
    assert_eq!(stats.busiest_day, 1);
    assert_eq!(stats.most_common_location.as_deref(), Some("Room 101"));
    assert_eq!(stats.count_for(EventCategory::Lab), 1);

    assert!(timetable_statistics(payload::<StatisticsPayload>(json!({}))).is_none());
}

#[test]
fn settings_update_returns_new_state_and_rejects_bad_input() {
    let state = EngineState::default();
    let updated = settings_update(
        &state,
        payload::<SettingsUpdatePayload>(json!({"dayStart": "07:00", "stepMinutes": 15})),
    )
    .unwrap();
    assert_eq!(settings_get(&updated).day_start.to_string(), "07:00");
    assert_eq!(settings_get(&updated).step_minutes, 15);
    assert_eq!(settings_get(&state).day_start.to_string(), "08:00");

    let bad_time = settings_update(
        &state,
        payload::<SettingsUpdatePayload>(json!({"dayEnd": "25:00"})),
    )
    .unwrap_err();
    assert_eq!(bad_time.code, "INVALID_TIME_FORMAT");

    let bad_window = settings_update(
        &state,
        payload::<SettingsUpdatePayload>(json!({"dayStart": "21:00", "dayEnd": "08:00"})),
    )
    .unwrap_err();
    assert_eq!(bad_window.code, "VALIDATION_ERROR");
}
