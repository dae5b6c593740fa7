use timetable_engine_lib::models::event::{Event, EventCategory, EventId, EventPriority};
use timetable_engine_lib::models::schedule::SlotSearch;
use timetable_engine_lib::models::settings::SchedulerSettings;
use timetable_engine_lib::models::time::TimeOfDay;
use timetable_engine_lib::services::conflict_detector::detect_conflicts;
use timetable_engine_lib::services::conflict_resolution::{
    ConflictResolution, ResolutionChoice, ResolutionOutcome, ResolutionState,
};
use timetable_engine_lib::services::slot_finder::{find_next_available_slot, SlotRequest};

fn t(raw: &str) -> TimeOfDay {
    TimeOfDay::parse(raw).unwrap()
}

fn event(id: &str, day: u8, start: &str, end: &str) -> Event {
    Event::new(id, day, t(start), t(end)).unwrap().with_id(id)
}

fn student_week() -> Vec<Event> {
    vec![
        event("calc", 1, "09:00", "10:00"),
        event("chem-lab", 1, "10:00", "12:00").with_category(EventCategory::Lab),
        event("seminar", 2, "14:00", "15:30").with_category(EventCategory::Seminar),
        event("midterm", 3, "08:00", "10:00")
            .with_category(EventCategory::Exam)
            .with_priority(EventPriority::Urgent),
        event("gym", 4, "18:00", "19:00").with_category(EventCategory::Personal),
    ]
}

#[test]
fn overlapping_candidate_reports_the_monday_class() {
    let existing = vec![event("class", 1, "09:00", "10:00")];
    let candidate = Event::new("Study group", 1, t("09:30"), t("10:30")).unwrap();

    let report = detect_conflicts(&candidate, &existing, None);
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.first_conflict().unwrap().id(), Some(&EventId::new("class")));
}

#[test]
fn back_to_back_blocks_never_conflict() {
    let existing = student_week();
    let candidate = Event::new("Office hours", 1, t("08:00"), t("09:00")).unwrap();
    assert!(!detect_conflicts(&candidate, &existing, None).has_conflicts());

    let after = Event::new("Lunch", 1, t("12:00"), t("13:00")).unwrap();
    assert!(!detect_conflicts(&after, &existing, None).has_conflicts());
}

#[test]
fn first_conflict_is_lowest_index_in_input() {
    let existing = student_week();
    let candidate = Event::new("Long block", 1, t("09:30"), t("11:00")).unwrap();
    let report = detect_conflicts(&candidate, &existing, None);
    let ids: Vec<_> = report
        .conflicts
        .iter()
        .map(|event| event.id().unwrap().as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["calc", "chem-lab"]);
}

#[test]
fn suggested_slot_is_free_against_the_same_set() {
    let existing = student_week();
    for start_day in 0..7 {
        for duration in [30, 60, 120, 240] {
            let request = SlotRequest::new(duration, start_day);
            let first = find_next_available_slot(&existing, &request).unwrap();
            assert_eq!(first, find_next_available_slot(&existing, &request).unwrap());

            let slot = match first {
                SlotSearch::Found(slot) => slot,
                SlotSearch::NotFound => panic!("week has room for {duration} minutes"),
            };
            assert_eq!(slot.duration_minutes(), duration);
            let probe = Event::new("probe", slot.day, slot.start_time, slot.end_time).unwrap();
            assert!(!detect_conflicts(&probe, &existing, None).has_conflicts());
        }
    }
}

#[test]
fn monday_morning_block_pushes_suggestion_past_lab() {
    let existing = student_week();
    let slot = find_next_available_slot(&existing, &SlotRequest::new(60, 1))
        .unwrap()
        .suggestion()
        .unwrap();
    assert_eq!((slot.day, slot.start_time), (1, t("08:00")));

    let slot = find_next_available_slot(&existing, &SlotRequest::new(90, 1))
        .unwrap()
        .suggestion()
        .unwrap();
    assert_eq!((slot.day, slot.start_time, slot.end_time), (1, t("12:00"), t("13:30")));
}

#[test]
fn drag_onto_occupied_slot_offers_reschedule() {
    let existing = student_week();
    let gym = existing.iter().find(|e| e.title() == "gym").unwrap();

    let mut resolution = ConflictResolution::for_drop(gym, 3, t("09:00")).unwrap();
    let state = resolution
        .evaluate(&existing, &SchedulerSettings::default())
        .unwrap();
    let suggestion = match state {
        ResolutionState::Conflicting { report, suggestion } => {
            assert_eq!(report.conflicts[0].title(), "midterm");
            suggestion.unwrap()
        }
        other => panic!("expected conflict, got {other:?}"),
    };
    assert_eq!((suggestion.day, suggestion.start_time), (3, t("10:00")));

    match resolution.resolve(ResolutionChoice::Reschedule).unwrap() {
        ResolutionOutcome::Rescheduled(moved) => {
            assert_eq!(moved.id(), gym.id());
            assert_eq!(moved.day(), 3);
            assert_eq!(moved.start_time(), t("10:00"));
            assert_eq!(moved.end_time(), t("11:00"));
            assert_eq!(moved.category(), EventCategory::Personal);
        }
        other => panic!("expected reschedule, got {other:?}"),
    }
}

#[test]
fn editing_event_does_not_conflict_with_its_old_self() {
    let existing = student_week();
    let calc = existing[0].clone();
    let edited = calc.with_placement(1, t("08:30"), t("09:30")).unwrap();

    let mut resolution = ConflictResolution::new(edited.clone(), calc.id().cloned());
    let state = resolution
        .evaluate(&existing, &SchedulerSettings::default())
        .unwrap();
    assert_eq!(
        state,
        &ResolutionState::Resolved {
            outcome: ResolutionOutcome::Override(edited),
        }
    );
}

#[test]
fn inputs_are_left_untouched() {
    let existing = student_week();
    let snapshot = existing.clone();
    let candidate = Event::new("Anything", 1, t("09:00"), t("11:00")).unwrap();

    let mut resolution = ConflictResolution::new(candidate, None);
    resolution
        .evaluate(&existing, &SchedulerSettings::default())
        .unwrap();
    resolution.resolve(ResolutionChoice::Cancel).unwrap();
    assert_eq!(existing, snapshot);
}
