//! Tests for reschedule materialization and exception conflict detection.

use chrono::{Duration, TimeZone, Utc};
use timetable_engine::reschedule::materialize_reschedules;
use timetable_engine::{Origin, RescheduleException};

/// Helper: an exception with the boring fields filled in.
fn exception(
    id: i64,
    name: &str,
    original_date: &str,
    rescheduled_date: &str,
    new_time: &str,
) -> RescheduleException {
    RescheduleException {
        id,
        course_code: "CS101".to_string(),
        course_name: name.to_string(),
        branch: "ECE".to_string(),
        semester: "3".to_string(),
        lecture_hall_name: "A1".to_string(),
        original_session_id: None,
        original_date: original_date.to_string(),
        rescheduled_date: rescheduled_date.to_string(),
        new_time: new_time.to_string(),
        duration_minutes: None,
        reason: "holiday".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Basic materialization
// ---------------------------------------------------------------------------

#[test]
fn exception_becomes_one_occurrence_on_its_new_date() {
    let exceptions = vec![exception(1, "Algorithms", "2026-01-05", "2026-01-07", "14:00")];
    let result = materialize_reschedules(&exceptions);

    assert!(result.failures.is_empty());
    assert_eq!(result.reschedules.len(), 1);

    let occ = &result.reschedules[0].occurrence;
    assert_eq!(occ.id, "rescheduled-1");
    assert_eq!(occ.origin, Origin::Rescheduled);
    assert_eq!(occ.title, "Algorithms (Rescheduled) - Lecture Hall A1");
    assert_eq!(occ.start, Utc.with_ymd_and_hms(2026, 1, 7, 14, 0, 0).unwrap());
    // Legacy records have no duration field → one hour.
    assert_eq!(occ.end, Utc.with_ymd_and_hms(2026, 1, 7, 15, 0, 0).unwrap());

    assert_eq!(occ.detail.reason.as_deref(), Some("holiday"));
    assert_eq!(occ.detail.new_time.as_deref(), Some("14:00"));
    assert_eq!(
        occ.detail.original_date,
        Some(chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
    );
    assert!(occ.detail.day_of_week.is_none());
}

#[test]
fn explicit_duration_is_respected() {
    let mut ex = exception(1, "Algorithms", "2026-01-05", "2026-01-07", "14:00");
    ex.duration_minutes = Some(90);
    let result = materialize_reschedules(&[ex]);

    let occ = &result.reschedules[0].occurrence;
    assert_eq!(occ.end - occ.start, Duration::minutes(90));
}

#[test]
fn target_carries_the_foreign_key() {
    let mut ex = exception(1, "Algorithms", "2026-01-05", "2026-01-07", "14:00");
    ex.original_session_id = Some(42);
    let result = materialize_reschedules(&[ex]);

    let target = &result.reschedules[0].target;
    assert_eq!(target.exception_id, 1);
    assert_eq!(target.original_session_id, Some(42));
    assert_eq!(
        target.original_date,
        chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Per-record validation
// ---------------------------------------------------------------------------

#[test]
fn malformed_new_time_fails_only_that_exception() {
    let exceptions = vec![
        exception(1, "Algorithms", "2026-01-05", "2026-01-07", "2pm"),
        exception(2, "Databases", "2026-01-06", "2026-01-08", "10:00"),
    ];
    let result = materialize_reschedules(&exceptions);

    assert_eq!(result.reschedules.len(), 1);
    assert_eq!(result.reschedules[0].target.exception_id, 2);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].id, 1);
    assert!(result.failures[0].error.contains("2pm"));
}

#[test]
fn malformed_rescheduled_date_is_rejected() {
    let exceptions = vec![exception(1, "Algorithms", "2026-01-05", "next wednesday", "14:00")];
    let result = materialize_reschedules(&exceptions);

    assert!(result.reschedules.is_empty());
    assert_eq!(result.failures.len(), 1);
    assert!(result.failures[0].error.contains("next wednesday"));
}

#[test]
fn malformed_original_date_is_rejected() {
    // The original date never shows up in the occurrence times, but the
    // resolver needs it parsed, so a bad one fails the record up front.
    let exceptions = vec![exception(1, "Algorithms", "05/01/2026", "2026-01-07", "14:00")];
    let result = materialize_reschedules(&exceptions);

    assert!(result.reschedules.is_empty());
    assert_eq!(result.failures.len(), 1);
}

#[test]
fn zero_duration_is_rejected() {
    let mut ex = exception(1, "Algorithms", "2026-01-05", "2026-01-07", "14:00");
    ex.duration_minutes = Some(0);
    let result = materialize_reschedules(&[ex]);

    assert!(result.reschedules.is_empty());
    assert_eq!(result.failures.len(), 1);
    assert!(result.failures[0].error.contains("at least one minute"));
}

// ---------------------------------------------------------------------------
// Conflicting exceptions
// ---------------------------------------------------------------------------

#[test]
fn duplicate_targets_reject_the_whole_group() {
    let exceptions = vec![
        exception(1, "Algorithms", "2026-01-05", "2026-01-07", "14:00"),
        exception(2, "Algorithms", "2026-01-05", "2026-01-08", "16:00"),
    ];
    let result = materialize_reschedules(&exceptions);

    // Neither wins: picking one silently would drop data without signal.
    assert!(result.reschedules.is_empty());
    assert_eq!(result.failures.len(), 2);
    for failure in &result.failures {
        assert!(failure.error.contains("2 exceptions"));
        assert!(failure.error.contains("Algorithms"));
    }
}

#[test]
fn same_date_different_courses_do_not_conflict() {
    let exceptions = vec![
        exception(1, "Algorithms", "2026-01-05", "2026-01-07", "14:00"),
        exception(2, "Databases", "2026-01-05", "2026-01-08", "16:00"),
    ];
    let result = materialize_reschedules(&exceptions);

    assert_eq!(result.reschedules.len(), 2);
    assert!(result.failures.is_empty());
}

#[test]
fn same_course_different_dates_do_not_conflict() {
    let exceptions = vec![
        exception(1, "Algorithms", "2026-01-05", "2026-01-07", "14:00"),
        exception(2, "Algorithms", "2026-01-12", "2026-01-14", "14:00"),
    ];
    let result = materialize_reschedules(&exceptions);

    assert_eq!(result.reschedules.len(), 2);
    assert!(result.failures.is_empty());
}
