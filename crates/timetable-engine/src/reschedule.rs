//! Reschedule materialization — one concrete occurrence per exception.
//!
//! Also detects conflicting exceptions: two records targeting the same
//! original occurrence are both rejected rather than silently picking one.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::error::{Result, TimetableError};
use crate::types::{
    parse_date, Occurrence, OccurrenceDetail, Origin, RecordFailure, RescheduleException,
    TimeOfDay,
};

/// What legacy exception records (no `duration_minutes`) have always meant.
const DEFAULT_RESCHEDULE_MINUTES: i64 = 60;

/// Which original occurrence a reschedule replaces.
#[derive(Debug, Clone)]
pub struct OverrideTarget {
    pub exception_id: i64,
    pub course_name: String,
    pub original_date: NaiveDate,
    pub original_session_id: Option<i64>,
}

/// A materialized reschedule: the occurrence to show plus the original it
/// supersedes.
#[derive(Debug, Clone)]
pub struct Reschedule {
    pub occurrence: Occurrence,
    pub target: OverrideTarget,
}

/// Result of materializing a batch of exceptions.
#[derive(Debug, Clone, Default)]
pub struct Materialization {
    pub reschedules: Vec<Reschedule>,
    pub failures: Vec<RecordFailure>,
}

/// Materialize each exception into exactly one occurrence on its new date.
///
/// Exceptions sharing a `(course_name, original_date)` target conflict; every
/// member of such a group fails. Other validation failures (bad date or time
/// text, zero duration) are per record.
pub fn materialize_reschedules(exceptions: &[RescheduleException]) -> Materialization {
    let mut materialization = Materialization::default();

    // Count exceptions per target so duplicate groups can be rejected whole.
    let mut targets: HashMap<(&str, &str), usize> = HashMap::new();
    for exception in exceptions {
        *targets
            .entry((
                exception.course_name.as_str(),
                exception.original_date.as_str(),
            ))
            .or_insert(0) += 1;
    }

    for exception in exceptions {
        let count = targets[&(
            exception.course_name.as_str(),
            exception.original_date.as_str(),
        )];
        let result = if count > 1 {
            Err(TimetableError::ConflictingExceptions {
                course_name: exception.course_name.clone(),
                original_date: exception.original_date.clone(),
                count,
            })
        } else {
            materialize_one(exception)
        };

        match result {
            Ok(reschedule) => materialization.reschedules.push(reschedule),
            Err(err) => materialization.failures.push(RecordFailure {
                id: exception.id,
                error: err.to_string(),
            }),
        }
    }

    materialization
}

fn materialize_one(exception: &RescheduleException) -> Result<Reschedule> {
    let original_date = parse_date(&exception.original_date)?;
    let rescheduled_date = parse_date(&exception.rescheduled_date)?;
    let new_time = TimeOfDay::parse(&exception.new_time)?;

    let minutes = match exception.duration_minutes {
        Some(0) => return Err(TimetableError::ZeroDuration),
        Some(m) => i64::from(m),
        None => DEFAULT_RESCHEDULE_MINUTES,
    };

    let start = rescheduled_date.and_time(NaiveTime::MIN).and_utc()
        + Duration::hours(i64::from(new_time.hour))
        + Duration::minutes(i64::from(new_time.minute));
    let end = start + Duration::minutes(minutes);

    Ok(Reschedule {
        occurrence: Occurrence {
            id: format!("rescheduled-{}", exception.id),
            title: format!(
                "{} (Rescheduled) - Lecture Hall {}",
                exception.course_name, exception.lecture_hall_name
            ),
            start,
            end,
            origin: Origin::Rescheduled,
            detail: OccurrenceDetail {
                course_name: exception.course_name.clone(),
                branch: exception.branch.clone(),
                semester: exception.semester.clone(),
                course_code: exception.course_code.clone(),
                lecture_hall: exception.lecture_hall_name.clone(),
                day_of_week: None,
                start_time: None,
                end_time: None,
                original_date: Some(original_date),
                rescheduled_date: Some(rescheduled_date),
                new_time: Some(exception.new_time.clone()),
                reason: Some(exception.reason.clone()),
            },
        },
        target: OverrideTarget {
            exception_id: exception.id,
            course_name: exception.course_name.clone(),
            original_date,
            original_session_id: exception.original_session_id,
        },
    })
}
