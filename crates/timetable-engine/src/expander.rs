//! Weekly expansion — converts session templates into concrete occurrences.
//!
//! Each template yields one occurrence per week over a fixed window anchored
//! to an explicit reference instant. Validation failures are per record: a
//! bad session is reported and skipped, the rest of the batch still expands.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

use crate::error::{Result, TimetableError};
use crate::types::{
    day_offset, CourseSession, Occurrence, OccurrenceDetail, Origin, RecordFailure, TimeOfDay,
};

/// An expanded occurrence paired with the id of the session it came from.
///
/// The source id is what the override resolver matches foreign keys against;
/// it is dropped before the occurrence reaches the caller.
#[derive(Debug, Clone)]
pub struct SessionOccurrence {
    pub session_id: i64,
    pub occurrence: Occurrence,
}

/// Result of expanding a batch of sessions.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    pub occurrences: Vec<SessionOccurrence>,
    pub failures: Vec<RecordFailure>,
}

/// Midnight on the Sunday at or before `reference`, in UTC.
pub fn start_of_week(reference: DateTime<Utc>) -> DateTime<Utc> {
    let date = reference.date_naive();
    let days_back = i64::from(date.weekday().num_days_from_sunday());
    (date - Duration::days(days_back))
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// The validated, time-arithmetic-ready form of a session template.
struct SessionPlan {
    day_offset: i64,
    start: TimeOfDay,
    duration: Duration,
}

impl SessionPlan {
    fn validate(session: &CourseSession) -> Result<Self> {
        let day_offset = day_offset(&session.day_of_week)?;
        let start = TimeOfDay::parse(&session.start_time)?;
        let end = TimeOfDay::parse(&session.end_time)?;

        // End minus start as independent hour and minute deltas: 10:45..11:30
        // is +1h then -15m, i.e. 45 minutes. This reproduces the rendering
        // collaborator's historical arithmetic and is kept bit-for-bit; it is
        // not clock subtraction with borrowing.
        let hour_delta = i64::from(end.hour) - i64::from(start.hour);
        let minute_delta = i64::from(end.minute) - i64::from(start.minute);
        let duration = Duration::hours(hour_delta) + Duration::minutes(minute_delta);
        if duration <= Duration::zero() {
            return Err(TimetableError::NonPositiveDuration {
                start: session.start_time.clone(),
                end: session.end_time.clone(),
            });
        }

        Ok(SessionPlan {
            day_offset,
            start,
            duration,
        })
    }
}

/// Expand session templates into `sessions.len() × window_weeks` occurrences.
///
/// Week 0 starts on the Sunday at or before `reference`; each session lands
/// on its weekday at its start time within every week of the window.
/// Occurrence ids are `"{session.id}-{week}"`, so identical inputs always
/// produce identical output.
pub fn expand_sessions(
    sessions: &[CourseSession],
    window_weeks: u32,
    reference: DateTime<Utc>,
) -> Expansion {
    let week_zero = start_of_week(reference);
    let mut expansion = Expansion::default();

    for session in sessions {
        let plan = match SessionPlan::validate(session) {
            Ok(plan) => plan,
            Err(err) => {
                expansion.failures.push(RecordFailure {
                    id: session.id,
                    error: err.to_string(),
                });
                continue;
            }
        };

        for week in 0..window_weeks {
            let start = week_zero
                + Duration::weeks(i64::from(week))
                + Duration::days(plan.day_offset)
                + Duration::hours(i64::from(plan.start.hour))
                + Duration::minutes(i64::from(plan.start.minute));
            let end = start + plan.duration;

            expansion.occurrences.push(SessionOccurrence {
                session_id: session.id,
                occurrence: Occurrence {
                    id: format!("{}-{}", session.id, week),
                    title: format!(
                        "{} - Lecture Hall {}",
                        session.course_name, session.lecture_hall_name
                    ),
                    start,
                    end,
                    origin: Origin::Original,
                    detail: OccurrenceDetail {
                        course_name: session.course_name.clone(),
                        branch: session.branch.clone(),
                        semester: session.semester.clone(),
                        course_code: session.course_code.clone(),
                        lecture_hall: session.lecture_hall_name.clone(),
                        day_of_week: Some(session.day_of_week.clone()),
                        start_time: Some(session.start_time.clone()),
                        end_time: Some(session.end_time.clone()),
                        original_date: None,
                        rescheduled_date: None,
                        new_time: None,
                        reason: None,
                    },
                },
            });
        }
    }

    expansion
}
