//! Error types for timetable materialization.

use thiserror::Error;

/// Per-record validation and conflict errors.
///
/// None of these abort a batch: the pipeline collects them per offending
/// record and keeps going (see [`crate::types::Diagnostics`]).
#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("invalid time {0:?}: expected \"H:MM\" or \"HH:MM\"")]
    InvalidTime(String),

    #[error("invalid date {0:?}: expected \"YYYY-MM-DD\"")]
    InvalidDate(String),

    #[error("unknown weekday {0:?}")]
    UnknownWeekday(String),

    #[error("end time {end} is not after start time {start}")]
    NonPositiveDuration { start: String, end: String },

    #[error("rescheduled duration must be at least one minute")]
    ZeroDuration,

    #[error("{count} exceptions target {course_name} on {original_date}")]
    ConflictingExceptions {
        course_name: String,
        original_date: String,
        count: usize,
    },
}

pub type Result<T> = std::result::Result<T, TimetableError>;
