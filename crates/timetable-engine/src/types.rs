//! Input records, derived occurrence types, and time-of-day parsing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// The seven weekday names in Sunday-first order.
///
/// Session templates name their day with one of these (matched
/// case-insensitively). The index doubles as the day offset from the start
/// of the week, so `day_offset("monday") == 1`.
pub const DAYS_OF_WEEK: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Sunday-first day offset (0–6) for a weekday name.
///
/// # Errors
/// Returns `TimetableError::UnknownWeekday` when the name is not one of
/// [`DAYS_OF_WEEK`].
pub fn day_offset(day_of_week: &str) -> Result<i64> {
    DAYS_OF_WEEK
        .iter()
        .position(|d| day_of_week.eq_ignore_ascii_case(d))
        .map(|i| i as i64)
        .ok_or_else(|| TimetableError::UnknownWeekday(day_of_week.to_string()))
}

/// A wall-clock time of day parsed from "H:MM" / "HH:MM" text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    /// Parse "H:MM" or "HH:MM" text into an hour/minute pair.
    ///
    /// Hours take one or two digits (0–23), minutes exactly two (00–59).
    ///
    /// # Errors
    /// Returns `TimetableError::InvalidTime` for anything else, including
    /// missing colons, extra components, and out-of-range values.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || TimetableError::InvalidTime(text.to_string());

        let (hour_part, minute_part) = text.split_once(':').ok_or_else(invalid)?;
        if hour_part.is_empty()
            || hour_part.len() > 2
            || minute_part.len() != 2
            || !hour_part.bytes().all(|b| b.is_ascii_digit())
            || !minute_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let hour: u32 = hour_part.parse().map_err(|_| invalid())?;
        let minute: u32 = minute_part.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Ok(TimeOfDay { hour, minute })
    }
}

/// Parse a "YYYY-MM-DD" calendar date.
///
/// # Errors
/// Returns `TimetableError::InvalidDate` when the text does not parse.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| TimetableError::InvalidDate(text.to_string()))
}

/// A recurring weekly class template, owned by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSession {
    pub id: i64,
    pub course_code: String,
    pub course_name: String,
    pub branch: String,
    pub semester: String,
    pub lecture_hall_name: String,
    /// One of [`DAYS_OF_WEEK`], matched case-insensitively.
    pub day_of_week: String,
    /// "H:MM" / "HH:MM" text.
    pub start_time: String,
    /// "H:MM" / "HH:MM" text; must be strictly later than `start_time`.
    pub end_time: String,
}

/// A one-off record moving a single occurrence of a session to a new
/// date and time, owned by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescheduleException {
    pub id: i64,
    pub course_code: String,
    pub course_name: String,
    pub branch: String,
    pub semester: String,
    pub lecture_hall_name: String,
    /// Explicit foreign key to the session being overridden. Legacy records
    /// lack it and fall back to date + course-name substring matching.
    #[serde(default)]
    pub original_session_id: Option<i64>,
    /// "YYYY-MM-DD" date of the occurrence being replaced.
    pub original_date: String,
    /// "YYYY-MM-DD" date the class moves to.
    pub rescheduled_date: String,
    /// "H:MM" / "HH:MM" start time on the new date.
    pub new_time: String,
    /// Length of the moved class. Legacy records lack it; they get the
    /// historical 60-minute assumption.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub reason: String,
}

/// Whether an occurrence came from a weekly template or a reschedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Original,
    Rescheduled,
}

/// Rendering detail attached to every occurrence.
///
/// Original occurrences carry the template's weekday and time text;
/// rescheduled ones carry the move (original date, new date, new time,
/// reason). Absent fields are omitted from serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceDetail {
    pub course_name: String,
    pub branch: String,
    pub semester: String,
    pub course_code: String,
    pub lecture_hall: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rescheduled_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A concrete, dated calendar entry, ready for a calendar widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Deterministic: `"{session.id}-{week}"` or `"rescheduled-{exception.id}"`.
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub origin: Origin,
    pub detail: OccurrenceDetail,
}

/// A record that failed validation, identified by its source id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub id: i64,
    pub error: String,
}

/// Partial-failure report returned alongside the occurrence list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub failed_sessions: Vec<RecordFailure>,
    pub failed_exceptions: Vec<RecordFailure>,
    /// Exceptions whose occurrence was kept but which removed no original.
    pub unmatched_exceptions: Vec<i64>,
}

impl Diagnostics {
    /// True when every record validated and every exception found its
    /// original.
    pub fn is_clean(&self) -> bool {
        self.failed_sessions.is_empty()
            && self.failed_exceptions.is_empty()
            && self.unmatched_exceptions.is_empty()
    }
}

/// The assembled timetable: sorted occurrences plus diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    pub occurrences: Vec<Occurrence>,
    pub diagnostics: Diagnostics,
}
