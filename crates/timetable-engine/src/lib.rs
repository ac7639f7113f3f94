//! # timetable-engine
//!
//! Deterministic materialization of a weekly class timetable with
//! reschedule overrides.
//!
//! Two record kinds come in: recurring weekly session templates and one-off
//! reschedule exceptions. The engine expands the templates over a fixed
//! window of weeks anchored to an explicit reference instant, materializes
//! each exception on its new date, removes the originals the exceptions
//! supersede, and returns one sorted occurrence list ready for a calendar
//! widget. Records that fail validation are reported alongside the result
//! instead of aborting the batch.
//!
//! The engine is pure: no ambient clock, no I/O, no state between calls.
//! Identical inputs (including the reference instant) always produce
//! identical output.
//!
//! ## Modules
//!
//! - [`expander`] — session template → one occurrence per week in the window
//! - [`reschedule`] — exception record → one occurrence on its new date
//! - [`resolver`] — drops originals superseded by a reschedule
//! - [`assembler`] — the public entry point; merge and sort
//! - [`types`] — input records, occurrences, diagnostics, time-of-day parsing
//! - [`error`] — error types

pub mod assembler;
pub mod error;
pub mod expander;
pub mod reschedule;
pub mod resolver;
pub mod types;

pub use assembler::{assemble_timetable, DEFAULT_WINDOW_WEEKS};
pub use error::TimetableError;
pub use expander::expand_sessions;
pub use reschedule::materialize_reschedules;
pub use resolver::apply_overrides;
pub use types::{
    CourseSession, Diagnostics, Occurrence, OccurrenceDetail, Origin, RecordFailure,
    RescheduleException, TimeOfDay, Timetable,
};
