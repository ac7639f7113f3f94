//! Pipeline orchestration — expand, materialize, resolve, sort.

use chrono::{DateTime, Utc};

use crate::expander::expand_sessions;
use crate::reschedule::materialize_reschedules;
use crate::resolver::apply_overrides;
use crate::types::{CourseSession, Diagnostics, RescheduleException, Timetable};

/// How many weeks ahead a timetable covers when the caller has no opinion.
pub const DEFAULT_WINDOW_WEEKS: u32 = 4;

/// Assemble the final timetable from templates and exceptions.
///
/// Runs the expander and materializer independently, reconciles their output
/// through the override resolver, then sorts by start instant with ties
/// broken by id so identical inputs always produce identical output. Records
/// that failed validation and exceptions that matched no original are
/// reported in the diagnostics instead of aborting the batch.
///
/// `reference` anchors week 0 of the window; pass a frozen instant to make
/// the result reproducible.
pub fn assemble_timetable(
    sessions: &[CourseSession],
    exceptions: &[RescheduleException],
    window_weeks: u32,
    reference: DateTime<Utc>,
) -> Timetable {
    let expansion = expand_sessions(sessions, window_weeks, reference);
    let materialization = materialize_reschedules(exceptions);
    let mut resolution = apply_overrides(expansion.occurrences, materialization.reschedules);

    resolution
        .occurrences
        .sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    resolution.unmatched.sort_unstable();

    Timetable {
        occurrences: resolution.occurrences,
        diagnostics: Diagnostics {
            failed_sessions: expansion.failures,
            failed_exceptions: materialization.failures,
            unmatched_exceptions: resolution.unmatched,
        },
    }
}
