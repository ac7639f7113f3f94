//! Override resolution — removes originals that a reschedule supersedes.
//!
//! Reschedule occurrences are always kept; an exception that matches no
//! original is an orphan and gets reported, not dropped.

use crate::expander::SessionOccurrence;
use crate::reschedule::{OverrideTarget, Reschedule};
use crate::types::Occurrence;

/// Result of reconciling expanded originals with materialized reschedules.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub occurrences: Vec<Occurrence>,
    /// Exception ids that superseded no original.
    pub unmatched: Vec<i64>,
}

/// Whether `target` replaces this expanded occurrence.
///
/// The calendar date must match in every case. With a foreign key the match
/// is exact; without one we fall back to the historical course-name
/// substring test, which can over-match when one course name contains
/// another on the same date.
fn supersedes(target: &OverrideTarget, original: &SessionOccurrence) -> bool {
    if original.occurrence.start.date_naive() != target.original_date {
        return false;
    }
    match target.original_session_id {
        Some(session_id) => session_id == original.session_id,
        None => original.occurrence.title.contains(&target.course_name),
    }
}

/// Drop every original a reschedule supersedes, then append all reschedule
/// occurrences. Output order is whatever the inputs produced; the assembler
/// sorts.
pub fn apply_overrides(
    originals: Vec<SessionOccurrence>,
    reschedules: Vec<Reschedule>,
) -> Resolution {
    let mut matched = vec![false; reschedules.len()];
    let mut occurrences = Vec::with_capacity(originals.len() + reschedules.len());

    for original in originals {
        let mut superseded = false;
        for (i, reschedule) in reschedules.iter().enumerate() {
            if supersedes(&reschedule.target, &original) {
                matched[i] = true;
                superseded = true;
            }
        }
        if !superseded {
            occurrences.push(original.occurrence);
        }
    }

    let mut unmatched = Vec::new();
    for (reschedule, was_matched) in reschedules.into_iter().zip(matched) {
        if !was_matched {
            unmatched.push(reschedule.target.exception_id);
        }
        occurrences.push(reschedule.occurrence);
    }

    Resolution {
        occurrences,
        unmatched,
    }
}
