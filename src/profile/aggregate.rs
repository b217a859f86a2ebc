//! Folding an ordered sequence of answers for a single need into either an
//! aggregated fuzzy value or an "independent" marker.

use super::answer::AnswerKind;
use crate::fuzzy::Fuzzy;

/// The outcome of folding one need's answer history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The most recent answer (or a `Yes`/`No`/`Unknown` run following the
    /// most recent `Independent`) aggregates to this value.
    Value(Fuzzy),
    /// The most recent answer was `Independent`: the user does not care
    /// about this need, and it is excluded from the aggregate map.
    Independent,
}

/// Folds an ordered sequence of answer kinds for one need into an
/// [`Outcome`].
///
/// An `Independent` answer clears all counts accumulated so far. A
/// subsequent `Yes`/`No`/`Unknown` answer then starts counting from zero
/// again rather than resuming the pre-`Independent` tally — each
/// `Independent` marker is a hard reset point, not a pause.
#[must_use]
pub fn fold(kinds: &[AnswerKind]) -> Option<Outcome> {
    if kinds.is_empty() {
        return None;
    }
    let mut yes = 0u32;
    let mut no = 0u32;
    let mut unknown = 0u32;
    let mut is_independent = false;

    for &kind in kinds {
        match kind {
            AnswerKind::Independent => {
                yes = 0;
                no = 0;
                unknown = 0;
                is_independent = true;
            }
            AnswerKind::Yes => {
                is_independent = false;
                yes += 1;
            }
            AnswerKind::No => {
                is_independent = false;
                no += 1;
            }
            AnswerKind::Unknown => {
                is_independent = false;
                unknown += 1;
            }
        }
    }

    if is_independent {
        return Some(Outcome::Independent);
    }

    let total = f64::from(yes + no + unknown);
    if yes + no == 0 || total == 0.0 {
        return Some(Outcome::Value(Fuzzy::UNKNOWN));
    }
    let t = f64::from(yes) / total;
    let f = f64::from(no) / total;
    Some(Outcome::Value(Fuzzy::new_clamped(t, f)))
}
