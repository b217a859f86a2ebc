//! Structured, per-object breakdown of why a ranking came out the way it
//! did.
//!
//! This module does no scoring of its own: it reads the same matrix and
//! profile the matcher and selector read, and assembles a plain data
//! carrier describing each active need's contribution to one object's
//! score. No natural-language generation happens here — a caller renders
//! `Explanation` however it likes.

use crate::catalog::Matrix;
use crate::fuzzy::Fuzzy;
use crate::matcher::similarity;
use crate::profile::UserProfile;

/// One need's contribution to an object's score.
#[derive(Debug, Clone, PartialEq)]
pub struct NeedContribution {
    /// The need id this contribution is for.
    pub need_id: String,
    /// The user's aggregated value for this need.
    pub user: Fuzzy,
    /// The object's matrix value for this need.
    pub object: Fuzzy,
    /// The similarity between `user` and `object` (see
    /// [`crate::matcher::similarity`]).
    pub similarity: f64,
}

/// The per-need breakdown of one object's score against a profile.
///
/// `breakdown` holds every active need's contribution (those where the
/// user's aggregate is neither absent nor `UNKNOWN`) other than those
/// surfaced in `conflicts`, sorted by descending similarity: the needs
/// that most support this object appear first. `conflicts` holds the
/// active needs where the user's aggregate is `CONFLICT`, in need-id
/// order; these are surfaced separately rather than ranked by similarity,
/// since the interpretation of a conflicted answer's contribution is
/// deliberately left to the caller (see the spec's open questions).
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    /// The explained object's id.
    pub object_id: String,
    /// Non-conflicted active needs, descending by similarity.
    pub breakdown: Vec<NeedContribution>,
    /// Active needs where the user's answer is `CONFLICT`.
    pub conflicts: Vec<NeedContribution>,
}

impl Explanation {
    /// The `n` needs contributing most favorably to this object's score.
    #[must_use]
    pub fn pros(&self, n: usize) -> &[NeedContribution] {
        &self.breakdown[..n.min(self.breakdown.len())]
    }

    /// The `n` needs contributing least favorably to this object's score.
    #[must_use]
    pub fn cons(&self, n: usize) -> &[NeedContribution] {
        let len = self.breakdown.len();
        &self.breakdown[len.saturating_sub(n)..]
    }
}

/// Builds the per-need explanation for one catalog object, identified by
/// its index into `matrix`.
///
/// Returns `None` if `object_index` is out of range for `matrix`.
#[must_use]
pub fn explain(matrix: &Matrix, profile: &UserProfile, object_index: usize) -> Option<Explanation> {
    if object_index >= matrix.object_count() {
        return None;
    }
    let object_id = matrix.object_ids()[object_index].clone();

    let mut breakdown = Vec::new();
    let mut conflicts = Vec::new();

    for (need_index, need_id) in matrix.need_ids().iter().enumerate() {
        let Some(user_value) = profile.aggregate(need_id) else {
            continue;
        };
        if user_value == Fuzzy::UNKNOWN {
            continue;
        }
        let Some(object_value) = matrix.get(object_index, need_index) else {
            continue;
        };
        let contribution = NeedContribution {
            need_id: need_id.clone(),
            user: user_value,
            object: object_value,
            similarity: similarity(user_value, object_value),
        };
        if user_value == Fuzzy::CONFLICT {
            conflicts.push(contribution);
        } else {
            breakdown.push(contribution);
        }
    }

    breakdown.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.need_id.cmp(&b.need_id))
    });

    Some(Explanation {
        object_id,
        breakdown,
        conflicts,
    })
}
