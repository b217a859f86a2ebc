//! Adaptive question selection: picking the pending need whose answer would
//! most reshuffle the current ranking.

use rayon::prelude::*;
use tracing::debug;

use crate::catalog::{Matrix, QuestionIndex};
use crate::fuzzy::Fuzzy;
use crate::matcher::{self, MatchResult, UNINFORMATIVE_PRIOR};
use crate::profile::UserProfile;

/// Tuning for the question selector.
#[derive(Debug, Clone, Copy)]
pub struct SelectorConfig {
    /// Below this split score, no pending question is considered worth
    /// asking (see [`has_converged`]). Advisory only: callers may keep
    /// asking questions past this point, or stop sooner.
    pub epsilon: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self { epsilon: 0.01 }
    }
}

impl SelectorConfig {
    /// Creates a config with the given epsilon.
    #[must_use]
    pub const fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }
}

/// A pending need scored by how much asking about it would split the
/// ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCandidate {
    /// The need id the question would address.
    pub need_id: String,
    /// The mean absolute score delta a `Yes` vs `No` answer would induce
    /// across the catalog.
    pub split_score: f64,
}

fn score_object_with_override(
    matrix: &Matrix,
    object_index: usize,
    profile: &UserProfile,
    override_need_id: &str,
    override_value: Fuzzy,
) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for (need_index, need_id) in matrix.need_ids().iter().enumerate() {
        let user_value = if need_id == override_need_id {
            Some(override_value)
        } else {
            profile.aggregate(need_id)
        };
        let Some(user_value) = user_value else {
            continue;
        };
        if user_value == Fuzzy::UNKNOWN {
            continue;
        }
        let Some(object_value) = matrix.get(object_index, need_index) else {
            continue;
        };
        total += matcher::similarity(user_value, object_value);
        count += 1;
    }
    if count == 0 {
        UNINFORMATIVE_PRIOR
    } else {
        total / count as f64
    }
}

/// The needs the profile has neither aggregated nor marked independent,
/// restricted to those with at least one generated question, in the
/// catalog's original need order.
fn pending_need_ids<'a>(
    matrix: &'a Matrix,
    profile: &UserProfile,
    questions: &QuestionIndex,
) -> Vec<&'a str> {
    matrix
        .need_ids()
        .iter()
        .map(String::as_str)
        .filter(|id| {
            profile.aggregate(id).is_none()
                && !profile.is_independent(id)
                && questions.has_question(id)
        })
        .collect()
}

/// The split score for a single candidate need: the mean, over every
/// catalog object, of the absolute difference between that object's score
/// under a hypothetical `Yes` answer and under a hypothetical `No` answer,
/// with every other need's current aggregate held fixed.
///
/// Returns `0.0` for a need with no generated question in `questions`: a
/// need nothing can ever ask about contributes no actionable split.
#[must_use]
pub fn split_score(
    matrix: &Matrix,
    profile: &UserProfile,
    questions: &QuestionIndex,
    need_id: &str,
) -> f64 {
    if matrix.object_count() == 0 || !questions.has_question(need_id) {
        return 0.0;
    }
    let total: f64 = (0..matrix.object_count())
        .into_par_iter()
        .map(|idx| {
            let s_true =
                score_object_with_override(matrix, idx, profile, need_id, Fuzzy::TRUE);
            let s_false =
                score_object_with_override(matrix, idx, profile, need_id, Fuzzy::FALSE);
            (s_true - s_false).abs()
        })
        .sum();
    total / matrix.object_count() as f64
}

/// Ranks every pending need by split score, highest first, ties broken by
/// the need's original position in the catalog.
///
/// When `top_k` is `Some`, only the leading slice of that size is
/// returned; `None` returns the full ordered list.
#[must_use]
pub fn get_question_rankings(
    matrix: &Matrix,
    profile: &UserProfile,
    questions: &QuestionIndex,
    top_k: Option<usize>,
) -> Vec<QuestionCandidate> {
    let pending = pending_need_ids(matrix, profile, questions);
    let mut candidates: Vec<QuestionCandidate> = pending
        .iter()
        .map(|&need_id| QuestionCandidate {
            need_id: need_id.to_string(),
            split_score: split_score(matrix, profile, questions, need_id),
        })
        .collect();

    // Stable sort preserves the original (catalog) order for ties.
    candidates.sort_by(|a, b| {
        b.split_score
            .partial_cmp(&a.split_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    if let Some(k) = top_k {
        candidates.truncate(k);
    }
    candidates
}

/// Selects the single best next question to ask: the pending need with the
/// greatest split score, ties broken by original need order.
///
/// Returns `None` when there is no pending need left to ask about — this is
/// a distinguished, non-error empty result, not a failure.
#[must_use]
pub fn select_next_question(
    matrix: &Matrix,
    profile: &UserProfile,
    questions: &QuestionIndex,
) -> Option<QuestionCandidate> {
    let pending = pending_need_ids(matrix, profile, questions);
    if pending.is_empty() {
        debug!("no pending needs left to ask about");
        return None;
    }

    let mut best: Option<QuestionCandidate> = None;
    for need_id in pending {
        let score = split_score(matrix, profile, questions, need_id);
        let is_better = best
            .as_ref()
            .is_none_or(|current| score > current.split_score);
        if is_better {
            best = Some(QuestionCandidate {
                need_id: need_id.to_string(),
                split_score: score,
            });
        }
    }
    best
}

/// Advisory convergence check: true when no pending question would induce
/// a split score of at least `config.epsilon`.
///
/// A `true` result does not mean further answers are useless, only that
/// none of the remaining candidates looks likely to meaningfully reshuffle
/// the ranking; callers may still choose to keep asking.
#[must_use]
pub fn has_converged(
    matrix: &Matrix,
    profile: &UserProfile,
    questions: &QuestionIndex,
    config: &SelectorConfig,
) -> bool {
    select_next_question(matrix, profile, questions)
        .is_none_or(|candidate| candidate.split_score < config.epsilon)
}

/// Advisory convergence check: true when the top `k` object ids are
/// identical, in order, between two rankings taken before and after an
/// answer.
#[must_use]
pub fn top_k_stable(before: &[MatchResult], after: &[MatchResult], k: usize) -> bool {
    let ids_before: Vec<&str> = before.iter().take(k).map(|r| r.object_id.as_str()).collect();
    let ids_after: Vec<&str> = after.iter().take(k).map(|r| r.object_id.as_str()).collect();
    ids_before == ids_after
}
