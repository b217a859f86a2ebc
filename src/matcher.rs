//! Matching catalog objects against a user profile and ranking them.

use rayon::prelude::*;

use crate::catalog::Matrix;
use crate::fuzzy::Fuzzy;
use crate::profile::UserProfile;

/// The uninformative prior score given to an object when the user has not
/// answered about any of the needs it could be scored on.
pub const UNINFORMATIVE_PRIOR: f64 = 0.5;

/// One object's score against a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// The scored object's id.
    pub object_id: String,
    /// The mean similarity over the active need set, in `[0, 1]`.
    pub score: f64,
}

/// Per-need similarity between a user's aggregated answer and an object's
/// matrix value.
///
/// `1 - 0.5 * (|tu - tm| + |fu - fm|)`. No special-casing for `CONFLICT`:
/// the formula is applied exactly as written regardless of which canonical
/// value either side holds.
#[must_use]
pub fn similarity(user: Fuzzy, object: Fuzzy) -> f64 {
    1.0 - 0.5 * ((user.truth() - object.truth()).abs() + (user.falsity() - object.falsity()).abs())
}

/// Scores a single object against a profile's active need set (the needs
/// the profile has a non-`UNKNOWN` aggregate for).
///
/// Returns [`UNINFORMATIVE_PRIOR`] if the active set is empty.
#[must_use]
pub fn score_object(matrix: &Matrix, object_index: usize, profile: &UserProfile) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
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
        total += similarity(user_value, object_value);
        count += 1;
    }
    if count == 0 {
        UNINFORMATIVE_PRIOR
    } else {
        total / count as f64
    }
}

fn score_all(matrix: &Matrix, profile: &UserProfile) -> Vec<MatchResult> {
    (0..matrix.object_count())
        .into_par_iter()
        .map(|idx| MatchResult {
            object_id: matrix.object_ids()[idx].clone(),
            score: score_object(matrix, idx, profile),
        })
        .collect()
}

fn stable_sort_by_score_desc(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.object_id.cmp(&b.object_id))
    });
}

/// Scores and ranks every catalog object against `profile`.
///
/// Ties are broken by ascending object id for a deterministic, stable
/// ordering regardless of catalog iteration order.
#[must_use]
pub fn match_all(matrix: &Matrix, profile: &UserProfile) -> Vec<MatchResult> {
    let mut results = score_all(matrix, profile);
    stable_sort_by_score_desc(&mut results);
    results
}

/// Scores every catalog object but returns only the top `limit` results.
///
/// Equivalent to `match_all(..).into_iter().take(limit)` but avoids sorting
/// the full result set when only a prefix is needed.
#[must_use]
pub fn match_fast(matrix: &Matrix, profile: &UserProfile, limit: usize) -> Vec<MatchResult> {
    match_fast_subset(matrix, profile, limit, None)
}

/// Like [`match_fast`], restricted to `breed_subset` (by object id) when
/// given. `None` scores the whole catalog, matching `match_fast`'s
/// behavior exactly.
#[must_use]
pub fn match_fast_subset(
    matrix: &Matrix,
    profile: &UserProfile,
    limit: usize,
    breed_subset: Option<&[String]>,
) -> Vec<MatchResult> {
    let mut results = match breed_subset {
        Some(ids) => {
            let allowed: std::collections::HashSet<&str> =
                ids.iter().map(String::as_str).collect();
            score_all(matrix, profile)
                .into_iter()
                .filter(|r| allowed.contains(r.object_id.as_str()))
                .collect()
        }
        None => score_all(matrix, profile),
    };
    let k = limit.min(results.len());
    if k < results.len() {
        results.select_nth_unstable_by(k.saturating_sub(1).max(0), |a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);
    }
    stable_sort_by_score_desc(&mut results);
    results
}

/// One object's score together with the per-need contributions that
/// produced it — the extended form `match_all` returns per §4.5.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedMatchResult {
    /// The scored object's id.
    pub object_id: String,
    /// The mean similarity over the active need set, in `[0, 1]`.
    pub score: f64,
    /// Per-need `(need_id, similarity, user value, object value)` tuples
    /// for every need in the active set, in matrix need order.
    pub contributions: Vec<(String, f64, Fuzzy, Fuzzy)>,
}

/// Scores and ranks every catalog object against `profile`, additionally
/// returning each object's per-need `(similarity, U[k], M[o,k])` tuples.
#[must_use]
pub fn match_all_detailed(matrix: &Matrix, profile: &UserProfile) -> Vec<DetailedMatchResult> {
    let mut results: Vec<DetailedMatchResult> = (0..matrix.object_count())
        .into_par_iter()
        .map(|idx| {
            let mut contributions = Vec::new();
            let mut total = 0.0;
            let mut count = 0usize;
            for (need_index, need_id) in matrix.need_ids().iter().enumerate() {
                let Some(user_value) = profile.aggregate(need_id) else {
                    continue;
                };
                if user_value == Fuzzy::UNKNOWN {
                    continue;
                }
                let Some(object_value) = matrix.get(idx, need_index) else {
                    continue;
                };
                let sim = similarity(user_value, object_value);
                contributions.push((need_id.clone(), sim, user_value, object_value));
                total += sim;
                count += 1;
            }
            let score = if count == 0 {
                UNINFORMATIVE_PRIOR
            } else {
                total / count as f64
            };
            DetailedMatchResult {
                object_id: matrix.object_ids()[idx].clone(),
                score,
                contributions,
            }
        })
        .collect();
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.object_id.cmp(&b.object_id))
    });
    results
}
