//! User profiles: an append-only answer log plus its derived, cached
//! aggregate over needs.

pub mod aggregate;
pub mod answer;
pub mod document;

use std::collections::{HashMap, HashSet};

use tracing::trace;

pub use answer::{Answer, AnswerKind};
pub use document::ProfileDocument;

use crate::error::ProfileError;
use crate::fuzzy::Fuzzy;

/// A single session's consolidated view of a user's answers.
///
/// Holds the raw, ordered, append-only answer log plus a cache of the
/// derived aggregate fuzzy value per need and the set of needs the user has
/// marked independent (irrelevant to them). The cache is always kept
/// consistent with the log: every mutation recomputes exactly the one need
/// id it touched.
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    log: Vec<Answer>,
    aggregate: HashMap<String, Fuzzy>,
    independent: HashSet<String>,
}

impl UserProfile {
    /// Creates an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer and recomputes that need's cached aggregate.
    pub fn add_answer(&mut self, need_id: impl Into<String>, kind: AnswerKind) {
        let need_id = need_id.into();
        self.log.push(Answer::new(need_id.clone(), kind));
        self.recompute(&need_id);
    }

    /// Records an answer with its question text attached.
    pub fn add_answer_with_question(
        &mut self,
        need_id: impl Into<String>,
        kind: AnswerKind,
        question_text: impl Into<String>,
    ) {
        let need_id = need_id.into();
        self.log
            .push(Answer::new(need_id.clone(), kind).with_question_text(question_text));
        self.recompute(&need_id);
    }

    /// Marks a need as independent: the user does not care about it. This
    /// is recorded as an ordinary log entry (an `Independent` answer), so
    /// it participates in the same reset semantics as any other answer.
    pub fn mark_independent(&mut self, need_id: impl Into<String>) {
        self.add_answer(need_id, AnswerKind::Independent);
    }

    fn recompute(&mut self, need_id: &str) {
        let kinds: Vec<AnswerKind> = self
            .log
            .iter()
            .filter(|a| a.need_id == need_id)
            .map(|a| a.kind)
            .collect();
        match aggregate::fold(&kinds) {
            Some(aggregate::Outcome::Value(value)) => {
                self.independent.remove(need_id);
                self.aggregate.insert(need_id.to_string(), value);
                trace!(need_id, ?value, "recomputed need aggregate");
            }
            Some(aggregate::Outcome::Independent) => {
                self.aggregate.remove(need_id);
                self.independent.insert(need_id.to_string());
                trace!(need_id, "need marked independent");
            }
            None => {}
        }
    }

    /// The derived aggregate fuzzy value for a need, if the user has
    /// answered about it (and not marked it independent).
    #[must_use]
    pub fn aggregate(&self, need_id: &str) -> Option<Fuzzy> {
        self.aggregate.get(need_id).copied()
    }

    /// All needs with a cached aggregate value, paired with that value.
    /// Disjoint from [`Self::independent_need_ids`].
    pub fn needs(&self) -> impl Iterator<Item = (&str, Fuzzy)> {
        self.aggregate.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Whether a need has been marked independent.
    #[must_use]
    pub fn is_independent(&self, need_id: &str) -> bool {
        self.independent.contains(need_id)
    }

    /// All needs marked independent.
    pub fn independent_need_ids(&self) -> impl Iterator<Item = &str> {
        self.independent.iter().map(String::as_str)
    }

    /// All distinct need ids the user has ever answered about, whether
    /// currently aggregated or marked independent.
    pub fn answered_need_ids(&self) -> impl Iterator<Item = &str> {
        self.aggregate
            .keys()
            .chain(self.independent.iter())
            .map(String::as_str)
    }

    /// The raw, ordered answer log.
    #[must_use]
    pub fn log(&self) -> &[Answer] {
        &self.log
    }

    /// Serializes this profile's log into a [`ProfileDocument`].
    #[must_use]
    pub fn to_document(&self) -> ProfileDocument {
        ProfileDocument {
            answers: self.log.clone(),
            ..ProfileDocument::default()
        }
    }

    /// Replays a document's answer log to reconstruct a profile.
    #[must_use]
    pub fn from_document(document: &ProfileDocument) -> Self {
        let mut profile = Self::new();
        for answer in &document.answers {
            profile.log.push(answer.clone());
        }
        let need_ids: HashSet<String> = document
            .answers
            .iter()
            .map(|a| a.need_id.clone())
            .collect();
        for need_id in need_ids {
            profile.recompute(&need_id);
        }
        profile
    }

    /// Replays a document's answer log, rejecting any answer that
    /// references a need id absent from `known_need_ids`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::UnknownNeed`] on the first unresolved
    /// reference.
    pub fn from_document_checked(
        document: &ProfileDocument,
        known_need_ids: &HashSet<String>,
    ) -> Result<Self, ProfileError> {
        for answer in &document.answers {
            if !known_need_ids.contains(&answer.need_id) {
                return Err(ProfileError::UnknownNeed {
                    id: answer.need_id.clone(),
                });
            }
        }
        Ok(Self::from_document(document))
    }
}
