//! Questions: the UI-facing prompts a need's id may be linked to.
//!
//! The core uses only the need-id linkage: [`crate::selector`] restricts
//! its candidates to needs that have at least one [`QuestionRecord`] (see
//! [`QuestionIndex`]). The rest of a question's fields pass through
//! unchanged and carry no evaluation semantics of their own.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A question offered to the user for a given need.
///
/// Zero or more of these may exist per need id; the core does not require
/// exactly one, and does not interpret `text`, `style`, or `verification`
/// beyond storing and returning them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Stable question id.
    pub id: String,
    /// The need id this question addresses.
    pub need_id: String,
    /// The question text shown to the user, passed through unchanged.
    pub text: String,
    /// A weight hint; stored but never applied by the core (see the
    /// aggregation and matcher modules, and `Need::weight`).
    pub weight: f64,
    /// A UI rendering hint (e.g. `"yes_no"`, `"slider"`), opaque to the
    /// core.
    pub style: String,
    /// An opaque verification hint describing how an answer to this
    /// question should be checked upstream; the core does not interpret
    /// it.
    pub verification: Option<String>,
}

impl QuestionRecord {
    /// Constructs a question record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        need_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            need_id: need_id.into(),
            text: text.into(),
            weight: 1.0,
            style: "yes_no".to_string(),
            verification: None,
        }
    }
}

/// The set of need ids that have at least one generated question.
///
/// [`crate::selector`] restricts its candidates to this set: a need with a
/// compiled formula but no associated question is never offered as "the
/// next question to ask", since there is nothing to show the user.
#[derive(Debug, Clone, Default)]
pub struct QuestionIndex {
    need_ids: HashSet<String>,
}

impl QuestionIndex {
    /// Builds an index from a list of question records, keyed by the need
    /// id each one addresses. Needs with zero associated records are
    /// simply absent from the index.
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a QuestionRecord>) -> Self {
        Self {
            need_ids: records.into_iter().map(|q| q.need_id.clone()).collect(),
        }
    }

    /// Whether `need_id` has at least one generated question.
    #[must_use]
    pub fn has_question(&self, need_id: &str) -> bool {
        self.need_ids.contains(need_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_default_style_and_weight() {
        let question = QuestionRecord::new("q:1", "need:space", "Do you have a yard?");
        assert_eq!(question.style, "yes_no");
        assert!((question.weight - 1.0).abs() < 1e-9);
        assert_eq!(question.verification, None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let question = QuestionRecord::new("q:1", "need:space", "Do you have a yard?");
        let json = serde_json::to_string(&question).unwrap();
        let back: QuestionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, question.id);
        assert_eq!(back.need_id, question.need_id);
        assert_eq!(back.text, question.text);
    }

    #[test]
    fn test_question_index_has_question_for_linked_need() {
        let questions = vec![QuestionRecord::new("q:1", "need:space", "Do you have a yard?")];
        let index = QuestionIndex::from_records(&questions);
        assert!(index.has_question("need:space"));
        assert!(!index.has_question("need:grooming"));
    }

    #[test]
    fn test_question_index_empty_when_no_records() {
        let index = QuestionIndex::from_records(&[]);
        assert!(!index.has_question("need:space"));
    }

    #[test]
    fn test_question_index_multiple_questions_same_need() {
        let questions = vec![
            QuestionRecord::new("q:1", "need:space", "Do you have a yard?"),
            QuestionRecord::new("q:2", "need:space", "Do you live in an apartment?"),
        ];
        let index = QuestionIndex::from_records(&questions);
        assert!(index.has_question("need:space"));
    }
}
