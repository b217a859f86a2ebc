//! A single answer in a user's append-only answer log.

use serde::{Deserialize, Serialize};

/// The kind of answer a user gave for a need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    /// The user confirmed the need.
    Yes,
    /// The user denied the need.
    No,
    /// The user answered, but without confidence either way.
    Unknown,
    /// The user declared this need irrelevant to them. Overrides and
    /// removes the need from the aggregate map; a later `Yes`/`No` answer
    /// for the same need starts a fresh aggregation rather than resuming
    /// the one before this marker.
    Independent,
}

/// One entry in a user profile's ordered answer log.
///
/// Field names on the wire match the external-interfaces contract exactly
/// (`answer` rather than `kind`, `question` rather than `question_text`),
/// while the in-memory struct keeps the more descriptive Rust names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// The need this answer addresses.
    pub need_id: String,
    /// The kind of answer given.
    #[serde(rename = "answer")]
    pub kind: AnswerKind,
    /// The question text shown to the user, if tracked.
    #[serde(rename = "question", skip_serializing_if = "Option::is_none", default)]
    pub question_text: Option<String>,
    /// When this answer was recorded, if the caller supplied one. The
    /// core never reads this field itself; it passes through unchanged.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub timestamp: Option<String>,
}

impl Answer {
    /// Constructs a new answer.
    #[must_use]
    pub fn new(need_id: impl Into<String>, kind: AnswerKind) -> Self {
        Self {
            need_id: need_id.into(),
            kind,
            question_text: None,
            timestamp: None,
        }
    }

    /// Attaches the question text that was shown to the user.
    #[must_use]
    pub fn with_question_text(mut self, text: impl Into<String>) -> Self {
        self.question_text = Some(text.into());
        self
    }

    /// Attaches a caller-supplied timestamp, passed through unchanged.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_question_text() {
        let answer = Answer::new("need:space", AnswerKind::Yes);
        assert_eq!(answer.need_id, "need:space");
        assert_eq!(answer.kind, AnswerKind::Yes);
        assert_eq!(answer.question_text, None);
    }

    #[test]
    fn test_with_question_text_sets_it() {
        let answer =
            Answer::new("need:space", AnswerKind::No).with_question_text("Do you have a yard?");
        assert_eq!(
            answer.question_text,
            Some("Do you have a yard?".to_string())
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let answer = Answer::new("need:space", AnswerKind::Independent);
        let json = serde_json::to_string(&answer).unwrap();
        let back: Answer = serde_json::from_str(&json).unwrap();
        assert_eq!(back.need_id, answer.need_id);
        assert_eq!(back.kind, answer.kind);
    }

    #[test]
    fn test_wire_field_names_match_external_contract() {
        let answer = Answer::new("need:space", AnswerKind::Yes)
            .with_question_text("Do you have a yard?")
            .with_timestamp("2026-07-28T00:00:00Z");
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["need_id"], "need:space");
        assert_eq!(json["answer"], "yes");
        assert_eq!(json["question"], "Do you have a yard?");
        assert_eq!(json["timestamp"], "2026-07-28T00:00:00Z");
        assert!(json.get("kind").is_none());
        assert!(json.get("question_text").is_none());
    }

    #[test]
    fn test_timestamp_and_question_are_optional_on_read() {
        let json = r#"{"need_id":"need:space","answer":"no"}"#;
        let answer: Answer = serde_json::from_str(json).unwrap();
        assert_eq!(answer.question_text, None);
        assert_eq!(answer.timestamp, None);
    }
}
