//! The serializable form of a user profile: its ordered answer log.
//!
//! The aggregate map and independent-need set are derived, cached state;
//! only the log itself is part of the wire format, so replaying a document
//! against [`super::UserProfile::from_document`] is lossless.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::answer::Answer;
use crate::error::ProfileError;

/// The only document schema version the core currently understands.
pub const CURRENT_VERSION: u32 = 1;

/// The top-level field names this document's schema recognizes, besides
/// the designated extension area (`ext`). Any other top-level field in an
/// incoming document is a [`ProfileError::Schema`] error.
const KNOWN_FIELDS: &[&str] = &["version", "answers", "ext"];

/// The wire format for a user profile: a version tag and the ordered
/// answer log.
///
/// `ext` is the designated extension area: callers may stash arbitrary
/// additional data there without tripping the strict top-level field check
/// in [`ProfileDocument::from_json`]. It round-trips losslessly but the
/// core never reads or writes its contents itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDocument {
    /// The document schema version. Always [`CURRENT_VERSION`] for
    /// documents this crate produces.
    pub version: u32,
    /// The ordered, append-only answer log.
    pub answers: Vec<Answer>,
    /// Arbitrary caller-owned data outside the core's schema.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub ext: Map<String, Value>,
}

impl Default for ProfileDocument {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            answers: Vec::new(),
            ext: Map::new(),
        }
    }
}

impl ProfileDocument {
    /// Serializes this document to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Malformed`] if serialization fails (this
    /// cannot happen for a document built by this crate, but the
    /// signature stays fallible to match [`Self::from_json`]).
    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a JSON string into a document, enforcing the exact top-level
    /// shape described in the external-interfaces contract: only
    /// `version`, `answers`, and the `ext` extension area are permitted at
    /// the top level.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Schema`] if the document contains a
    /// top-level field outside `KNOWN_FIELDS`, or [`ProfileError::Malformed`]
    /// if the JSON does not parse or `answers`/`version` have the wrong
    /// shape.
    pub fn from_json(source: &str) -> Result<Self, ProfileError> {
        let raw: Value =
            serde_json::from_str(source).map_err(|e| ProfileError::Malformed(e.to_string()))?;
        let Value::Object(fields) = &raw else {
            return Err(ProfileError::Malformed(
                "profile document must be a JSON object".to_string(),
            ));
        };
        for key in fields.keys() {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                return Err(ProfileError::Schema {
                    path: key.clone(),
                    reason: "unrecognized top-level field".to_string(),
                });
            }
        }
        serde_json::from_value(raw).map_err(|e| ProfileError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::answer::AnswerKind;

    #[test]
    fn test_default_is_empty_at_current_version() {
        let doc = ProfileDocument::default();
        assert!(doc.answers.is_empty());
        assert_eq!(doc.version, CURRENT_VERSION);
    }

    #[test]
    fn test_json_roundtrip() {
        let doc = ProfileDocument {
            version: CURRENT_VERSION,
            answers: vec![Answer::new("need:space", AnswerKind::Yes)],
            ext: Map::new(),
        };
        let json = doc.to_json().unwrap();
        let back = ProfileDocument::from_json(&json).unwrap();
        assert_eq!(back.answers.len(), 1);
        assert_eq!(back.answers[0].need_id, "need:space");
        assert_eq!(back.version, CURRENT_VERSION);
    }

    #[test]
    fn test_unknown_top_level_field_is_schema_error() {
        let json = r#"{"version":1,"answers":[],"flavor_text":"oops"}"#;
        let result = ProfileDocument::from_json(json);
        assert!(matches!(result, Err(ProfileError::Schema { .. })));
    }

    #[test]
    fn test_ext_field_is_allowed_and_preserved() {
        let json = r#"{"version":1,"answers":[],"ext":{"client_id":"abc"}}"#;
        let doc = ProfileDocument::from_json(json).unwrap();
        assert_eq!(
            doc.ext.get("client_id"),
            Some(&Value::String("abc".to_string()))
        );
    }

    #[test]
    fn test_malformed_json_is_malformed_error() {
        let result = ProfileDocument::from_json("not json");
        assert!(matches!(result, Err(ProfileError::Malformed(_))));
    }
}
