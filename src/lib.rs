//! # needs-engine
//!
//! A domain-agnostic recommendation engine core: a 4-valued fuzzy algebra,
//! a compiled CNF formula evaluator, a precomputed object-by-need
//! satisfaction matrix, a user-profile aggregator, an adaptive question
//! selector, and a structured per-object explainer.
//!
//! The worked domain this crate was designed against is dog-breed
//! selection, but nothing in the core is domain-specific: `catalog`
//! objects, `needs`, and `features` are opaque ids to every module here.
//!
//! ## Modules
//!
//! - [`fuzzy`]: the Belnap-Lukasiewicz four-valued algebra.
//! - [`formula`]: formula parsing, CNF normalization, and compilation.
//! - [`catalog`]: feature table, needs, catalog objects, and the
//!   precomputed satisfaction matrix.
//! - [`profile`]: the append-only answer log and its derived aggregate.
//! - [`matcher`]: scoring and ranking catalog objects against a profile.
//! - [`selector`]: adaptive next-question selection.
//! - [`explain`]: structured per-object score breakdowns.
//!
//! ## Concurrency
//!
//! Once built, [`catalog::FeatureTable`], [`formula::CompiledFormula`],
//! and [`catalog::Matrix`] are immutable and `Send + Sync`: any number of
//! sessions may share them across threads without synchronization.
//! [`profile::UserProfile`] is per-session; a caller sharing one across
//! threads must serialize its own mutations.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod explain;
pub mod formula;
pub mod fuzzy;
pub mod matcher;
pub mod profile;
pub mod selector;

// Re-export commonly used types at crate root.
pub use error::{Error, FormulaError, ProfileError, Result};
pub use fuzzy::Fuzzy;

// Re-export catalog types.
pub use catalog::{
    BucketRange, CatalogObject, CatalogObjectRecord, DerivedBucket, FeatureGroup, FeatureTable,
    Matrix, Need, NeedRecord, QuestionIndex, QuestionRecord,
};

// Re-export formula types.
pub use formula::{Cnf, CompiledFormula, Expr, Literal};

// Re-export profile types.
pub use profile::{Answer, AnswerKind, ProfileDocument, UserProfile};

// Re-export matcher types.
pub use matcher::{match_all, match_all_detailed, match_fast, match_fast_subset, MatchResult};

// Re-export selector types.
pub use selector::{
    get_question_rankings, has_converged, select_next_question, split_score, QuestionCandidate,
    SelectorConfig,
};

// Re-export explain types.
pub use explain::{explain, Explanation, NeedContribution};
