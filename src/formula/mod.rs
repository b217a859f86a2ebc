//! Formula parsing, CNF normalization, and compilation.
//!
//! A need's formula starts as text (`energy & ~small`), is parsed into an
//! [`ast::Expr`] tree, normalized into [`cnf::Cnf`], and finally compiled
//! against a [`crate::catalog::feature::FeatureTable`] into a
//! [`compiled::CompiledFormula`] that evaluates directly against catalog
//! objects with no further string lookups.

pub mod ast;
pub mod cnf;
pub mod compiled;

pub use ast::Expr;
pub use cnf::{Cnf, Literal};
pub use compiled::CompiledFormula;
