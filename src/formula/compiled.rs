//! Compiled formulas: CNF clauses resolved against a feature-index table,
//! ready for repeated fast evaluation.

use crate::catalog::feature::FeatureTable;
use crate::catalog::object::CatalogObject;
use crate::error::FormulaError;
use crate::fuzzy::Fuzzy;

use super::ast::Expr;
use super::cnf::Cnf;

/// A CNF formula compiled against a fixed feature-index table.
///
/// Each clause is a vector of `(feature_index, negated)` pairs. Evaluation
/// folds literals with OR into clause values, then folds clauses with AND
/// into the formula's value, exactly mirroring the uncompiled CNF
/// structure but without any string lookups in the hot path.
#[derive(Debug, Clone)]
pub struct CompiledFormula {
    clauses: Vec<Vec<(u32, bool)>>,
}

impl CompiledFormula {
    /// Parses and compiles a formula's textual representation in one step.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::Parse`] if the text is malformed, or
    /// [`FormulaError::UnknownFeature`] if a literal references a feature
    /// id absent from `table`.
    pub fn parse(source: &str, table: &FeatureTable) -> Result<Self, FormulaError> {
        let expr = Expr::parse(source)?;
        let cnf = Cnf::from_expr(&expr);
        Self::compile(&cnf, table)
    }

    /// Resolves an already-normalized CNF formula against `table`.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::UnknownFeature`] if a literal's feature id
    /// is absent from `table`.
    pub fn compile(cnf: &Cnf, table: &FeatureTable) -> Result<Self, FormulaError> {
        let mut clauses = Vec::with_capacity(cnf.clauses.len());
        for clause in &cnf.clauses {
            let mut compiled_clause = Vec::with_capacity(clause.len());
            for literal in clause {
                let idx =
                    table
                        .index_of(&literal.id)
                        .ok_or_else(|| FormulaError::UnknownFeature {
                            id: literal.id.clone(),
                        })?;
                compiled_clause.push((idx, literal.negated));
            }
            clauses.push(compiled_clause);
        }
        Ok(Self { clauses })
    }

    /// Evaluates this formula against an object's feature values.
    ///
    /// A feature absent from the object evaluates as [`Fuzzy::UNKNOWN`] for
    /// that literal, per the usual fold rules: literals fold with OR within
    /// a clause, clauses fold with AND across the formula.
    #[must_use]
    pub fn evaluate(&self, object: &CatalogObject) -> Fuzzy {
        Fuzzy::and_all(self.clauses.iter().map(|clause| {
            Fuzzy::or_all(clause.iter().map(|&(index, negated)| {
                let literal_value = object.value(index).map_or(Fuzzy::UNKNOWN, |v| {
                    Fuzzy::new_clamped(v, 1.0 - v)
                });
                if negated {
                    literal_value.not()
                } else {
                    literal_value
                }
            }))
        }))
    }

    /// The number of clauses in the compiled formula.
    #[must_use]
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }
}
