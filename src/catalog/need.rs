//! Needs: the things a catalog object is evaluated against.

use serde::{Deserialize, Serialize};

use super::feature::FeatureTable;
use crate::error::FormulaError;
use crate::formula::CompiledFormula;

/// The external, loosely-typed shape of a need, as it would arrive from a
/// needs-loading layer outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeedRecord {
    /// Stable need id.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// UI grouping tag.
    pub block: String,
    /// A weight hint; the core stores it but never applies it itself (see
    /// the aggregation and matcher modules).
    pub weight: f64,
    /// The need's formula, in infix `& | ~ ( )` text form.
    pub formula: String,
}

/// A need with its formula compiled against a feature table.
#[derive(Debug, Clone)]
pub struct Need {
    id: String,
    name: String,
    block: String,
    weight: f64,
    formula: CompiledFormula,
}

impl Need {
    /// Compiles a raw record's formula text against `table`.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError`] if the formula text fails to parse or
    /// references an unknown feature.
    pub fn from_record(record: &NeedRecord, table: &FeatureTable) -> Result<Self, FormulaError> {
        let formula = CompiledFormula::parse(&record.formula, table)?;
        Ok(Self {
            id: record.id.clone(),
            name: record.name.clone(),
            block: record.block.clone(),
            weight: record.weight,
            formula,
        })
    }

    /// The need's stable id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The need's human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The need's UI grouping tag.
    #[must_use]
    pub fn block(&self) -> &str {
        &self.block
    }

    /// The need's weight hint. The core never applies this itself.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The need's compiled formula.
    #[must_use]
    pub fn formula(&self) -> &CompiledFormula {
        &self.formula
    }
}
