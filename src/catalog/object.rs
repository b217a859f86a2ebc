//! Catalog objects: the things being ranked against needs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::feature::FeatureTable;
use crate::error::Result;

/// The external, loosely-typed shape of a catalog object, as it would
/// arrive from a catalog-loading layer outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogObjectRecord {
    /// Stable object id.
    pub id: String,
    /// Feature id to value (`[0, 1]`) mapping. Features absent here are
    /// treated as unknown, not zero.
    pub features: HashMap<String, f64>,
}

/// A catalog object with its feature values resolved into a dense,
/// index-aligned array for fast formula evaluation.
#[derive(Debug, Clone)]
pub struct CatalogObject {
    id: String,
    values: Vec<Option<f64>>,
}

impl CatalogObject {
    /// Resolves a raw record's feature map into a dense array aligned to
    /// `table`'s indices, then resolves any derived bucket ids `table`
    /// carries (see [`super::feature::DerivedBucket`]) into concrete
    /// values.
    ///
    /// Feature ids present in the record but absent from `table` are
    /// silently ignored at this boundary: it is the formula compiler, not
    /// object construction, that rejects references to unknown features.
    /// A derived bucket's value is the Łukasiewicz-disjunction of its
    /// members' raw values (`min(1, Σ members)`), with a missing member
    /// contributing `0`, not `UNKNOWN` — a derived bucket is only
    /// meaningful once its members have been supplied, and members are
    /// always emitted together by a well-formed loader.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::ValueOutOfRange`] if a feature value
    /// lies outside `[0, 1]`.
    pub fn from_record(record: &CatalogObjectRecord, table: &FeatureTable) -> Result<Self> {
        let mut values = vec![None; table.len()];
        for (feature_id, &value) in &record.features {
            if !(0.0..=1.0).contains(&value) {
                return Err(crate::error::Error::ValueOutOfRange {
                    field: feature_id.clone(),
                    value,
                });
            }
            if let Some(idx) = table.index_of(feature_id) {
                values[idx as usize] = Some(value);
            }
        }
        for bucket in table.derived_buckets() {
            let Some(derived_idx) = table.index_of(&bucket.id) else {
                continue;
            };
            let sum: f64 = bucket
                .members
                .iter()
                .filter_map(|member_id| table.index_of(member_id))
                .filter_map(|idx| values[idx as usize])
                .sum();
            values[derived_idx as usize] = Some(sum.min(1.0));
        }
        Ok(Self {
            id: record.id.clone(),
            values,
        })
    }

    /// The object's stable id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The value stored for a given feature index, or `None` if the
    /// feature was never supplied for this object.
    #[must_use]
    pub fn value(&self, feature_index: u32) -> Option<f64> {
        self.values.get(feature_index as usize).copied().flatten()
    }
}
