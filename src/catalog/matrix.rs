//! The dense object-by-need satisfaction matrix.

use rayon::prelude::*;
use tracing::debug;

use super::need::Need;
use super::object::CatalogObject;
use crate::fuzzy::Fuzzy;

/// A dense, immutable `object x need` matrix of fuzzy satisfaction values.
///
/// Storage is need-major: all objects for a given need are contiguous, so
/// the question selector's per-need sweep over every object (see
/// [`crate::selector`]) stays cache-friendly. Once built, a `Matrix` holds
/// no references to the catalog or needs it was built from and can be
/// shared freely across sessions.
#[derive(Debug, Clone)]
pub struct Matrix {
    object_ids: Vec<String>,
    need_ids: Vec<String>,
    // need-major: data[need_index * num_objects + object_index]
    data: Vec<Fuzzy>,
}

impl Matrix {
    /// Builds the matrix by evaluating every need's formula against every
    /// catalog object.
    ///
    /// The per-need rows are computed in parallel; evaluation itself does
    /// no I/O and allocates no shared state, so this is safe to call from
    /// any thread.
    #[must_use]
    pub fn build(objects: &[CatalogObject], needs: &[Need]) -> Self {
        debug!(
            objects = objects.len(),
            needs = needs.len(),
            "building satisfaction matrix"
        );
        let num_objects = objects.len();
        let rows: Vec<Vec<Fuzzy>> = needs
            .par_iter()
            .map(|need| {
                objects
                    .iter()
                    .map(|object| need.formula().evaluate(object))
                    .collect()
            })
            .collect();

        let mut data = Vec::with_capacity(num_objects * needs.len());
        for row in rows {
            data.extend(row);
        }

        Self {
            object_ids: objects.iter().map(|o| o.id().to_string()).collect(),
            need_ids: needs.iter().map(|n| n.id().to_string()).collect(),
            data,
        }
    }

    /// The number of catalog objects represented.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.object_ids.len()
    }

    /// The number of needs represented.
    #[must_use]
    pub fn need_count(&self) -> usize {
        self.need_ids.len()
    }

    /// The object ids, in the order used for indexing.
    #[must_use]
    pub fn object_ids(&self) -> &[String] {
        &self.object_ids
    }

    /// The need ids, in the order used for indexing.
    #[must_use]
    pub fn need_ids(&self) -> &[String] {
        &self.need_ids
    }

    /// Looks up the satisfaction value for `(object_index, need_index)`.
    ///
    /// Returns `None` if either index is out of range.
    #[must_use]
    pub fn get(&self, object_index: usize, need_index: usize) -> Option<Fuzzy> {
        if object_index >= self.object_ids.len() || need_index >= self.need_ids.len() {
            return None;
        }
        let offset = need_index * self.object_ids.len() + object_index;
        self.data.get(offset).copied()
    }

    /// Returns the full row of values for a given need, one per object in
    /// object-index order. This is the contiguous, cache-friendly sweep the
    /// need-major layout is for.
    #[must_use]
    pub fn row(&self, need_index: usize) -> Option<&[Fuzzy]> {
        if need_index >= self.need_ids.len() {
            return None;
        }
        let num_objects = self.object_ids.len();
        let start = need_index * num_objects;
        self.data.get(start..start + num_objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::feature::FeatureTable;
    use crate::catalog::need::NeedRecord;
    use crate::catalog::object::CatalogObjectRecord;
    use std::collections::HashMap;

    fn fixture() -> (Vec<CatalogObject>, Vec<Need>) {
        let table = FeatureTable::new(["energy".to_string()]).unwrap();
        let objects = vec![
            CatalogObject::from_record(
                &CatalogObjectRecord {
                    id: "obj:a".to_string(),
                    features: HashMap::from([("energy".to_string(), 1.0)]),
                },
                &table,
            )
            .unwrap(),
            CatalogObject::from_record(
                &CatalogObjectRecord {
                    id: "obj:b".to_string(),
                    features: HashMap::from([("energy".to_string(), 0.0)]),
                },
                &table,
            )
            .unwrap(),
        ];
        let needs = vec![
            Need::from_record(
                &NeedRecord {
                    id: "need:active".to_string(),
                    name: "Active".to_string(),
                    block: "lifestyle".to_string(),
                    weight: 1.0,
                    formula: "energy".to_string(),
                },
                &table,
            )
            .unwrap(),
        ];
        (objects, needs)
    }

    #[test]
    fn test_build_dimensions() {
        let (objects, needs) = fixture();
        let matrix = Matrix::build(&objects, &needs);
        assert_eq!(matrix.object_count(), 2);
        assert_eq!(matrix.need_count(), 1);
    }

    #[test]
    fn test_get_matches_direct_evaluation() {
        let (objects, needs) = fixture();
        let matrix = Matrix::build(&objects, &needs);
        assert_eq!(matrix.get(0, 0), Some(Fuzzy::TRUE));
        assert_eq!(matrix.get(1, 0), Some(Fuzzy::FALSE));
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let (objects, needs) = fixture();
        let matrix = Matrix::build(&objects, &needs);
        assert_eq!(matrix.get(10, 0), None);
        assert_eq!(matrix.get(0, 10), None);
    }

    #[test]
    fn test_row_is_contiguous_need_slice() {
        let (objects, needs) = fixture();
        let matrix = Matrix::build(&objects, &needs);
        let row = matrix.row(0).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row[0], Fuzzy::TRUE);
        assert_eq!(row[1], Fuzzy::FALSE);
    }

    #[test]
    fn test_empty_catalog_builds_empty_matrix() {
        let matrix = Matrix::build(&[], &[]);
        assert_eq!(matrix.object_count(), 0);
        assert_eq!(matrix.need_count(), 0);
    }
}
