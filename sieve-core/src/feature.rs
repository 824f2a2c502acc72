#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::{Float, Matrix, Result, SieveError, Vector};

/// One sample: a fixed-length, immutable sequence of feature values.
///
/// Position `i` carries no meaning beyond "feature `i`"; the mapping from
/// positions to e.g. vocabulary words is owned by whoever built the vector.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vector);

impl FeatureVector {
    pub fn new(values: Vec<Float>) -> Self {
        Self(Vector::from_vec(values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<Float> {
        self.0.get(i).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Float> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Float] {
        self.0.as_slice()
    }
}

impl From<Vec<Float>> for FeatureVector {
    fn from(values: Vec<Float>) -> Self {
        Self::new(values)
    }
}

impl From<&[Float]> for FeatureVector {
    fn from(values: &[Float]) -> Self {
        Self(Vector::from_vec(values.to_vec()))
    }
}

impl From<Vector> for FeatureVector {
    fn from(values: Vector) -> Self {
        Self(values)
    }
}

impl Index<usize> for FeatureVector {
    type Output = Float;

    fn index(&self, i: usize) -> &Float {
        &self.0[i]
    }
}

/// A dataset of `row_count` samples, each with exactly `column_count` features.
///
/// The uniform width is enforced once, at construction, so every consumer can
/// rely on it without re-checking. Rows are samples and columns are features,
/// matching the `(n_samples, n_features)` layout of the underlying [`Matrix`].
///
/// # Errors
///
/// - [`SieveError::EmptyInput`] if there are no rows or the rows have no features.
/// - [`SieveError::InconsistentShape`] if any row differs in length from the first.
/// - [`SieveError::IndexOutOfRange`] from [`row`](FeatureMatrix::row) and
///   [`column`](FeatureMatrix::column) for indices outside the matrix.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Matrix,
}

impl FeatureMatrix {
    /// Builds a matrix from a collection of equally sized feature vectors.
    pub fn new(vectors: &[FeatureVector]) -> Result<Self> {
        let first = vectors.first().ok_or(SieveError::EmptyInput)?;
        let width = first.len();

        if width == 0 {
            return Err(SieveError::EmptyInput);
        }

        if let Some(bad) = vectors.iter().find(|v| v.len() != width) {
            return Err(SieveError::InconsistentShape {
                expected: width,
                got: bad.len(),
            });
        }

        let data = Matrix::from_fn(vectors.len(), width, |i, j| vectors[i][j]);
        Ok(Self { data })
    }

    /// Builds a matrix from plain rows; same contract as [`new`](FeatureMatrix::new).
    pub fn from_rows(rows: Vec<Vec<Float>>) -> Result<Self> {
        let vectors: Vec<FeatureVector> = rows.into_iter().map(FeatureVector::new).collect();
        Self::new(&vectors)
    }

    pub fn row_count(&self) -> usize {
        self.data.nrows()
    }

    pub fn column_count(&self) -> usize {
        self.data.ncols()
    }

    /// Values of feature `i` across all samples, in row order.
    pub fn column(&self, i: usize) -> Result<Vec<Float>> {
        if i >= self.column_count() {
            return Err(SieveError::IndexOutOfRange {
                index: i,
                len: self.column_count(),
            });
        }

        Ok(self.data.column(i).iter().copied().collect())
    }

    /// The `i`-th sample.
    pub fn row(&self, i: usize) -> Result<FeatureVector> {
        if i >= self.row_count() {
            return Err(SieveError::IndexOutOfRange {
                index: i,
                len: self.row_count(),
            });
        }

        Ok(FeatureVector(self.data.row(i).transpose()))
    }

    pub fn rows(&self) -> impl Iterator<Item = FeatureVector> + '_ {
        self.data
            .row_iter()
            .map(|row| FeatureVector(row.transpose()))
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectors(data: Vec<Vec<Float>>) -> Vec<FeatureVector> {
        data.into_iter().map(FeatureVector::new).collect()
    }

    #[test]
    fn test_feature_matrix_shape() {
        let m = FeatureMatrix::new(&vectors(vec![
            vec![1.0, 0.0, 1.0],
            vec![0.0, 0.0, 1.0],
        ]))
        .unwrap();

        assert_eq!(m.row_count(), 2);
        assert_eq!(m.column_count(), 3);
    }

    #[test]
    fn test_feature_matrix_empty() {
        let result = FeatureMatrix::new(&[]);
        assert!(matches!(result, Err(SieveError::EmptyInput)));
    }

    #[test]
    fn test_feature_matrix_zero_width() {
        let result = FeatureMatrix::new(&vectors(vec![vec![], vec![]]));
        assert!(matches!(result, Err(SieveError::EmptyInput)));
    }

    #[test]
    fn test_feature_matrix_inconsistent_lengths() {
        let result = FeatureMatrix::new(&vectors(vec![vec![1.0, 2.0], vec![1.0]]));
        assert!(matches!(
            result,
            Err(SieveError::InconsistentShape { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_feature_matrix_column_and_row() {
        let m = FeatureMatrix::from_rows(vec![
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![5.0, 6.0],
        ])
        .unwrap();

        assert_eq!(m.column(1).unwrap(), vec![2.0, 4.0, 6.0]);
        assert_eq!(m.row(2).unwrap(), FeatureVector::new(vec![5.0, 6.0]));
        assert_eq!(m.rows().count(), 3);
    }

    #[test]
    fn test_feature_matrix_index_out_of_range() {
        let m = FeatureMatrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();

        assert!(matches!(
            m.column(2),
            Err(SieveError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            m.row(1),
            Err(SieveError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_feature_vector_access() {
        let v = FeatureVector::from(&[0.0, 1.0][..]);
        assert_eq!(v.len(), 2);
        assert_eq!(v[1], 1.0);
        assert_eq!(v.get(2), None);
        assert_eq!(v.as_slice(), &[0.0, 1.0]);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_feature_matrix_serialize_roundtrip() {
        let m = FeatureMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let json = serde_json::to_string(&m).expect("Failed to serialize");
        let back: FeatureMatrix = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(m, back);
    }
}
