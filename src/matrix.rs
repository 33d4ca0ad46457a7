//! # Matrix
//!
//! Dense and sparse pairwise distance representations consumed by the
//! ECDF engine. Rows are target sequences, columns are reference
//! sequences, entries are nonnegative distances.

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use ndarray::{Array1, ArrayView2};
use ordered_float::OrderedFloat;

/// CSR-style sparse matrix of nonnegative distances.
///
/// Only nonzero entries are stored; every unstored entry is an implicit
/// distance of 0 in this encoding. Row `i` occupies
/// `indices[indptr[i]..indptr[i + 1]]` / `data[indptr[i]..indptr[i + 1]]`.
#[derive(Clone, Debug)]
pub struct SparseDistances {
  nrows: usize,
  ncols: usize,
  indptr: Vec<usize>,
  indices: Vec<usize>,
  data: Vec<f64>,
}

impl SparseDistances {
  /// Assemble from `(row, col, distance)` triplets.
  ///
  /// Zero-valued triplets are dropped (the encoding keeps nonzero
  /// entries only). Duplicate `(row, col)` positions, out-of-bounds
  /// indices and negative or non-finite distances are rejected.
  pub fn from_triplets(
    nrows: usize,
    ncols: usize,
    triplets: &[(usize, usize, f64)],
  ) -> Result<Self> {
    let mut entries = Vec::with_capacity(triplets.len());
    for &(row, col, value) in triplets {
      if row >= nrows || col >= ncols {
        bail!(
          "triplet position ({row}, {col}) is out of bounds for a {nrows}x{ncols} matrix"
        );
      }
      if !value.is_finite() || value < 0.0 {
        bail!("distance at ({row}, {col}) must be finite and nonnegative, got {value}");
      }
      if value != 0.0 {
        entries.push((row, col, value));
      }
    }
    entries.sort_by_key(|&(row, col, _)| (row, col));
    for pair in entries.windows(2) {
      if pair[0].0 == pair[1].0 && pair[0].1 == pair[1].1 {
        bail!("duplicate entry at position ({}, {})", pair[0].0, pair[0].1);
      }
    }

    let mut indptr = vec![0usize; nrows + 1];
    let mut indices = Vec::with_capacity(entries.len());
    let mut data = Vec::with_capacity(entries.len());
    for (row, col, value) in entries {
      indptr[row + 1] += 1;
      indices.push(col);
      data.push(value);
    }
    for i in 0..nrows {
      indptr[i + 1] += indptr[i];
    }

    Ok(Self {
      nrows,
      ncols,
      indptr,
      indices,
      data,
    })
  }

  /// Sparse encoding of a dense matrix: keeps the nonzero entries.
  pub fn from_dense(pw: ArrayView2<'_, f64>) -> Result<Self> {
    let (nrows, ncols) = pw.dim();
    let triplets: Vec<(usize, usize, f64)> = pw
      .indexed_iter()
      .filter(|&(_, &value)| value != 0.0)
      .map(|((row, col), &value)| (row, col, value))
      .collect();
    Self::from_triplets(nrows, ncols, &triplets)
  }

  pub fn nrows(&self) -> usize {
    self.nrows
  }

  pub fn ncols(&self) -> usize {
    self.ncols
  }

  /// Number of stored entries.
  pub fn nnz(&self) -> usize {
    self.data.len()
  }

  /// Column indices and stored distances of row `i`.
  pub fn row(&self, i: usize) -> (&[usize], &[f64]) {
    let span = self.indptr[i]..self.indptr[i + 1];
    (&self.indices[span.clone()], &self.data[span])
  }
}

/// Borrowed view over either distance representation. The ECDF engine
/// never takes ownership of the matrix.
#[derive(Clone, Copy, Debug)]
pub enum DistanceMatrix<'a> {
  Dense(ArrayView2<'a, f64>),
  Sparse(&'a SparseDistances),
}

impl DistanceMatrix<'_> {
  pub fn nrows(&self) -> usize {
    match self {
      Self::Dense(m) => m.nrows(),
      Self::Sparse(s) => s.nrows(),
    }
  }

  pub fn ncols(&self) -> usize {
    match self {
      Self::Dense(m) => m.ncols(),
      Self::Sparse(s) => s.ncols(),
    }
  }

  /// Sorted distinct distance values, used for threshold auto-derivation.
  ///
  /// For a sparse matrix only the stored (nonzero) values are scanned;
  /// the implicit zeros never enter the derived threshold grid even
  /// though the denominator of the counting pass still covers them.
  pub fn unique_values(&self) -> Array1<f64> {
    let mut seen = BTreeSet::new();
    match self {
      Self::Dense(m) => {
        for &value in m.iter() {
          seen.insert(OrderedFloat(value));
        }
      }
      Self::Sparse(s) => {
        for &value in &s.data {
          seen.insert(OrderedFloat(value));
        }
      }
    }
    seen.into_iter().map(OrderedFloat::into_inner).collect()
  }
}

impl<'a> From<ArrayView2<'a, f64>> for DistanceMatrix<'a> {
  fn from(pw: ArrayView2<'a, f64>) -> Self {
    Self::Dense(pw)
  }
}

impl<'a> From<&'a ndarray::Array2<f64>> for DistanceMatrix<'a> {
  fn from(pw: &'a ndarray::Array2<f64>) -> Self {
    Self::Dense(pw.view())
  }
}

impl<'a> From<&'a SparseDistances> for DistanceMatrix<'a> {
  fn from(pw: &'a SparseDistances) -> Self {
    Self::Sparse(pw)
  }
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::{DistanceMatrix, SparseDistances};

  #[test]
  fn from_triplets_builds_csr_rows() {
    let sp = SparseDistances::from_triplets(
      3,
      4,
      &[(1, 2, 5.0), (0, 0, 1.0), (1, 0, 3.0), (2, 3, 2.0)],
    )
    .unwrap();
    assert_eq!(sp.nnz(), 4);
    assert_eq!(sp.row(0), (&[0usize][..], &[1.0][..]));
    assert_eq!(sp.row(1), (&[0usize, 2][..], &[3.0, 5.0][..]));
    assert_eq!(sp.row(2), (&[3usize][..], &[2.0][..]));
  }

  #[test]
  fn from_triplets_drops_explicit_zeros() {
    let sp = SparseDistances::from_triplets(2, 2, &[(0, 0, 0.0), (1, 1, 4.0)]).unwrap();
    assert_eq!(sp.nnz(), 1);
    let (cols, vals) = sp.row(0);
    assert!(cols.is_empty() && vals.is_empty());
  }

  #[test]
  fn from_triplets_rejects_bad_input() {
    assert!(SparseDistances::from_triplets(2, 2, &[(2, 0, 1.0)]).is_err());
    assert!(SparseDistances::from_triplets(2, 2, &[(0, 0, -1.0)]).is_err());
    assert!(SparseDistances::from_triplets(2, 2, &[(0, 0, f64::NAN)]).is_err());
    assert!(SparseDistances::from_triplets(2, 2, &[(0, 1, 1.0), (0, 1, 2.0)]).is_err());
  }

  #[test]
  fn from_dense_round_trips_nonzeros() {
    let pw = array![[0.0, 1.0, 2.0], [3.0, 0.0, 0.5]];
    let sp = SparseDistances::from_dense(pw.view()).unwrap();
    assert_eq!(sp.nnz(), 4);
    assert_eq!(sp.row(0), (&[1usize, 2][..], &[1.0, 2.0][..]));
    assert_eq!(sp.row(1), (&[0usize, 2][..], &[3.0, 0.5][..]));
  }

  #[test]
  fn dense_unique_values_include_zero() {
    let pw = array![[0.0, 1.0], [2.0, 1.0]];
    let uniq = DistanceMatrix::from(&pw).unique_values();
    assert_eq!(uniq.to_vec(), vec![0.0, 1.0, 2.0]);
  }

  #[test]
  fn sparse_unique_values_scan_stored_entries_only() {
    // Implicit zeros are absent from the derived grid even though the
    // counting pass treats them as distance 0.
    let pw = array![[0.0, 1.0], [2.0, 0.0]];
    let sp = SparseDistances::from_dense(pw.view()).unwrap();
    let uniq = DistanceMatrix::from(&sp).unique_values();
    assert_eq!(uniq.to_vec(), vec![1.0, 2.0]);
  }
}
