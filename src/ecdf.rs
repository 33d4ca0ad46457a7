//! # Ecdf
//!
//! Weighted threshold-counting ECDF engine.
//!
//! $$
//! \hat{F}_i(d)=\frac{\sum_j w_j\,\mathbb{1}[D_{ij}\le d]+c}{\sum_j w_j+c}
//! $$
//!

use anyhow::{bail, Result};
use ndarray::parallel::prelude::*;
use ndarray::{Array1, Array2, ArrayViewMut1, Axis};
use tracing::debug;

use crate::matrix::DistanceMatrix;

/// Computes the ECDF for each target sequence (row of `pw`) as the
/// weighted proportion of reference sequences (columns of `pw`) within
/// a distance radius less than or equal to each threshold.
///
/// # Arguments
///
/// * `pw` - Dense or sparse pairwise distance matrix, shape (targets, references).
/// * `thresholds` - Radii at which the ECDF is evaluated, taken in the
///   order given. Defaults to the sorted distinct values present in `pw`
///   (for a sparse matrix, distinct among the stored nonzero values).
/// * `weights` - Relative weight of each reference, e.g. a clone count.
///   Defaults to 1 per reference; the ECDF stays a probability on [0, 1].
/// * `pseudo_count` - Added to numerator and denominator at every
///   threshold to avoid zeros ahead of a log-scale plot.
/// * `skip_diag` - Exclude the self-pair when targets and references are
///   the same set: subtracts `weights[i]` from row `i`'s numerator and
///   denominator. Requires every row index to have a self-column.
///
/// # Returns
///
/// `(thresholds, ecdf)` with `ecdf` of shape (targets, thresholds).
/// Each row is non-decreasing when the thresholds are non-decreasing.
/// A zero denominator with zero `pseudo_count` yields NaN for that row.
///
/// Rows are independent and processed in parallel; no intermediate
/// larger than O(thresholds) per row is materialized.
pub fn distance_ecdf(
  pw: DistanceMatrix<'_>,
  thresholds: Option<&Array1<f64>>,
  weights: Option<&Array1<f64>>,
  pseudo_count: f64,
  skip_diag: bool,
) -> Result<(Array1<f64>, Array2<f64>)> {
  let (nrows, ncols) = (pw.nrows(), pw.ncols());

  let weights = match weights {
    Some(w) => {
      if w.len() != ncols {
        bail!(
          "weights length {} does not match reference count {ncols}",
          w.len()
        );
      }
      if let Some((j, &wj)) = w.iter().enumerate().find(|&(_, &wj)| !wj.is_finite() || wj < 0.0) {
        bail!("weight {wj} at reference {j} must be finite and nonnegative");
      }
      w.clone()
    }
    None => Array1::ones(ncols),
  };

  if !pseudo_count.is_finite() || pseudo_count < 0.0 {
    bail!("pseudo_count must be finite and nonnegative, got {pseudo_count}");
  }
  if skip_diag && nrows > ncols {
    bail!("skip_diag requires a self-column for every row ({nrows} targets, {ncols} references)");
  }

  let thresholds = match thresholds {
    Some(t) => t.clone(),
    None => pw.unique_values(),
  };
  debug!(
    targets = nrows,
    references = ncols,
    n_thresholds = thresholds.len(),
    "computing distance ECDF"
  );

  let sum_weights = weights.sum();
  let mut ecdf = Array2::<f64>::zeros((nrows, thresholds.len()));
  ecdf
    .axis_iter_mut(Axis(0))
    .into_par_iter()
    .enumerate()
    .for_each(|(i, row_out)| {
      ecdf_row(
        pw,
        i,
        &thresholds,
        &weights,
        sum_weights,
        pseudo_count,
        skip_diag,
        row_out,
      )
    });

  Ok((thresholds, ecdf))
}

#[allow(clippy::too_many_arguments)]
fn ecdf_row(
  pw: DistanceMatrix<'_>,
  i: usize,
  thresholds: &Array1<f64>,
  weights: &Array1<f64>,
  sum_weights: f64,
  pseudo_count: f64,
  skip_diag: bool,
  mut row_out: ArrayViewMut1<'_, f64>,
) {
  let mut numer = Array1::<f64>::zeros(thresholds.len());
  match pw {
    DistanceMatrix::Dense(m) => {
      for (j, &d) in m.row(i).iter().enumerate() {
        accumulate(&mut numer, thresholds, d, weights[j]);
      }
    }
    // Stored entries only: the implicit zeros reach the fraction through
    // the all-columns weight-sum denominator, never the numerator.
    DistanceMatrix::Sparse(s) => {
      let (cols, vals) = s.row(i);
      for (&j, &d) in cols.iter().zip(vals) {
        accumulate(&mut numer, thresholds, d, weights[j]);
      }
    }
  }

  let mut denom = sum_weights;
  if skip_diag {
    numer -= weights[i];
    denom -= weights[i];
  }
  row_out.assign(&((&numer + pseudo_count) / (denom + pseudo_count)));
}

#[inline]
fn accumulate(numer: &mut Array1<f64>, thresholds: &Array1<f64>, d: f64, w: f64) {
  for (n, &t) in numer.iter_mut().zip(thresholds) {
    if d <= t {
      *n += w;
    }
  }
}
