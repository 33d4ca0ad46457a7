//! # Summary
//!
//! Log-scale geometric means for summarizing families of ECDF curves.

use anyhow::{bail, Result};
use ndarray::{Array1, Array2, Axis};

/// Geometric mean along `axis`: `10 ^ mean(log10(values))`.
///
/// Useful for averaging many ECDF rows on the log scale they are
/// usually plotted on. Negative values propagate NaN through the
/// logarithm; a zero drags the mean to negative infinity and the
/// result to 0.
pub fn gmean10(values: &Array2<f64>, axis: Axis) -> Result<Array1<f64>> {
  match values.mapv(f64::log10).mean_axis(axis) {
    Some(mean) => Ok(mean.mapv(|m| 10f64.powf(m))),
    None => bail!("cannot take a geometric mean over an empty axis"),
  }
}

/// Scalar geometric mean of a single vector.
pub fn gmean10_1d(values: &Array1<f64>) -> Result<f64> {
  match values.mapv(f64::log10).mean() {
    Some(mean) => Ok(10f64.powf(mean)),
    None => bail!("cannot take a geometric mean of an empty vector"),
  }
}
