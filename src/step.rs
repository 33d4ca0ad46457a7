//! # Step
//!
//! Converts an ECDF into the doubled-point sequence a plotting layer
//! needs: an ECDF drawn straight through its raw points renders as a
//! smooth curve, while duplicating interior points yields the correct
//! right-continuous staircase.

use anyhow::{bail, Result};
use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Options for [`make_ecdf_step`]. The three `add_*` flags are
/// independent and stack in declaration order; `enforce_min` is applied
/// before any of them.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepOptions {
  /// Prepend `min_point.0` to x, duplicating the first y value.
  pub add_min_x: bool,
  /// Prepend `min_point.1` to y at the existing leftmost x.
  pub add_min_y: bool,
  /// Prepend the `min_point` corner to both sequences.
  pub add_min_both: bool,
  /// Clamp x below `min_point.0` and y below `min_point.1` element-wise.
  pub enforce_min: bool,
  /// Floor corner used by the flags above. Defaults to the origin.
  pub min_point: (f64, f64),
  /// Width of a single uniform offset applied to every interior x value,
  /// for de-overlapping many curves drawn together. The first and last x
  /// stay exactly at their un-jittered positions.
  pub x_jitter: f64,
}

/// Builds stepped x/y vectors for plotting an ECDF row.
///
/// Takes the outputs of [`crate::ecdf::distance_ecdf`] (one row of the
/// ECDF matrix with its thresholds) but works for any pair of ascending
/// (x, y) sequences. Both outputs have length `2n - 1` for `n` input
/// points after the prepend flags are applied.
///
/// The jitter offset is drawn once from `rng`; a zero `x_jitter` never
/// touches the rng, so deterministic callers can pass a seeded source
/// and get stable output either way.
pub fn make_ecdf_step<R: Rng + ?Sized>(
  thresholds: &Array1<f64>,
  ecdf: &Array1<f64>,
  opts: &StepOptions,
  rng: &mut R,
) -> Result<(Array1<f64>, Array1<f64>)> {
  if thresholds.len() != ecdf.len() {
    bail!(
      "thresholds length {} does not match ecdf length {}",
      thresholds.len(),
      ecdf.len()
    );
  }
  if thresholds.is_empty() {
    bail!("cannot build a step function from empty input");
  }

  let mut t = thresholds.to_vec();
  let mut y = ecdf.to_vec();

  if opts.enforce_min {
    for v in &mut t {
      *v = v.max(opts.min_point.0);
    }
    for v in &mut y {
      *v = v.max(opts.min_point.1);
    }
  }
  if opts.add_min_x {
    t.insert(0, opts.min_point.0);
    y.insert(0, y[0]);
  }
  if opts.add_min_y {
    t.insert(0, t[0]);
    y.insert(0, opts.min_point.1);
  }
  if opts.add_min_both {
    t.insert(0, opts.min_point.0);
    y.insert(0, opts.min_point.1);
  }

  // First x kept once, every later x doubled; every y doubled with the
  // final element dropped. Both end up with length 2n - 1.
  let mut x = Vec::with_capacity(2 * t.len() - 1);
  x.push(t[0]);
  for &v in &t[1..] {
    x.push(v);
    x.push(v);
  }
  let mut yy = Vec::with_capacity(2 * y.len() - 1);
  for &v in &y {
    yy.push(v);
    yy.push(v);
  }
  yy.pop();

  if opts.x_jitter != 0.0 {
    let offset = (Uniform::new(0.0, 1.0).sample(rng) - 0.5) * opts.x_jitter;
    let first = x[0];
    let last = x[x.len() - 1];
    for v in &mut x {
      *v += offset;
    }
    // Pinned endpoints keep adjacent step plots connected.
    x[0] = first;
    let m = x.len();
    x[m - 1] = last;
  }

  Ok((Array1::from(x), Array1::from(yy)))
}
