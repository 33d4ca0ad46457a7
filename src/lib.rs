//! # repdist-ecdf
//!
//! Empirical cumulative distribution functions (ECDFs) over pairwise
//! distance matrices between a target set and a reference set of
//! sequences, e.g. immune receptor repertoires compared by an edit-like
//! distance metric.
//!
//! For each target (row) the engine computes, at each threshold radius
//! $d_i$, the weighted fraction of references (columns) within distance
//! $\le d_i$:
//!
//! $$
//! \hat{F}_i(d)=\frac{\sum_j w_j\,\mathbb{1}[D_{ij}\le d]+c}{\sum_j w_j+c}
//! $$
//!
//! A companion step-function builder turns an ECDF row into the
//! doubled-point sequence a plotting layer needs to render a proper
//! right-continuous step curve.

pub mod ecdf;
pub mod matrix;
pub mod step;
pub mod summary;
