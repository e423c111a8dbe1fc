//! Gene-wise moments and method-of-moments dispersion
//!
//! All functions work over the whole genes x samples matrix at once and
//! return one value per gene (row), in row order.

use ndarray::{ArrayView2, Axis};

use crate::stats;

/// Mean of each gene across samples
pub fn base_means(counts: ArrayView2<'_, f64>) -> Vec<f64> {
    counts
        .axis_iter(Axis(0))
        .map(|row| stats::mean(&row.to_vec()))
        .collect()
}

/// Sample variance (n - 1) of each gene across samples
pub fn sample_variances(counts: ArrayView2<'_, f64>) -> Vec<f64> {
    counts
        .axis_iter(Axis(0))
        .map(|row| stats::sample_variance(&row.to_vec()))
        .collect()
}

/// Dispersion `(var - mean) / mean^2` for each gene
pub fn gene_dispersions(base_means: &[f64], variances: &[f64]) -> Vec<f64> {
    base_means
        .iter()
        .zip(variances.iter())
        .map(|(&m, &v)| stats::dispersion(m, v))
        .collect()
}

/// Elementwise log10
pub fn log10_all(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.log10()).collect()
}
