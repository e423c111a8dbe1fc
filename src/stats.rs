//! Descriptive statistics shared across the pipeline stages
//!
//! Every stage uses the same estimators: the plain arithmetic mean
//! (sum / n, so a mean of exactly 10 stays exactly 10 at the expression
//! threshold) and the unbiased (n - 1) sample variance from `statrs`. Both
//! return NaN when undefined (empty input, or fewer than two values for the
//! variance), which downstream stages treat as "no information".

use statrs::statistics::Statistics;

/// Arithmetic mean; NaN for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with the n - 1 denominator; NaN for fewer than two values
pub fn sample_variance(values: &[f64]) -> f64 {
    values.iter().variance()
}

/// Sample standard deviation with the n - 1 denominator
pub fn sample_std_dev(values: &[f64]) -> f64 {
    values.iter().std_dev()
}

/// Dispersion as excess variance over the mean, scaled by the squared mean.
///
/// `(variance - mean) / mean^2`. Poisson-distributed counts have dispersion
/// near zero; overdispersed genes are positive.
pub fn dispersion(mean: f64, variance: f64) -> f64 {
    (variance - mean) / (mean * mean)
}
