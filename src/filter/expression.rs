//! Gene filters applied before bin assignment

/// Indices of genes whose base mean reaches the expression threshold.
///
/// The comparison is inclusive: a gene with basemean exactly equal to
/// `min_base_mean` is kept. NaN base means are dropped.
pub fn expressed_genes(base_means: &[f64], min_base_mean: f64) -> Vec<usize> {
    base_means
        .iter()
        .enumerate()
        .filter(|(_, &m)| m >= min_base_mean)
        .map(|(i, _)| i)
        .collect()
}

/// Indices of genes with strictly positive dispersion.
///
/// Non-positive dispersions have no log10 and would be meaningless after
/// the log transform. NaN dispersions are dropped as well.
pub fn positive_dispersion(dispersions: &[f64]) -> Vec<usize> {
    dispersions
        .iter()
        .enumerate()
        .filter(|(_, &d)| d > 0.0)
        .map(|(i, _)| i)
        .collect()
}

/// Pick the entries at `indices` from a per-gene vector
pub fn select<T: Clone>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| values[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expressed_genes_boundary() {
        let means = vec![10.0, 9.999, 10.001, f64::NAN, 500.0];
        assert_eq!(expressed_genes(&means, 10.0), vec![0, 2, 4]);
    }

    #[test]
    fn test_positive_dispersion() {
        let disp = vec![0.2, 0.0, -0.1, f64::NAN, 1e-9];
        assert_eq!(positive_dispersion(&disp), vec![0, 4]);
    }

    #[test]
    fn test_select() {
        let v = vec!["a", "b", "c"];
        assert_eq!(select(&v, &[2, 0]), vec!["c", "a"]);
    }
}
