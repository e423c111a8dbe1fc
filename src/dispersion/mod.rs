//! Per-gene dispersion estimation and expression filtering

mod gene_wise;

pub use gene_wise::{base_means, gene_dispersions, log10_all, sample_variances};

use ndarray::Axis;

use crate::data::{CountMatrix, GeneExpressionTable};
use crate::error::{Result, VarGenesError};
use crate::filter::{expressed_genes, positive_dispersion, select};

/// Summarize every gene and drop the ones that carry no usable signal.
///
/// Order of operations:
/// 1. basemean per gene;
/// 2. drop genes with `basemean < min_base_mean` (kept when equal);
/// 3. sample variance and dispersion `(var - basemean) / basemean^2`;
/// 4. drop genes with `dispersion <= 0`;
/// 5. log10 of basemean and dispersion.
///
/// The input matrix is left untouched; survivors are returned as a new table.
pub fn estimate_dispersions(counts: &CountMatrix, min_base_mean: f64) -> Result<GeneExpressionTable> {
    if counts.n_samples() < 2 {
        return Err(VarGenesError::InvalidInput {
            reason: format!(
                "at least 2 samples are required to estimate variance, got {}",
                counts.n_samples()
            ),
        });
    }

    let all_means = base_means(counts.counts());
    let expressed = expressed_genes(&all_means, min_base_mean);
    let n_low_expression = counts.n_genes() - expressed.len();
    log::debug!(
        "{} genes with basemean >= {}, {} dropped",
        expressed.len(),
        min_base_mean,
        n_low_expression
    );

    let expressed_counts = counts.counts().select(Axis(0), &expressed);
    let expressed_means = select(&all_means, &expressed);
    let variances = sample_variances(expressed_counts.view());
    let dispersions = gene_dispersions(&expressed_means, &variances);

    let keep = positive_dispersion(&dispersions);
    let n_non_positive_dispersion = expressed.len() - keep.len();
    log::debug!(
        "{} genes with positive dispersion, {} dropped",
        keep.len(),
        n_non_positive_dispersion
    );

    let gene_ids = select(&select(counts.gene_ids(), &expressed), &keep);
    let base_means = select(&expressed_means, &keep);
    let dispersions = select(&dispersions, &keep);

    Ok(GeneExpressionTable {
        gene_ids,
        sample_ids: counts.sample_ids().to_vec(),
        counts: expressed_counts.select(Axis(0), &keep),
        log10_base_means: log10_all(&base_means),
        log10_dispersions: log10_all(&dispersions),
        variances: select(&variances, &keep),
        base_means,
        dispersions,
        n_low_expression,
        n_non_positive_dispersion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn matrix(counts: ndarray::Array2<f64>, genes: &[&str]) -> CountMatrix {
        let samples = (1..=counts.ncols()).map(|i| format!("s{}", i)).collect();
        CountMatrix::new(counts, genes.iter().map(|g| g.to_string()).collect(), samples).unwrap()
    }

    #[test]
    fn test_three_gene_scenario() {
        let counts = matrix(
            array![[10.0, 10.0], [20.0, 40.0], [1000.0, 1200.0]],
            &["A", "B", "C"],
        );
        let table = estimate_dispersions(&counts, 10.0).unwrap();

        assert_eq!(table.gene_ids, vec!["B", "C"]);
        assert_eq!(table.n_low_expression, 0);
        assert_eq!(table.n_non_positive_dispersion, 1);
        assert_eq!(table.n_input_genes(), 3);

        assert!((table.dispersions[0] - 170.0 / 900.0).abs() < 1e-12);
        assert!((table.dispersions[1] - 18900.0 / 1_210_000.0).abs() < 1e-12);
        assert!((table.log10_base_means[0] - 30.0_f64.log10()).abs() < 1e-12);
        assert_eq!(table.gene_counts(1).to_vec(), vec![1000.0, 1200.0]);
    }

    #[test]
    fn test_base_mean_boundary_before_variance() {
        // exactly 10 is kept, 9.999 is not, even though both are overdispersed
        let counts = matrix(array![[0.0, 20.0], [0.0, 19.998]], &["keep", "drop"]);
        let table = estimate_dispersions(&counts, 10.0).unwrap();

        assert_eq!(table.gene_ids, vec!["keep"]);
        assert_eq!(table.n_low_expression, 1);
        assert_eq!(table.n_non_positive_dispersion, 0);
        assert_eq!(table.base_means, vec![10.0]);
    }

    #[test]
    fn test_input_is_not_modified() {
        let counts = matrix(array![[1.0, 2.0], [100.0, 300.0]], &["low", "high"]);
        let _ = estimate_dispersions(&counts, 10.0).unwrap();
        assert_eq!(counts.n_genes(), 2);
    }

    #[test]
    fn test_single_sample_rejected() {
        let counts = matrix(array![[100.0], [200.0]], &["a", "b"]);
        assert!(matches!(
            estimate_dispersions(&counts, 10.0),
            Err(VarGenesError::InvalidInput { .. })
        ));
    }
}
