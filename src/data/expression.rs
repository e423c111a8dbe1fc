//! Per-gene expression summary produced by dispersion estimation

use ndarray::{Array2, ArrayView1};

/// Genes that survived expression and dispersion filtering, with their
/// summary statistics. Each vector has one entry per surviving gene, in
/// input order.
#[derive(Debug, Clone)]
pub struct GeneExpressionTable {
    /// Gene identifiers
    pub gene_ids: Vec<String>,
    /// Sample identifiers of the columns the statistics were computed over
    pub sample_ids: Vec<String>,
    /// Counts of the surviving genes (genes x samples)
    pub counts: Array2<f64>,
    /// Arithmetic mean across samples
    pub base_means: Vec<f64>,
    /// Sample variance across samples (n - 1 denominator)
    pub variances: Vec<f64>,
    /// (var - basemean) / basemean^2
    pub dispersions: Vec<f64>,
    pub log10_base_means: Vec<f64>,
    pub log10_dispersions: Vec<f64>,
    /// Genes dropped because basemean was below the expression threshold
    pub n_low_expression: usize,
    /// Genes dropped because dispersion was not strictly positive
    pub n_non_positive_dispersion: usize,
}

impl GeneExpressionTable {
    /// Get number of genes
    pub fn n_genes(&self) -> usize {
        self.gene_ids.len()
    }

    /// Counts for a specific gene
    pub fn gene_counts(&self, gene_idx: usize) -> ArrayView1<'_, f64> {
        self.counts.row(gene_idx)
    }

    /// Number of input genes before filtering
    pub fn n_input_genes(&self) -> usize {
        self.n_genes() + self.n_low_expression + self.n_non_positive_dispersion
    }
}
