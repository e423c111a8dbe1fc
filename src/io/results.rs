//! Variable-gene results structure

use ndarray::{Array2, ArrayView1};
use serde::Serialize;

use crate::binning::{index_or_sentinel, BinLayout};
use crate::outliers::BinStatistics;

/// Fully annotated gene table: expression summary, bin assignment, bin
/// statistics and outlier flag. One entry per gene in every vector.
#[derive(Debug, Clone)]
pub struct VariableGeneResults {
    /// Gene identifiers
    pub gene_ids: Vec<String>,
    /// Sample identifiers, one per column of `counts`
    pub sample_ids: Vec<String>,
    /// Per-sample counts of each gene (genes x samples)
    pub counts: Array2<f64>,
    /// Mean expression across samples
    pub base_means: Vec<f64>,
    /// Sample variance across samples
    pub variances: Vec<f64>,
    pub dispersions: Vec<f64>,
    pub log10_base_means: Vec<f64>,
    pub log10_dispersions: Vec<f64>,
    /// Bin index; `None` for genes outside every bin
    pub bins: Vec<Option<usize>>,
    /// Mean log10 dispersion of the gene's bin
    pub bin_means: Vec<f64>,
    /// Standard deviation of log10 dispersion of the gene's bin
    pub bin_stds: Vec<f64>,
    /// log10 dispersion minus the bin mean
    pub disp_minus_mean: Vec<f64>,
    /// Dispersion outlier (variable gene) flag
    pub outliers: Vec<bool>,
    /// Statistics for every bin of the layout
    pub bin_statistics: Vec<BinStatistics>,
    /// Bins used for the assignment
    pub layout: BinLayout,
    /// Standard deviations above the bin mean required to flag a gene
    pub outlier_sd: f64,
    /// Genes in the input before filtering
    pub n_input_genes: usize,
    pub n_low_expression: usize,
    pub n_non_positive_dispersion: usize,
}

impl VariableGeneResults {
    /// Get number of genes
    pub fn n_genes(&self) -> usize {
        self.gene_ids.len()
    }

    /// Counts for a specific gene
    pub fn gene_counts(&self, gene_idx: usize) -> ArrayView1<'_, f64> {
        self.counts.row(gene_idx)
    }

    /// Exported bin index of a gene, `-1` when unbinned
    pub fn bin_index(&self, gene_idx: usize) -> i64 {
        index_or_sentinel(self.bins[gene_idx])
    }

    /// IDs of genes flagged as dispersion outliers
    pub fn outlier_genes(&self) -> Vec<&str> {
        self.gene_ids
            .iter()
            .zip(self.outliers.iter())
            .filter(|(_, &o)| o)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    pub fn n_outliers(&self) -> usize {
        self.outliers.iter().filter(|&&o| o).count()
    }

    pub fn n_unbinned(&self) -> usize {
        self.bins.iter().filter(|b| b.is_none()).count()
    }

    /// Summary statistics
    pub fn summary(&self) -> ResultsSummary {
        ResultsSummary {
            input_genes: self.n_input_genes,
            low_expression: self.n_low_expression,
            non_positive_dispersion: self.n_non_positive_dispersion,
            classified: self.n_genes() - self.n_unbinned(),
            unbinned: self.n_unbinned(),
            outliers: self.n_outliers(),
            outlier_sd: self.outlier_sd,
        }
    }
}

/// Summary of a variable-gene run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsSummary {
    pub input_genes: usize,
    pub low_expression: usize,
    pub non_positive_dispersion: usize,
    pub classified: usize,
    pub unbinned: usize,
    pub outliers: usize,
    pub outlier_sd: f64,
}

impl std::fmt::Display for ResultsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Variable Gene Summary")?;
        writeln!(f, "=====================")?;
        writeln!(f, "Input genes: {}", self.input_genes)?;
        writeln!(f, "  Removed (low basemean): {}", self.low_expression)?;
        writeln!(f, "  Removed (dispersion <= 0): {}", self.non_positive_dispersion)?;
        writeln!(f, "Genes classified: {}", self.classified)?;
        if self.unbinned > 0 {
            writeln!(f, "Genes outside all bins: {}", self.unbinned)?;
        }
        writeln!(
            f,
            "Dispersion outliers (>= {} SD above bin mean): {}",
            self.outlier_sd, self.outliers
        )?;
        Ok(())
    }
}
