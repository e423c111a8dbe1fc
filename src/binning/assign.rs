//! Assignment of genes to expression bins

use super::bins::BinLayout;
use crate::data::GeneExpressionTable;

/// A gene table together with the bin each gene landed in
#[derive(Debug, Clone)]
pub struct BinnedTable {
    pub table: GeneExpressionTable,
    pub layout: BinLayout,
    /// Bin index per gene; `None` when the gene is outside every bin
    pub bins: Vec<Option<usize>>,
    /// Multiplier applied to log10(basemean) before lookup
    pub scale: f64,
}

impl BinnedTable {
    pub fn n_genes(&self) -> usize {
        self.table.n_genes()
    }

    /// Number of genes assigned to each bin, indexed like the layout
    pub fn bin_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.layout.len()];
        for &i in self.bins.iter().flatten() {
            counts[i] += 1;
        }
        counts
    }

    pub fn n_unbinned(&self) -> usize {
        self.bins.iter().filter(|b| b.is_none()).count()
    }

    /// Indices of the genes assigned to `bin`
    pub fn members(&self, bin: usize) -> Vec<usize> {
        self.bins
            .iter()
            .enumerate()
            .filter(|(_, &b)| b == Some(bin))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Bin every gene by `log10_basemean * scale`
pub fn assign_bins(table: &GeneExpressionTable, layout: &BinLayout, scale: f64) -> BinnedTable {
    let bins: Vec<Option<usize>> = table
        .log10_base_means
        .iter()
        .map(|&m| layout.find(m * scale))
        .collect();

    let binned = BinnedTable {
        table: table.clone(),
        layout: layout.clone(),
        bins,
        scale,
    };

    for (i, n) in binned.bin_counts().iter().enumerate() {
        log::debug!("bin {} {}: {} genes", i, layout.bins()[i], n);
    }
    let n_unbinned = binned.n_unbinned();
    if n_unbinned > 0 {
        log::warn!(
            "{} genes fall outside every expression bin and will not be classified",
            n_unbinned
        );
    }

    binned
}
