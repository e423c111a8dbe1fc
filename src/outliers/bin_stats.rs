//! Per-bin distribution of log10 dispersion

use serde::Serialize;

use crate::binning::{Bin, BinnedTable};
use crate::stats;

/// Location and spread of log10 dispersion within one expression bin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinStatistics {
    pub index: usize,
    pub bin: Bin,
    /// Genes assigned to the bin
    pub n_genes: usize,
    /// Mean log10 dispersion; NaN for an empty bin
    pub mean: f64,
    /// Sample standard deviation of log10 dispersion; NaN below two members
    pub std: f64,
}

impl BinStatistics {
    /// Whether mean and standard deviation are both defined
    pub fn is_defined(&self) -> bool {
        self.mean.is_finite() && self.std.is_finite()
    }
}

/// Mean and standard deviation of log10 dispersion for every bin in the
/// layout, computed only from genes that were assigned a bin
pub fn bin_statistics(binned: &BinnedTable) -> Vec<BinStatistics> {
    let log_disp = &binned.table.log10_dispersions;

    binned
        .layout
        .bins()
        .iter()
        .enumerate()
        .map(|(index, &bin)| {
            let values: Vec<f64> = binned.members(index).iter().map(|&g| log_disp[g]).collect();
            let stat = BinStatistics {
                index,
                bin,
                n_genes: values.len(),
                mean: stats::mean(&values),
                std: stats::sample_std_dev(&values),
            };
            if stat.n_genes == 1 {
                log::debug!("bin {} has a single gene; its standard deviation is undefined", index);
            }
            stat
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::{assign_bins, BinLayout};
    use crate::data::GeneExpressionTable;
    use ndarray::Array2;

    fn binned(means: &[f64], log_disp: &[f64], layout: BinLayout) -> BinnedTable {
        let n = means.len();
        let table = GeneExpressionTable {
            gene_ids: (0..n).map(|i| format!("g{}", i)).collect(),
            sample_ids: vec!["s1".to_string(), "s2".to_string()],
            counts: Array2::zeros((n, 2)),
            base_means: means.to_vec(),
            variances: vec![0.0; n],
            dispersions: log_disp.iter().map(|d| 10f64.powf(*d)).collect(),
            log10_base_means: means.iter().map(|m| m.log10()).collect(),
            log10_dispersions: log_disp.to_vec(),
            n_low_expression: 0,
            n_non_positive_dispersion: 0,
        };
        assign_bins(&table, &layout, 100.0)
    }

    #[test]
    fn test_bin_statistics() {
        let layout = BinLayout::from_bins(vec![Bin::new(100.0, 200.0), Bin::new(200.0, 300.0), Bin::new(300.0, 400.0)]);
        // three genes in bin 0, one in bin 1, none in bin 2, one unbinned
        let b = binned(&[20.0, 30.0, 40.0, 200.0, 5.0], &[-1.0, -2.0, -3.0, -0.5, 5.0], layout);
        let stats = bin_statistics(&b);

        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].n_genes, 3);
        assert!((stats[0].mean + 2.0).abs() < 1e-12);
        assert!((stats[0].std - 1.0).abs() < 1e-12);
        assert!(stats[0].is_defined());

        assert_eq!(stats[1].n_genes, 1);
        assert_eq!(stats[1].mean, -0.5);
        assert!(stats[1].std.is_nan());
        assert!(!stats[1].is_defined());

        assert_eq!(stats[2].n_genes, 0);
        assert!(stats[2].mean.is_nan());
    }
}
