//! Dispersion-outlier classification

use super::bin_stats::BinStatistics;
use crate::binning::BinnedTable;
use crate::io::VariableGeneResults;

/// Outlier rule: `log10_dispersion - bin_mean >= outlier_sd * bin_std`.
///
/// Any NaN operand makes the comparison false, so genes without bin
/// statistics (unbinned, empty or single-member bins) are never outliers.
pub fn is_outlier(log10_dispersion: f64, bin_mean: f64, bin_std: f64, outlier_sd: f64) -> bool {
    log10_dispersion - bin_mean >= outlier_sd * bin_std
}

/// Attach bin statistics to every gene and flag dispersion outliers
pub fn classify(binned: &BinnedTable, bin_stats: &[BinStatistics], outlier_sd: f64) -> VariableGeneResults {
    let table = &binned.table;

    let stat_for = |bin: Option<usize>| bin.and_then(|i| bin_stats.get(i));
    let bin_means: Vec<f64> = binned
        .bins
        .iter()
        .map(|&b| stat_for(b).map_or(f64::NAN, |s| s.mean))
        .collect();
    let bin_stds: Vec<f64> = binned
        .bins
        .iter()
        .map(|&b| stat_for(b).map_or(f64::NAN, |s| s.std))
        .collect();

    let disp_minus_mean: Vec<f64> = table
        .log10_dispersions
        .iter()
        .zip(bin_means.iter())
        .map(|(&d, &m)| d - m)
        .collect();

    let outliers: Vec<bool> = table
        .log10_dispersions
        .iter()
        .zip(bin_means.iter().zip(bin_stds.iter()))
        .map(|(&d, (&m, &s))| is_outlier(d, m, s, outlier_sd))
        .collect();

    log::debug!(
        "{} of {} genes flagged at {} standard deviations",
        outliers.iter().filter(|&&o| o).count(),
        outliers.len(),
        outlier_sd
    );

    VariableGeneResults {
        gene_ids: table.gene_ids.clone(),
        sample_ids: table.sample_ids.clone(),
        counts: table.counts.clone(),
        base_means: table.base_means.clone(),
        variances: table.variances.clone(),
        dispersions: table.dispersions.clone(),
        log10_base_means: table.log10_base_means.clone(),
        log10_dispersions: table.log10_dispersions.clone(),
        bins: binned.bins.clone(),
        bin_means,
        bin_stds,
        disp_minus_mean,
        outliers,
        bin_statistics: bin_stats.to_vec(),
        layout: binned.layout.clone(),
        outlier_sd,
        n_input_genes: table.n_input_genes(),
        n_low_expression: table.n_low_expression,
        n_non_positive_dispersion: table.n_non_positive_dispersion,
    }
}
