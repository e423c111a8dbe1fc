//! RustVarGenes: dispersion-outlier (variable gene) detection in Rust
//!
//! Given normalized RNA-seq counts for a set of biological replicates, this
//! crate finds genes whose variability is unusually high compared with
//! other genes of similar mean expression.
//!
//! # Example
//!
//! ```ignore
//! use rust_vargenes::prelude::*;
//!
//! let counts = read_count_matrix("normalized_counts.txt")?;
//! let results = find_variable_genes(&counts, &PipelineConfig::default())?;
//!
//! for gene in results.outlier_genes() {
//!     println!("{}", gene);
//! }
//! ```

pub mod binning;
pub mod cli;
pub mod config;
pub mod data;
pub mod dispersion;
pub mod error;
pub mod filter;
pub mod io;
pub mod outliers;
pub mod plot;
pub mod stats;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::binning::{assign_bins, create_bins, find_bin, Bin, BinGroup, BinLayout, BinnedTable};
    pub use crate::config::PipelineConfig;
    pub use crate::data::{CountMatrix, GeneExpressionTable};
    pub use crate::dispersion::estimate_dispersions;
    pub use crate::error::{Result, VarGenesError};
    pub use crate::io::{
        read_count_matrix, write_bin_summary, write_results_table, ResultsSummary, VariableGeneResults,
    };
    pub use crate::outliers::{bin_statistics, classify, BinStatistics};
    pub use crate::plot::{plot_dispersion_vs_mean, PlotStyle};
}

use log::info;
use prelude::*;

/// Run the in-memory analysis: dispersion estimation, binning and outlier
/// classification. Each stage returns a new value; `counts` is not modified.
pub fn find_variable_genes(counts: &CountMatrix, config: &PipelineConfig) -> Result<VariableGeneResults> {
    config.validate()?;

    let selected;
    let counts = match &config.sample_columns {
        Some(columns) => {
            selected = counts.select_samples(columns)?;
            &selected
        }
        None => counts,
    };

    // Step 1: basemean, variance, dispersion, filters
    let table = estimate_dispersions(counts, config.min_base_mean)?;
    info!(
        "{} of {} genes kept ({} with basemean < {}, {} with dispersion <= 0)",
        table.n_genes(),
        table.n_input_genes(),
        table.n_low_expression,
        config.min_base_mean,
        table.n_non_positive_dispersion
    );

    // Step 2: bins over log10(basemean)
    let layout = config.layout();
    info!("Bins: {}", layout);
    let binned = assign_bins(&table, &layout, config.bin_scale);

    // Step 3: per-bin statistics and outlier calls
    let stats = bin_statistics(&binned);
    for s in &stats {
        info!("  bin {} {}: {} genes", s.index, s.bin, s.n_genes);
    }
    let results = classify(&binned, &stats, config.outlier_sd);
    info!("{} dispersion outliers", results.n_outliers());

    Ok(results)
}

/// Run the complete pipeline: load the count matrix, analyse it, render the
/// scatter plot and export the annotated table
pub fn run_pipeline(config: &PipelineConfig) -> Result<VariableGeneResults> {
    config.validate()?;

    info!("Loading count matrix from: {}", config.counts_path.display());
    let counts = read_count_matrix(&config.counts_path)?;
    info!("  {} genes, {} samples", counts.n_genes(), counts.n_samples());

    let results = find_variable_genes(&counts, config)?;

    if let Some(plot_path) = &config.plot_path {
        plot_dispersion_vs_mean(&results, plot_path, &config.plot_style)?;
    }

    info!("Writing results to: {}", config.table_path.display());
    write_results_table(&config.table_path, &results)?;

    if let Some(summary_path) = &config.summary_path {
        info!("Writing bin summary to: {}", summary_path.display());
        write_bin_summary(summary_path, &results)?;
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use std::io::Write;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn three_gene_counts() -> CountMatrix {
        CountMatrix::new(
            array![[10.0, 10.0], [20.0, 40.0], [1000.0, 1200.0]],
            strings(&["A", "B", "C"]),
            strings(&["S1", "S2"]),
        )
        .unwrap()
    }

    #[test]
    fn test_three_gene_scenario() {
        let results = find_variable_genes(&three_gene_counts(), &PipelineConfig::default()).unwrap();

        assert_eq!(results.gene_ids, strings(&["B", "C"]));
        assert_eq!(results.bin_index(0), 1);
        assert_eq!(results.bin_index(1), 7);
        assert!((results.dispersions[0] - 170.0 / 900.0).abs() < 1e-12);
        assert!((results.dispersions[1] - 18900.0 / 1_210_000.0).abs() < 1e-12);

        // one gene per bin: no spread, so nothing is called
        assert_eq!(results.outliers, vec![false, false]);
        assert!(results.bin_stds.iter().all(|s| s.is_nan()));

        let summary = results.summary();
        assert_eq!(summary.input_genes, 3);
        assert_eq!(summary.non_positive_dispersion, 1);
        assert_eq!(summary.classified, 2);
        assert_eq!(summary.outliers, 0);
    }

    #[test]
    fn test_high_dispersion_gene_is_called() {
        // all genes have mean 50; counts [50 - d, 50 + d]
        let spreads = [10.0, 11.0, 12.0, 10.0, 11.0, 12.0, 10.0, 11.0, 12.0, 10.0, 11.0, 45.0];
        let mut counts = Array2::zeros((spreads.len(), 2));
        for (i, d) in spreads.iter().enumerate() {
            counts[[i, 0]] = 50.0 - d;
            counts[[i, 1]] = 50.0 + d;
        }
        let genes: Vec<String> = (0..spreads.len()).map(|i| format!("gene{}", i)).collect();
        let matrix = CountMatrix::new(counts, genes, strings(&["S1", "S2"])).unwrap();

        let results = find_variable_genes(&matrix, &PipelineConfig::default()).unwrap();
        assert_eq!(results.n_genes(), 12);
        assert!(results.bins.iter().all(|&b| b == Some(2)));
        assert_eq!(results.outlier_genes(), vec!["gene11"]);
        assert_eq!(results.bin_statistics[2].n_genes, 12);
    }

    #[test]
    fn test_sample_column_selection() {
        let matrix = CountMatrix::new(
            array![[20.0, 40.0, 5000.0], [1000.0, 1200.0, 0.0]],
            strings(&["B", "C"]),
            strings(&["S1", "S2", "junk"]),
        )
        .unwrap();

        let config = PipelineConfig {
            sample_columns: Some(strings(&["S1", "S2"])),
            ..Default::default()
        };
        let results = find_variable_genes(&matrix, &config).unwrap();
        assert_eq!(results.sample_ids, strings(&["S1", "S2"]));
        assert_eq!(results.base_means, vec![30.0, 1100.0]);

        let config = PipelineConfig {
            sample_columns: Some(strings(&["S1", "S9"])),
            ..Default::default()
        };
        assert!(matches!(
            find_variable_genes(&matrix, &config),
            Err(VarGenesError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_run_pipeline_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let counts_path = dir.path().join("counts.txt");
        let mut file = std::fs::File::create(&counts_path).unwrap();
        writeln!(file, "gene_id\tS1\tS2").unwrap();
        writeln!(file, "A\t10\t10").unwrap();
        writeln!(file, "B\t20\t40").unwrap();
        writeln!(file, "C\t1000\t1200").unwrap();
        drop(file);

        let config = PipelineConfig {
            counts_path,
            plot_path: None,
            table_path: dir.path().join("variable_genes.tsv"),
            summary_path: Some(dir.path().join("bins.json")),
            ..Default::default()
        };
        let results = run_pipeline(&config).unwrap();
        assert_eq!(results.n_genes(), 2);

        let table = std::fs::read_to_string(&config.table_path).unwrap();
        let rows: Vec<Vec<&str>> = table.lines().map(|l| l.split('\t').collect()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            vec![
                "gene_id",
                "S1",
                "S2",
                "basemean",
                "var",
                "dispersion",
                "log10_basemean",
                "log10_dispersion",
                "Bin",
                "meanOfBin",
                "stdOfBin",
                "disp_minus_mean",
                "outlier_by_bins",
            ]
        );
        assert_eq!(rows[1][0], "B");
        assert_eq!(rows[1][3], "30");
        assert_eq!(rows[1][4], "200");
        assert_eq!(rows[1][8], "1");
        assert_eq!(rows[1][10], "");
        assert_eq!(rows[1][12], "False");
        assert_eq!(rows[2][0], "C");
        assert_eq!(rows[2][8], "7");

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("bins.json")).unwrap()).unwrap();
        assert_eq!(report["summary"]["input_genes"], 3);
        assert_eq!(report["bins"].as_array().map(|b| b.len()), Some(9));
        assert_eq!(report["bins"][1]["n_genes"], 1);
        assert!(report["bins"][1]["std"].is_null());
    }

    #[test]
    fn test_invalid_config_rejected_before_reading() {
        let config = PipelineConfig {
            counts_path: "does/not/exist.txt".into(),
            outlier_sd: -1.0,
            ..Default::default()
        };
        assert!(matches!(run_pipeline(&config), Err(VarGenesError::InvalidConfig { .. })));
    }
}
