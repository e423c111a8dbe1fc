//! Command-line interface for rust_vargenes

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rust_vargenes")]
#[command(version)]
#[command(about = "Dispersion-outlier (variable gene) detection for normalized RNA-seq counts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find variable genes in a normalized count matrix
    #[command(
        long_about = "Find variable genes in a normalized count matrix.\n\n\
            Computes mean, variance and dispersion per gene, drops genes with\n\
            basemean < 10 or dispersion <= 0, bins genes by log10 mean expression\n\
            and flags genes whose log10 dispersion is at least 2 standard\n\
            deviations above their bin mean.",
        after_long_help = "\
Examples:
  rust_vargenes run -c normalized_counts.txt
  rust_vargenes run -c normalized_counts.txt -o variable_genes.tsv -p scatter.png
  rust_vargenes run -c normalized_counts.txt --no-plot -s bins.json"
    )]
    Run {
        /// Path to tab-separated normalized count matrix
        #[arg(short, long,
            long_help = "Path to the normalized count matrix.\n\
                Format: first column = gene IDs, remaining columns = samples.\n\
                Tab-separated, or comma-separated when the file ends in .csv.")]
        counts: PathBuf,

        /// Output table path [default: variable_genes.tsv]
        #[arg(short, long, default_value = "variable_genes.tsv")]
        output: PathBuf,

        /// Scatter plot path [default: dispersion_vs_mean_expression.png]
        #[arg(short, long, default_value = "dispersion_vs_mean_expression.png")]
        plot: PathBuf,

        /// Do not render the scatter plot
        #[arg(long, conflicts_with = "plot")]
        no_plot: bool,

        /// Write per-bin statistics as JSON
        #[arg(short, long, value_name = "PATH")]
        summary: Option<PathBuf>,
    },

    /// Print the expression bins used for local normalization
    Bins,
}
