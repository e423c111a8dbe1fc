//! rust_vargenes command-line interface

use std::path::PathBuf;

use clap::Parser;
use log::{info, LevelFilter};

use rust_vargenes::cli::{Cli, Commands};
use rust_vargenes::config::PipelineConfig;
use rust_vargenes::error::Result;
use rust_vargenes::run_pipeline;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Run {
            counts,
            output,
            plot,
            no_plot,
            summary,
        } => run_analysis(counts, output, plot, no_plot, summary),
        Commands::Bins => {
            print_bins();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_analysis(
    counts: PathBuf,
    output: PathBuf,
    plot: PathBuf,
    no_plot: bool,
    summary: Option<PathBuf>,
) -> Result<()> {
    let config = PipelineConfig {
        counts_path: counts,
        table_path: output,
        plot_path: if no_plot { None } else { Some(plot) },
        summary_path: summary,
        ..Default::default()
    };

    let results = run_pipeline(&config)?;

    println!("\n{}", results.summary());
    info!("Done!");
    Ok(())
}

fn print_bins() {
    let config = PipelineConfig::default();
    println!("Bins over log10(basemean) x {}:", config.bin_scale);
    for (i, bin) in config.layout().bins().iter().enumerate() {
        let lo = 10f64.powf(bin.low / config.bin_scale);
        let hi = 10f64.powf(bin.high / config.bin_scale);
        println!("  {:>2}  {:<14} basemean {:.1} - {:.1}", i, bin.to_string(), lo, hi);
    }
}
