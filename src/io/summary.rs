//! JSON report of the bin layout and per-bin statistics

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use super::results::{ResultsSummary, VariableGeneResults};
use crate::error::Result;
use crate::outliers::BinStatistics;

/// Serialized form of a run: run-level counts plus one entry per bin.
/// Undefined bin statistics are written as `null`.
#[derive(Debug, Serialize)]
pub struct BinReport<'a> {
    pub summary: ResultsSummary,
    /// Statistics for every bin, in layout order
    pub bins: &'a [BinStatistics],
}

impl<'a> BinReport<'a> {
    pub fn new(results: &'a VariableGeneResults) -> Self {
        Self {
            summary: results.summary(),
            bins: &results.bin_statistics,
        }
    }
}

/// Write the bin report as pretty-printed JSON
pub fn write_bin_summary<P: AsRef<Path>>(path: P, results: &VariableGeneResults) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &BinReport::new(results))?;
    Ok(())
}
