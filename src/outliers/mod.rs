//! Per-bin normalization of log dispersion and outlier calling

mod bin_stats;
mod classify;

pub use bin_stats::{bin_statistics, BinStatistics};
pub use classify::{classify, is_outlier};
