//! Expression-level bins for local dispersion normalization

mod assign;
mod bins;

pub use assign::{assign_bins, BinnedTable};
pub use bins::{create_bins, find_bin, index_or_sentinel, Bin, BinGroup, BinLayout, UNBINNED};
