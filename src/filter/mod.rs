//! Filtering of low-information genes

mod expression;

pub use expression::{expressed_genes, positive_dispersion, select};
