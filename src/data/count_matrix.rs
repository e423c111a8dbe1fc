//! Count matrix representation for normalized RNA-seq data

use std::collections::{HashMap, HashSet};

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{Result, VarGenesError};

/// Deduplicate names by appending _1, _2, etc. to repeated entries.
///
/// A suffix already used by another name in the input is skipped.
fn deduplicate_names(names: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = names.iter().cloned().collect();
    if taken.len() == names.len() {
        return names;
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(names.len());
    for name in names {
        let count = seen.entry(name.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            result.push(name);
            continue;
        }

        let mut suffix = *count - 1;
        let mut new_name = format!("{}_{}", name, suffix);
        while taken.contains(&new_name) {
            suffix += 1;
            new_name = format!("{}_{}", name, suffix);
        }
        log::warn!("Duplicate gene name '{}' renamed to '{}'", name, new_name);
        taken.insert(new_name.clone());
        result.push(new_name);
    }
    result
}

/// Normalized counts, one row per gene and one column per replicate sample
#[derive(Debug, Clone)]
pub struct CountMatrix {
    /// Count data (genes x samples)
    counts: Array2<f64>,
    /// Gene identifiers
    gene_ids: Vec<String>,
    /// Sample identifiers (column names)
    sample_ids: Vec<String>,
}

impl CountMatrix {
    /// Create a new count matrix from raw data
    pub fn new(counts: Array2<f64>, gene_ids: Vec<String>, sample_ids: Vec<String>) -> Result<Self> {
        let (n_genes, n_samples) = counts.dim();

        if gene_ids.len() != n_genes {
            return Err(VarGenesError::DimensionMismatch {
                expected: format!("{} gene IDs", n_genes),
                got: format!("{} gene IDs", gene_ids.len()),
            });
        }

        if sample_ids.len() != n_samples {
            return Err(VarGenesError::DimensionMismatch {
                expected: format!("{} sample IDs", n_samples),
                got: format!("{} sample IDs", sample_ids.len()),
            });
        }

        if let Some(((i, j), &x)) = counts
            .indexed_iter()
            .find(|(_, &x)| x < 0.0 || !x.is_finite())
        {
            return Err(VarGenesError::InvalidCountMatrix {
                reason: format!(
                    "Counts must be non-negative finite values, found {} for gene '{}' in sample '{}'",
                    x, gene_ids[i], sample_ids[j]
                ),
            });
        }

        let gene_ids = deduplicate_names(gene_ids);

        Ok(Self {
            counts,
            gene_ids,
            sample_ids,
        })
    }

    /// Get the number of genes
    pub fn n_genes(&self) -> usize {
        self.counts.nrows()
    }

    /// Get the number of samples
    pub fn n_samples(&self) -> usize {
        self.counts.ncols()
    }

    /// Get the counts as a view
    pub fn counts(&self) -> ArrayView2<'_, f64> {
        self.counts.view()
    }

    /// Get gene IDs
    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    /// Get sample IDs
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Get counts for a specific gene
    pub fn gene_counts(&self, gene_idx: usize) -> ArrayView1<'_, f64> {
        self.counts.row(gene_idx)
    }

    /// Get sample index by ID
    pub fn sample_index(&self, sample_id: &str) -> Option<usize> {
        self.sample_ids.iter().position(|id| id == sample_id)
    }

    /// Subset to the named sample columns, in the order given
    pub fn select_samples<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let indices = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.sample_index(name).ok_or_else(|| VarGenesError::MissingColumn {
                    name: name.to_string(),
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        self.subset_samples(&indices)
    }

    /// Subset to specific samples
    pub fn subset_samples(&self, sample_indices: &[usize]) -> Result<Self> {
        let new_counts = self.counts.select(Axis(1), sample_indices);
        let new_sample_ids: Vec<String> = sample_indices
            .iter()
            .map(|&i| self.sample_ids[i].clone())
            .collect();

        Self::new(new_counts, self.gene_ids.clone(), new_sample_ids)
    }
}
