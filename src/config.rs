//! Pipeline configuration
//!
//! Every parameter of a run lives here with its default value. The command
//! line only exposes file paths; thresholds and bin geometry are set through
//! this struct by library callers.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::binning::{BinGroup, BinLayout};
use crate::error::{Result, VarGenesError};
use crate::plot::PlotStyle;

/// Genes with a lower mean count are treated as noise and dropped
pub const DEFAULT_MIN_BASE_MEAN: f64 = 10.0;

/// Standard deviations above the bin mean that make a gene an outlier
pub const DEFAULT_OUTLIER_SD: f64 = 2.0;

/// Bins are laid out over `log10(basemean) * DEFAULT_BIN_SCALE`
pub const DEFAULT_BIN_SCALE: f64 = 100.0;

/// Fine bins from basemean 10 upwards, then one wide bin for highly
/// expressed genes
pub const DEFAULT_BIN_GROUPS: [BinGroup; 2] = [
    BinGroup {
        lower_bound: 100.0,
        width: 25.0,
        quantity: 6,
    },
    BinGroup {
        lower_bound: 275.0,
        width: 800.0,
        quantity: 1,
    },
];

/// Parameters for one variable-gene run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Tab-separated normalized count matrix
    pub counts_path: PathBuf,
    /// Raster image for the dispersion vs mean scatter plot; `None` skips it
    pub plot_path: Option<PathBuf>,
    /// Annotated gene table
    pub table_path: PathBuf,
    /// Optional JSON report of per-bin statistics
    pub summary_path: Option<PathBuf>,
    /// Sample columns to use; `None` uses every column of the matrix
    pub sample_columns: Option<Vec<String>>,
    pub min_base_mean: f64,
    pub bin_groups: Vec<BinGroup>,
    pub bin_scale: f64,
    pub outlier_sd: f64,
    pub plot_style: PlotStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            counts_path: PathBuf::from("normalized_counts.txt"),
            plot_path: Some(PathBuf::from("dispersion_vs_mean_expression.png")),
            table_path: PathBuf::from("variable_genes.tsv"),
            summary_path: None,
            sample_columns: None,
            min_base_mean: DEFAULT_MIN_BASE_MEAN,
            bin_groups: DEFAULT_BIN_GROUPS.to_vec(),
            bin_scale: DEFAULT_BIN_SCALE,
            outlier_sd: DEFAULT_OUTLIER_SD,
            plot_style: PlotStyle::default(),
        }
    }
}

fn invalid(reason: String) -> VarGenesError {
    VarGenesError::InvalidConfig { reason }
}

impl PipelineConfig {
    /// Bins built from `bin_groups`
    pub fn layout(&self) -> BinLayout {
        BinLayout::from_groups(&self.bin_groups)
    }

    /// Check every field; returns the first problem found
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("counts_path", Some(&self.counts_path)),
            ("plot_path", self.plot_path.as_ref()),
            ("table_path", Some(&self.table_path)),
            ("summary_path", self.summary_path.as_ref()),
        ] {
            if path.is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(invalid(format!("{} is empty", name)));
            }
        }

        if !(self.min_base_mean.is_finite() && self.min_base_mean > 0.0) {
            return Err(invalid(format!(
                "min_base_mean must be a positive number, got {}",
                self.min_base_mean
            )));
        }
        if !(self.outlier_sd.is_finite() && self.outlier_sd >= 0.0) {
            return Err(invalid(format!(
                "outlier_sd must be a non-negative number, got {}",
                self.outlier_sd
            )));
        }
        if !(self.bin_scale.is_finite() && self.bin_scale > 0.0) {
            return Err(invalid(format!(
                "bin_scale must be a positive number, got {}",
                self.bin_scale
            )));
        }

        if self.bin_groups.is_empty() {
            return Err(invalid("at least one bin group is required".to_string()));
        }
        for (i, group) in self.bin_groups.iter().enumerate() {
            if !group.lower_bound.is_finite() {
                return Err(invalid(format!("bin group {} has a non-finite lower bound", i)));
            }
            if !(group.width.is_finite() && group.width > 0.0) {
                return Err(invalid(format!(
                    "bin group {} width must be positive, got {}",
                    i, group.width
                )));
            }
        }
        let layout = self.layout();
        if let Some((a, b)) = layout.first_overlap() {
            return Err(invalid(format!(
                "bins {} {} and {} {} overlap",
                a,
                layout.bins()[a],
                b,
                layout.bins()[b]
            )));
        }

        if let Some(columns) = &self.sample_columns {
            if columns.len() < 2 {
                return Err(invalid(format!(
                    "at least 2 sample columns are required, got {}",
                    columns.len()
                )));
            }
            let mut seen = HashSet::new();
            if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
                return Err(invalid(format!("sample column '{}' listed twice", dup)));
            }
        }

        self.plot_style.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.layout().len(), 9);
    }

    #[test]
    fn test_invalid_thresholds() {
        let config = PipelineConfig {
            min_base_mean: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            outlier_sd: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            bin_scale: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_bins() {
        let config = PipelineConfig {
            bin_groups: vec![BinGroup::new(0.0, 0.0, 3)],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            bin_groups: vec![BinGroup::new(0.0, 10.0, 3), BinGroup::new(35.0, 10.0, 1)],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(VarGenesError::InvalidConfig { .. })));

        let config = PipelineConfig {
            bin_groups: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_sample_columns() {
        let config = PipelineConfig {
            sample_columns: Some(vec!["a".to_string(), "b".to_string(), "a".to_string()]),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            sample_columns: Some(vec!["a".to_string()]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_path() {
        let config = PipelineConfig {
            table_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            plot_path: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            plot_path: None,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
