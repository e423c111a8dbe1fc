//! Error types for rust_vargenes

use thiserror::Error;

/// Main error type for variable-gene detection
#[derive(Error, Debug)]
pub enum VarGenesError {
    #[error("Invalid count matrix: {reason}")]
    InvalidCountMatrix { reason: String },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    #[error("Sample column '{name}' not found in count matrix")]
    MissingColumn { name: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Plot rendering failed: {reason}")]
    PlotFailed { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Excel writer error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Empty data: {reason}")]
    EmptyData { reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

/// Result type alias for variable-gene operations
pub type Result<T> = std::result::Result<T, VarGenesError>;
