//! Error types for the plantlabel library.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::Finding;

/// Main error type for plantlabel operations.
#[derive(Debug, Error)]
pub enum PlantLabelError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no rows to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// One or more required columns are missing from the header.
    #[error("Missing required columns: {missing:?} (available columns: {available:?})")]
    Schema {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// At least one row failed field-level validation.
    #[error("{} validation error(s) in plant data", findings.len())]
    DatasetValidation { findings: Vec<Finding> },

    /// Invalid renderer parameter configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The external renderer could not be found or did not answer.
    #[error("Renderer unavailable: {0}")]
    RendererUnavailable(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlantLabelError {
    /// Row-level findings carried by a dataset validation failure.
    pub fn findings(&self) -> &[Finding] {
        match self {
            PlantLabelError::DatasetValidation { findings } => findings,
            _ => &[],
        }
    }
}

/// Result type alias for plantlabel operations.
pub type Result<T> = std::result::Result<T, PlantLabelError>;
