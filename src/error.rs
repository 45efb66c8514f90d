//! Error types for the cenfind library.

use thiserror::Error;

/// Result type for cenfind operations.
pub type Result<T> = std::result::Result<T, CenfindError>;

/// Error types that can occur while detecting, assigning or scoring.
#[derive(Error, Debug)]
pub enum CenfindError {
    /// The assignment step was given no points or no blobs.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A plane or stack does not have the expected layout.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A region rectangle leaves the plane it is extracted from.
    #[error("Region out of bounds: {0}")]
    OutOfBounds(String),

    /// A detection model could not be located or loaded.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The external detection service failed.
    #[error("Detection service error: {0}")]
    Service(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid matching tolerance.
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(String),

    /// A table is missing a required column.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A table has an unexpected layout or type.
    #[error("Invalid data frame: {0}")]
    InvalidDataFrame(String),

    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error raised by polars while building or writing a table.
    #[error("Polars error: {0}")]
    PolarsError(#[from] polars::error::PolarsError),
}

impl CenfindError {
    /// Whether the error only invalidates the current field.
    ///
    /// Field-scoped errors are logged and the field is skipped; any other
    /// error aborts the whole run.
    pub fn is_field_scoped(&self) -> bool {
        matches!(
            self,
            CenfindError::EmptyInput(_)
                | CenfindError::ShapeMismatch(_)
                | CenfindError::OutOfBounds(_)
        )
    }
}
