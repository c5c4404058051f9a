use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "http")]
use crate::llm::HttpError;

/// Error type for schema inference and the I/O around it.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no header row.
    #[error("Empty file or no data to analyze")]
    EmptyData,

    /// Malformed table data handed to the inference core.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required file does not exist.
    #[error("{what} not found: {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },

    /// Remote model request failed.
    #[cfg(feature = "http")]
    #[error("Model request failed: {0}")]
    Http(#[from] HttpError),
}

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
