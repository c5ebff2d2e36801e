//! Error types for the ingestion crate.

use storm_common::StormError;
use thiserror::Error;

/// Errors that can occur outside a single product's extraction.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),

    #[error(transparent)]
    Product(#[from] StormError),
}

impl IngestionError {
    /// The product error, when this failure came from extraction.
    pub fn as_storm_error(&self) -> Option<&StormError> {
        match self {
            IngestionError::Product(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;
