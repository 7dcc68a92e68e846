//! Error types for the simulation engine

use thiserror::Error;

/// Main error type for simulation operations
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Backing scene unavailable - detailed response path cannot run")]
    SceneUnavailable,

    #[error("Numeric divergence: {0}")]
    Divergence(String),

    #[error("No simulation result - run has not completed")]
    NoResult,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;
