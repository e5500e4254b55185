//! Error types for the stax library.
//!
//! This module defines a comprehensive error enum that covers all possible
//! error conditions in the library.

use thiserror::Error;

/// The main error type for stax operations.
#[derive(Error, Debug)]
pub enum StaxError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid coordinate errors
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinates { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Data not found errors
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// Interpolation errors
    #[error("Interpolation error: {message}")]
    Interpolation { message: String },

    /// Provider-specific read/write failures, surfaced unmodified
    #[error("Provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    /// A capability the provider does not implement
    #[error("Provider {provider} does not support {operation}")]
    UnsupportedOperation { provider: String, operation: String },

    /// Array shape errors from cube assembly
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with StaxError
pub type Result<T> = std::result::Result<T, StaxError>;
