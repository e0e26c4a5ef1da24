//! Domain error types
//!
//! This module defines the error hierarchy for texport.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main texport error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum TexportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Host application errors
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Filesystem errors (directory creation, missing paths)
    #[error("Filesystem error: {0}")]
    Filesystem(String),

    /// Converter errors
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Host-specific errors
///
/// Errors that occur when talking to the texturing application.
/// These errors don't expose the bridge transport types.
#[derive(Debug, Error)]
pub enum HostError {
    /// No project is open in the host
    #[error("No project is opened")]
    ProjectNotOpened,

    /// The bridge executable could not be started
    #[error("Host bridge unavailable: {0}")]
    BridgeUnavailable(String),

    /// The bridge exited with a non-zero status
    #[error("Host bridge failed: {status} - {message}")]
    BridgeFailed { status: i32, message: String },

    /// Response could not be decoded
    #[error("Invalid response from host: {0}")]
    InvalidResponse(String),

    /// Texture set unknown to the host
    #[error("Texture set not found: {0}")]
    TextureSetNotFound(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for TexportError {
    fn from(err: std::io::Error) -> Self {
        TexportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for TexportError {
    fn from(err: serde_json::Error) -> Self {
        TexportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for TexportError {
    fn from(err: toml::de::Error) -> Self {
        TexportError::Configuration(format!("TOML parse error: {err}"))
    }
}
