//! Error types for qrcraft operations

use thiserror::Error;

/// Result type alias using qrcraft's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrcraft operations
#[derive(Error, Debug)]
pub enum Error {
    /// Export requested without a rendered symbol
    #[error("No rendered symbol available for export")]
    MissingSymbol,

    /// QR symbol encoding failed (payload rejected or over capacity)
    #[error("Failed to encode QR symbol: {0}")]
    SymbolEncode(String),

    /// Rasterization of the rendered symbol failed
    #[error("Rasterization failed: {0}")]
    Rasterization(String),

    /// Saving the exported image failed
    #[error("Failed to save image: {0}")]
    Save(String),

    /// The host platform lacks the capability needed for sharing
    #[error("Sharing not supported: {0}")]
    ShareUnsupported(String),

    /// Deep-link share requested for an unknown platform identifier
    #[error("Platform not supported: {0}")]
    PlatformNotRecognized(String),

    /// Invalid color name or value
    #[error("Invalid color: {0}")]
    Color(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

// Implement From conversions for common error types

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(format!("JSON error: {}", e))
    }
}
