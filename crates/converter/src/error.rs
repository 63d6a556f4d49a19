//! Error types for the conversion pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using ConversionError.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Primary error type for SVG to WebP conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    // === Input Errors ===
    #[error("Failed to load SVG data: {0}")]
    Load(String),

    #[error("Failed to load SVG file {path}: {message}")]
    LoadFile { path: PathBuf, message: String },

    #[error("SVG has no dimensions: {0}")]
    InvalidDocument(String),

    #[error("Invalid scale factor: {0}")]
    InvalidScale(f32),

    // === Rendering Errors ===
    #[error("Failed to allocate {width}x{height} raster surface")]
    SurfaceAllocation { width: u32, height: u32 },

    #[error("WebP encoding failed: {0}")]
    Encode(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConversionError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ConversionError::InvalidScale(_) => 400,
            _ => 500,
        }
    }

    /// Short machine-readable label, used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ConversionError::Load(_) | ConversionError::LoadFile { .. } => "load",
            ConversionError::InvalidDocument(_) => "invalid_document",
            ConversionError::InvalidScale(_) => "invalid_scale",
            ConversionError::SurfaceAllocation { .. } => "surface_allocation",
            ConversionError::Encode(_) => "encode",
            ConversionError::Io(_) => "io",
        }
    }
}

impl From<usvg::Error> for ConversionError {
    fn from(err: usvg::Error) -> Self {
        match err {
            // usvg rejects zero-sized documents while parsing
            usvg::Error::InvalidSize => ConversionError::InvalidDocument(err.to_string()),
            other => ConversionError::Load(other.to_string()),
        }
    }
}
