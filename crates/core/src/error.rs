//! Error types for the marbling core.

use thiserror::Error;

/// Errors produced by marbling operations.
#[derive(Debug, Error)]
pub enum MarblingError {
    /// A drop was constructed with fewer than 3 vertices; such a polygon
    /// cannot be fan-triangulated.
    #[error("vertex count must be at least 3, got {got}")]
    InvalidVertexCount { got: usize },

    /// A drop radius was zero, negative, or not finite.
    #[error("drop radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A palette name was not recognized.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// A file could not be written or read.
    #[error("io error: {0}")]
    Io(String),
}
