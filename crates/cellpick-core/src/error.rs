//! Error types for cellpick-core
//!
//! Provides a unified error type for the raster containers. Each variant
//! captures enough context for diagnostics without exposing internal
//! layout details.

use thiserror::Error;

/// cellpick-core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Coordinates outside the raster
    #[error("coordinates ({x}, {y}) outside {width}x{height} raster")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Raster dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Null or empty input
    #[error("null or empty input: {0}")]
    NullInput(&'static str),
}

/// Result type alias for cellpick-core operations
pub type Result<T> = std::result::Result<T, Error>;
