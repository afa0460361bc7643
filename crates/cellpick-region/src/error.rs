//! Error types for cellpick-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] cellpick_core::Error),

    /// Invalid seed position
    #[error("invalid seed position: ({x}, {y})")]
    InvalidSeed { x: u32, y: u32 },

    /// Label not present in a labeling
    #[error("no component with label {0}")]
    InvalidLabel(u32),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
