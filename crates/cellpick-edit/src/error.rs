//! Error types for cellpick-edit

use thiserror::Error;

/// Errors that can occur while editing a mask
#[derive(Debug, Error)]
pub enum EditError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] cellpick_core::Error),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] cellpick_morph::MorphError),

    /// Region analysis error
    #[error("region error: {0}")]
    Region(#[from] cellpick_region::RegionError),

    /// The proposed region cannot be committed
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// The requested ROI has no pixels
    #[error("ROI is empty")]
    EmptyRoi,

    /// History holds only the initial mask
    #[error("nothing to revert")]
    NothingToRevert,

    /// The operation needs a time series and none was given
    #[error("no time series loaded")]
    MissingSeries,

    /// Click outside the image
    #[error("click ({x}, {y}) outside the image")]
    OutOfBounds { x: u32, y: u32 },

    /// A cancellable operation was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl EditError {
    /// True for errors the session absorbs into a rejected response
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EditError::InvalidRegion(_)
                | EditError::NothingToRevert
                | EditError::MissingSeries
                | EditError::OutOfBounds { .. }
        )
    }
}

/// Result type for editing operations
pub type EditResult<T> = Result<T, EditError>;
