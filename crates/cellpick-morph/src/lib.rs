//! cellpick-morph - Morphological operations on binary regions
//!
//! This crate provides:
//!
//! - Structuring elements (SEL): brick, cross, city-block diamond and
//!   Euclidean disk
//! - Binary morphology on [`Region`](cellpick_core::Region): erosion,
//!   dilation and opening, plus an erosion that replicates the raster edge

pub mod binary;
mod error;
pub mod sel;

pub use binary::{dilate, dilate_cross, erode, erode_cross_replicate, erode_replicate, open};
pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};
