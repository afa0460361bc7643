//! Cellpick Core - Raster data structures for the mask editor
//!
//! This crate provides the containers shared by every other cellpick crate:
//!
//! - [`Image`] - 2D floating-point background intensities
//! - [`Series`] - per-pixel time-courses (`W × H × T`)
//! - [`Mask`] - labeled integer raster, values `0..=MAX_MASK_NUMBER`
//! - [`Region`] - binary raster used for every intermediate shape
//! - [`Box`] - rectangles for windows, crops and bounding boxes
//! - [`Pta`] - point arrays (polygon vertices)
//! - [`Histogram`] - integer intensity histogram with Otsu thresholding

pub mod box_;
pub mod error;
pub mod histogram;
pub mod image;
pub mod mask;
pub mod pta;
pub mod region;
pub mod series;

pub use box_::Box;
pub use error::{Error, Result};
pub use histogram::Histogram;
pub use image::Image;
pub use mask::{MAX_MASK_NUMBER, Mask};
pub use pta::Pta;
pub use region::Region;
pub use series::Series;

/// Color channel helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (
            ((pixel >> RED_SHIFT) & 0xff) as u8,
            ((pixel >> GREEN_SHIFT) & 0xff) as u8,
            ((pixel >> BLUE_SHIFT) & 0xff) as u8,
            ((pixel >> ALPHA_SHIFT) & 0xff) as u8,
        )
    }

}
