//! Session parameters
//!
//! User-adjustable settings that persist across edits. Every setter clamps
//! to the valid range, so a parameter set is always usable.

use crate::error::{EditError, EditResult};
use cellpick_core::MAX_MASK_NUMBER;

/// Largest dilation disk size
pub const MAX_DISK_SIZE: u32 = 99;

/// Largest contrast threshold
pub const MAX_CONTRAST_THRESHOLD: f64 = 99.99;

/// Contrast threshold change per key press
pub const CONTRAST_STEP: f64 = 0.01;

/// Settings used by the region builders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionParams {
    /// Growth window half-width, circle size and legacy expansion radius
    pub disk_size: u32,
    /// Fraction of the probe mean that counts as bright in legacy growth
    pub contrast_threshold: f64,
    /// Probe radius for legacy growth
    pub cell_radius: u32,
    /// Mask number assigned to newly drawn regions
    pub mask_number: u16,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            disk_size: 1,
            contrast_threshold: 0.95,
            cell_radius: 3,
            mask_number: 1,
        }
    }
}

impl SessionParams {
    /// Set the disk size (clamped to `0..=MAX_DISK_SIZE`)
    pub fn with_disk_size(mut self, disk_size: u32) -> Self {
        self.disk_size = disk_size.min(MAX_DISK_SIZE);
        self
    }

    /// Set the contrast threshold (clamped to `0..=MAX_CONTRAST_THRESHOLD`)
    pub fn with_contrast_threshold(mut self, contrast: f64) -> Self {
        self.contrast_threshold = clamp_contrast(contrast);
        self
    }

    /// Set the cell radius (at least 1)
    pub fn with_cell_radius(mut self, cell_radius: u32) -> Self {
        self.cell_radius = cell_radius.max(1);
        self
    }

    /// Set the mask number (clamped to `1..=MAX_MASK_NUMBER`)
    pub fn with_mask_number(mut self, mask_number: u16) -> Self {
        self.mask_number = mask_number.clamp(1, MAX_MASK_NUMBER);
        self
    }

    /// Select the mask number for new regions
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` unless `1 <= n <= MAX_MASK_NUMBER`.
    pub fn set_mask_number(&mut self, n: u16) -> EditResult<()> {
        if n == 0 || n > MAX_MASK_NUMBER {
            return Err(EditError::InvalidParameter(format!(
                "mask number {} not in 1..={}",
                n, MAX_MASK_NUMBER
            )));
        }
        self.mask_number = n;
        Ok(())
    }

    /// Change the disk size by `delta`, saturating at the range ends
    pub fn adjust_disk_size(&mut self, delta: i32) {
        let next = self.disk_size as i64 + delta as i64;
        self.disk_size = next.clamp(0, MAX_DISK_SIZE as i64) as u32;
    }

    /// Change the contrast threshold by `steps` increments of `CONTRAST_STEP`
    pub fn adjust_contrast(&mut self, steps: i32) {
        let raw = self.contrast_threshold + steps as f64 * CONTRAST_STEP;
        // Two decimals, like a spin box
        self.contrast_threshold = clamp_contrast((raw * 100.0).round() / 100.0);
    }

    /// Change the cell radius by `delta`, never going below 1
    pub fn adjust_cell_radius(&mut self, delta: i32) {
        let next = self.cell_radius as i64 + delta as i64;
        self.cell_radius = next.clamp(1, u32::MAX as i64) as u32;
    }
}

fn clamp_contrast(c: f64) -> f64 {
    if c.is_nan() {
        return 0.0;
    }
    c.clamp(0.0, MAX_CONTRAST_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = SessionParams::default();
        assert_eq!(p.disk_size, 1);
        assert_eq!(p.contrast_threshold, 0.95);
        assert_eq!(p.cell_radius, 3);
        assert_eq!(p.mask_number, 1);
    }

    #[test]
    fn test_builders_clamp() {
        let p = SessionParams::default()
            .with_disk_size(500)
            .with_contrast_threshold(-1.0)
            .with_cell_radius(0)
            .with_mask_number(12);
        assert_eq!(p.disk_size, MAX_DISK_SIZE);
        assert_eq!(p.contrast_threshold, 0.0);
        assert_eq!(p.cell_radius, 1);
        assert_eq!(p.mask_number, MAX_MASK_NUMBER);
    }

    #[test]
    fn test_set_mask_number() {
        let mut p = SessionParams::default();
        p.set_mask_number(8).unwrap();
        assert_eq!(p.mask_number, 8);
        assert!(p.set_mask_number(0).is_err());
        assert!(p.set_mask_number(9).is_err());
        assert_eq!(p.mask_number, 8);
    }

    #[test]
    fn test_adjust_saturates() {
        let mut p = SessionParams::default();
        p.adjust_disk_size(-5);
        assert_eq!(p.disk_size, 0);
        p.adjust_disk_size(200);
        assert_eq!(p.disk_size, MAX_DISK_SIZE);
        p.adjust_cell_radius(-10);
        assert_eq!(p.cell_radius, 1);
        p.adjust_cell_radius(2);
        assert_eq!(p.cell_radius, 3);
    }

    #[test]
    fn test_adjust_contrast_steps() {
        let mut p = SessionParams::default();
        p.adjust_contrast(1);
        assert_eq!(p.contrast_threshold, 0.96);
        for _ in 0..3 {
            p.adjust_contrast(-1);
        }
        assert_eq!(p.contrast_threshold, 0.93);
        p.adjust_contrast(-1000);
        assert_eq!(p.contrast_threshold, 0.0);
    }
}
