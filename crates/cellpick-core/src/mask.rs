//! Mask - Labeled integer raster
//!
//! A `Mask` assigns each pixel a mask number: 0 for background, 1 to
//! [`MAX_MASK_NUMBER`] for one of the groups the user draws into. A group
//! may hold several disjoint ROIs; those are recovered by connected
//! component labeling when needed and never stored here.

use crate::error::{Error, Result};
use crate::region::Region;

/// Largest mask number a pixel may carry
pub const MAX_MASK_NUMBER: u16 = 8;

/// Labeled integer raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u16>,
}

impl Mask {
    /// Create an all-background mask
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Mask {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize)],
        })
    }

    /// Create a mask from row-major values
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid, the data length doesn't
    /// match, or a value exceeds [`MAX_MASK_NUMBER`].
    pub fn from_data(width: u32, height: u32, data: Vec<u16>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }
        if let Some(&bad) = data.iter().find(|&&v| v > MAX_MASK_NUMBER) {
            return Err(Error::InvalidParameter(format!(
                "mask value {} exceeds {}",
                bad, MAX_MASK_NUMBER
            )));
        }
        Ok(Mask {
            width,
            height,
            data,
        })
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the value at (x, y), or `None` outside the raster
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Set the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are outside the raster or
    /// `value` exceeds [`MAX_MASK_NUMBER`].
    pub fn set(&mut self, x: u32, y: u32, value: u16) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        check_value(value)?;
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = value;
        Ok(())
    }

    /// Raw row-major values
    #[inline]
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Number of labeled pixels
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Pixels carrying any nonzero value
    pub fn foreground(&self) -> Region {
        self.region_where(|v| v != 0)
    }

    /// Return a copy with every pixel of `region` set to `value`
    ///
    /// # Errors
    ///
    /// Returns an error if the region size differs or `value` exceeds
    /// [`MAX_MASK_NUMBER`].
    pub fn painted(&self, region: &Region, value: u16) -> Result<Mask> {
        let mut out = self.clone();
        out.paint(region, value)?;
        Ok(out)
    }

    /// Set every pixel of `region` to `value` in place
    ///
    /// # Errors
    ///
    /// Returns an error if the region size differs or `value` exceeds
    /// [`MAX_MASK_NUMBER`].
    pub fn paint(&mut self, region: &Region, value: u16) -> Result<()> {
        if self.dimensions() != region.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: region.dimensions(),
            });
        }
        check_value(value)?;
        for (v, &inside) in self.data.iter_mut().zip(region.data()) {
            if inside {
                *v = value;
            }
        }
        Ok(())
    }

    fn region_where(&self, pred: impl Fn(u16) -> bool) -> Region {
        let data = self.data.iter().map(|&v| pred(v)).collect();
        Region::from_raw(self.width, self.height, data)
    }
}

fn check_value(value: u16) -> Result<()> {
    if value > MAX_MASK_NUMBER {
        return Err(Error::InvalidParameter(format!(
            "mask value {} exceeds {}",
            value, MAX_MASK_NUMBER
        )));
    }
    Ok(())
}
