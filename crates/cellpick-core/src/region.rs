//! Region - Binary raster
//!
//! `Region` is a 2D boolean raster used for every intermediate binary
//! image in the editor: seeds, dilation rings, drawn shapes and exclusion
//! zones. It plays the role a 1-bpp image plays in a general image library,
//! but stores one `bool` per pixel so set algebra stays simple.
//!
//! # Memory Layout
//!
//! Data is stored in row-major order with no padding. The pixel at (x, y)
//! is at index `y * width + x`.

use crate::box_::Box;
use crate::error::{Error, Result};

/// Binary raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Region {
    /// Create a new region with every pixel unset
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Region {
            width,
            height,
            data: vec![false; (width as usize) * (height as usize)],
        })
    }

    /// Create a region from raw row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<bool>) -> Result<Self> {
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
        Ok(Region {
            width,
            height,
            data,
        })
    }

    /// Wrap already-validated row-major data
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<bool>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize));
        Region {
            width,
            height,
            data,
        }
    }

    /// Create a region of the same size with every pixel unset
    pub fn create_template(&self) -> Region {
        Region {
            width: self.width,
            height: self.height,
            data: vec![false; self.data.len()],
        }
    }

    /// Get the region width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the region height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the pixel at (x, y), or `None` outside the raster
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.index(x, y)])
    }

    /// Get the pixel at signed coordinates; outside the raster is unset
    #[inline]
    pub fn get_signed(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(x as u32, y as u32).unwrap_or(false)
    }

    /// Get the pixel at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> bool {
        self.data[self.index(x, y)]
    }

    /// Set the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if coordinates are out of range.
    pub fn set(&mut self, x: u32, y: u32, value: bool) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Set the pixel at (x, y) without bounds checking
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: bool) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Get raw access to the pixel data
    #[inline]
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Number of set pixels
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// True if no pixel is set
    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// Iterate over the coordinates of set pixels in raster order
    pub fn iter_set(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(move |(i, _)| ((i as u32) % width, (i as u32) / width))
    }

    /// Set every pixel inside `rect` (clipped to the raster)
    pub fn fill_box(&mut self, rect: &Box) {
        let Some(clipped) = rect.clip(self.width as i32, self.height as i32) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set_unchecked(x as u32, y as u32, true);
            }
        }
    }

    /// Tight bounding box of the set pixels, or `None` if empty
    pub fn bounding_box(&self) -> Option<Box> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y) in self.iter_set() {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        bounds.map(|(x0, y0, x1, y1)| {
            Box::new_unchecked(
                x0 as i32,
                y0 as i32,
                (x1 - x0 + 1) as i32,
                (y1 - y0 + 1) as i32,
            )
        })
    }

    /// Intersection of two regions
    pub fn and(&self, other: &Region) -> Result<Region> {
        self.combine(other, |a, b| a && b)
    }

    /// Union of two regions
    pub fn or(&self, other: &Region) -> Result<Region> {
        self.combine(other, |a, b| a || b)
    }

    /// Symmetric difference of two regions
    pub fn xor(&self, other: &Region) -> Result<Region> {
        self.combine(other, |a, b| a != b)
    }

    /// Pixels of `self` that are not in `other`
    pub fn subtract(&self, other: &Region) -> Result<Region> {
        self.combine(other, |a, b| a && !b)
    }

    /// Complement of the region
    pub fn invert(&self) -> Region {
        Region {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| !v).collect(),
        }
    }

    /// True if the two regions share at least one set pixel
    pub fn intersects(&self, other: &Region) -> Result<bool> {
        self.check_same_size(other)?;
        Ok(self.data.iter().zip(&other.data).any(|(&a, &b)| a && b))
    }

    /// True if every set pixel of `other` is also set in `self`
    pub fn contains(&self, other: &Region) -> Result<bool> {
        self.check_same_size(other)?;
        Ok(self.data.iter().zip(&other.data).all(|(&a, &b)| a || !b))
    }

    /// Copy out the pixels inside `rect`
    ///
    /// # Errors
    ///
    /// Returns an error if `rect` does not lie entirely inside the raster.
    pub fn crop(&self, rect: &Box) -> Result<Region> {
        self.check_rect(rect)?;
        let mut out = Region::new(rect.w as u32, rect.h as u32)?;
        for y in 0..rect.h {
            for x in 0..rect.w {
                let v = self.get_unchecked((rect.x + x) as u32, (rect.y + y) as u32);
                out.set_unchecked(x as u32, y as u32, v);
            }
        }
        Ok(out)
    }

    /// Overwrite the pixels at offset `(x0, y0)` with the contents of `src`
    ///
    /// # Errors
    ///
    /// Returns an error if `src` does not fit inside the raster at that offset.
    pub fn paste(&mut self, src: &Region, x0: i32, y0: i32) -> Result<()> {
        let rect = Box::new_unchecked(x0, y0, src.width as i32, src.height as i32);
        self.check_rect(&rect)?;
        for y in 0..src.height {
            for x in 0..src.width {
                self.set_unchecked(
                    x0 as u32 + x,
                    y0 as u32 + y,
                    src.get_unchecked(x, y),
                );
            }
        }
        Ok(())
    }

    /// Return an error unless `other` has the same dimensions
    pub fn check_same_size(&self, other: &Region) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    fn check_rect(&self, rect: &Box) -> Result<()> {
        let full = Box::new_unchecked(0, 0, self.width as i32, self.height as i32);
        if rect.is_empty() || !full.contains_box(rect) {
            return Err(Error::InvalidParameter(format!(
                "rectangle {:?} outside {}x{} raster",
                rect, self.width, self.height
            )));
        }
        Ok(())
    }

    fn combine(&self, other: &Region, op: impl Fn(bool, bool) -> bool) -> Result<Region> {
        self.check_same_size(other)?;
        Ok(Region {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| op(a, b))
                .collect(),
        })
    }
}
