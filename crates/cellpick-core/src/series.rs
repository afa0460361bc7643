//! Series - Per-pixel time-courses
//!
//! A `Series` is a `W × H × T` stack of `f32` samples. It is stored
//! pixel-major: the `T` samples of one pixel are contiguous, so a
//! time-course is a plain slice and correlation code can walk it without
//! striding.
//!
//! # Memory Layout
//!
//! Sample `k` of pixel (x, y) is at index `(y * width + x) * depth + k`.

use crate::box_::Box;
use crate::error::{Error, Result};

/// Stack of per-pixel time-courses
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    width: u32,
    height: u32,
    depth: u32,
    data: Vec<f32>,
}

impl Series {
    /// Create a zero-filled series
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is 0.
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self> {
        check_dims(width, height, depth)?;
        Ok(Series {
            width,
            height,
            depth,
            data: vec![0.0; (width as usize) * (height as usize) * (depth as usize)],
        })
    }

    /// Create a series from pixel-major data
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is 0 or the data length doesn't match.
    pub fn from_data(width: u32, height: u32, depth: u32, data: Vec<f32>) -> Result<Self> {
        check_dims(width, height, depth)?;
        let expected = (width as usize) * (height as usize) * (depth as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                depth,
                expected
            )));
        }
        Ok(Series {
            width,
            height,
            depth,
            data,
        })
    }

    /// Create a series from a list of row-major frames, one per timepoint
    ///
    /// # Errors
    ///
    /// Returns an error if there are no frames or a frame has the wrong size.
    pub fn from_frames(width: u32, height: u32, frames: &[Vec<f32>]) -> Result<Self> {
        let depth = frames.len() as u32;
        let mut series = Series::new(width, height, depth)?;
        let npix = (width as usize) * (height as usize);
        for (k, frame) in frames.iter().enumerate() {
            if frame.len() != npix {
                return Err(Error::InvalidParameter(format!(
                    "frame {} has {} samples, expected {}",
                    k,
                    frame.len(),
                    npix
                )));
            }
            for (p, &v) in frame.iter().enumerate() {
                series.data[p * depth as usize + k] = v;
            }
        }
        Ok(series)
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

    /// Number of timepoints
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Spatial dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Time-course of pixel (x, y), or `None` outside the raster
    pub fn time_course(&self, x: u32, y: u32) -> Option<&[f32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.time_course_unchecked(x, y))
    }

    /// Time-course of pixel (x, y) without bounds checking
    #[inline]
    pub fn time_course_unchecked(&self, x: u32, y: u32) -> &[f32] {
        let start = ((y as usize) * (self.width as usize) + (x as usize)) * self.depth as usize;
        &self.data[start..start + self.depth as usize]
    }

    /// Set sample `k` of pixel (x, y)
    ///
    /// # Errors
    ///
    /// Returns an error if any coordinate is out of range.
    pub fn set(&mut self, x: u32, y: u32, k: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        if k >= self.depth {
            return Err(Error::IndexOutOfBounds {
                index: k as usize,
                len: self.depth as usize,
            });
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * self.depth as usize
            + k as usize;
        self.data[idx] = value;
        Ok(())
    }

    /// Copy out the time-courses of the pixels inside `rect`
    ///
    /// # Errors
    ///
    /// Returns an error if `rect` does not lie entirely inside the raster.
    pub fn crop(&self, rect: &Box) -> Result<Series> {
        let full = Box::new_unchecked(0, 0, self.width as i32, self.height as i32);
        if rect.is_empty() || !full.contains_box(rect) {
            return Err(Error::InvalidParameter(format!(
                "rectangle {:?} outside {}x{} series",
                rect, self.width, self.height
            )));
        }
        let row_len = rect.w as usize * self.depth as usize;
        let mut data = Vec::with_capacity(row_len * rect.h as usize);
        for y in rect.y..rect.bottom() {
            let start =
                ((y as usize) * (self.width as usize) + rect.x as usize) * self.depth as usize;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Ok(Series {
            width: rect.w as u32,
            height: rect.h as u32,
            depth: self.depth,
            data,
        })
    }
}

fn check_dims(width: u32, height: u32, depth: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    if depth == 0 {
        return Err(Error::NullInput("series has no timepoints"));
    }
    Ok(())
}
