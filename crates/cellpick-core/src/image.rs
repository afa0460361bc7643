//! Image - Floating-point intensity raster
//!
//! `Image` is the 2D `f32` background the user clicks on. The editing
//! engine only reads it: thresholds, window crops and probe means are all
//! computed from it.
//!
//! # Examples
//!
//! ```
//! use cellpick_core::Image;
//!
//! let mut image = Image::new(64, 48).unwrap();
//! image.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(image.get_pixel(10, 20).unwrap(), 0.5);
//! ```

use crate::box_::Box;
use crate::error::{Error, Result};
use crate::region::Region;
use crate::series::Series;

/// Floating-point image
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data (row-major, no padding)
    data: Vec<f32>,
}

impl Image {
    /// Create a new image with all pixels set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new image with all pixels set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Image {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        })
    }

    /// Create an image from raw row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
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
        Ok(Image {
            width,
            height,
            data,
        })
    }

    /// Create an image by evaluating `f(x, y)` at every pixel
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> f32) -> Result<Self> {
        let mut image = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                image.set_pixel_unchecked(x, y, f(x, y));
            }
        }
        Ok(image)
    }

    /// Average a 3D stack over time into a 2D image
    pub fn from_stack(series: &Series) -> Self {
        let (width, height) = series.dimensions();
        let depth = series.depth() as f64;
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| {
                let sum: f64 = series
                    .time_course_unchecked(x, y)
                    .iter()
                    .map(|&v| v as f64)
                    .sum();
                (sum / depth) as f32
            })
            .collect();
        Image {
            width,
            height,
            data,
        }
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get a pixel value
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if coordinates are out of range.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        self.check_point(x, y)?;
        Ok(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set a pixel value
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if coordinates are out of range.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        self.check_point(x, y)?;
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// Set a pixel value without bounds checking
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = value;
    }

    /// Get raw access to the pixel data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Copy out the pixels inside `rect`
    ///
    /// # Errors
    ///
    /// Returns an error if `rect` does not lie entirely inside the image.
    pub fn crop(&self, rect: &Box) -> Result<Image> {
        let full = Box::new_unchecked(0, 0, self.width as i32, self.height as i32);
        if rect.is_empty() || !full.contains_box(rect) {
            return Err(Error::InvalidParameter(format!(
                "rectangle {:?} outside {}x{} image",
                rect, self.width, self.height
            )));
        }
        let mut data = Vec::with_capacity(rect.area() as usize);
        for y in rect.y..rect.bottom() {
            let start = (y as usize) * (self.width as usize) + rect.x as usize;
            data.extend_from_slice(&self.data[start..start + rect.w as usize]);
        }
        Ok(Image {
            width: rect.w as u32,
            height: rect.h as u32,
            data,
        })
    }

    /// Mean intensity over the set pixels of `region`
    ///
    /// Returns `None` if the region is empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the region size differs.
    pub fn mean_over(&self, region: &Region) -> Result<Option<f64>> {
        if region.dimensions() != self.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: region.dimensions(),
            });
        }
        let (sum, n) = self
            .data
            .iter()
            .zip(region.data())
            .filter(|(_, inside)| **inside)
            .fold((0.0f64, 0usize), |(s, n), (&v, _)| (s + v as f64, n + 1));
        Ok((n > 0).then(|| sum / n as f64))
    }

    /// Region of pixels whose value satisfies `pred`
    pub fn threshold_by(&self, pred: impl Fn(f32) -> bool) -> Region {
        let data = self.data.iter().map(|&v| pred(v)).collect();
        Region::from_raw(self.width, self.height, data)
    }

    fn check_point(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            Image::new(0, 3),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(Image::from_data(2, 2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn test_pixel_access() {
        let mut image = Image::new_with_value(4, 3, 2.5).unwrap();
        assert_eq!(image.get_pixel(3, 2).unwrap(), 2.5);
        image.set_pixel(1, 1, 7.0).unwrap();
        assert_eq!(image.get_pixel(1, 1).unwrap(), 7.0);
        assert!(image.get_pixel(4, 0).is_err());
    }

    #[test]
    fn test_crop() {
        let image = Image::from_fn(6, 6, |x, y| (y * 10 + x) as f32).unwrap();
        let sub = image.crop(&Box::new_unchecked(2, 1, 3, 2)).unwrap();
        assert_eq!(sub.dimensions(), (3, 2));
        assert_eq!(sub.data(), &[12.0, 13.0, 14.0, 22.0, 23.0, 24.0]);
        assert!(image.crop(&Box::new_unchecked(5, 5, 2, 2)).is_err());
    }

    #[test]
    fn test_mean_over() {
        let image = Image::from_fn(4, 4, |x, _| x as f32).unwrap();
        let mut region = Region::new(4, 4).unwrap();
        assert_eq!(image.mean_over(&region).unwrap(), None);
        region.set(1, 0, true).unwrap();
        region.set(3, 2, true).unwrap();
        assert_eq!(image.mean_over(&region).unwrap(), Some(2.0));
        assert!(image.mean_over(&Region::new(3, 4).unwrap()).is_err());
    }

    #[test]
    fn test_threshold_by() {
        let image = Image::from_fn(4, 1, |x, _| x as f32).unwrap();
        let bright = image.threshold_by(|v| v >= 2.0);
        assert_eq!(bright.data(), &[false, false, true, true]);
    }

    #[test]
    fn test_from_stack_averages_over_time() {
        let series = Series::from_frames(
            2,
            1,
            &[vec![1.0, 10.0], vec![3.0, 20.0], vec![5.0, 30.0]],
        )
        .unwrap();
        let image = Image::from_stack(&series);
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.data(), &[3.0, 20.0]);
    }
}
