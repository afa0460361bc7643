//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Every SEL built here is symmetric about its origin, so
//! dilation and erosion need no reflection.

use crate::{MorphError, MorphResult};

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - part of the neighborhood
    Hit = 1,
}

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations.
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
}

impl Sel {
    /// Create a new structuring element with every position don't-care
    ///
    /// The origin is placed at the center.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive: {}x{}",
                width, height
            )));
        }
        Ok(Sel {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![SelElement::DontCare; (width * height) as usize],
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.data.fill(SelElement::Hit);
        Ok(sel)
    }

    /// Create a square structuring element with all hits
    pub fn create_square(size: u32) -> MorphResult<Self> {
        Self::create_brick(size, size)
    }

    /// Create a cross (+) structuring element
    ///
    /// `size` is the arm-to-arm extent and must be odd.
    pub fn create_cross(size: u32) -> MorphResult<Self> {
        if size % 2 == 0 {
            return Err(MorphError::InvalidSel(format!(
                "cross size must be odd, got {}",
                size
            )));
        }
        let mut sel = Self::new(size, size)?;
        let c = size / 2;
        for i in 0..size {
            sel.set_element(c, i, SelElement::Hit);
            sel.set_element(i, c, SelElement::Hit);
        }
        Ok(sel)
    }

    /// Create a diamond structuring element
    ///
    /// Hits every position within city-block distance `radius` of the
    /// origin. Radius 0 is the single origin pixel.
    pub fn create_diamond(radius: u32) -> MorphResult<Self> {
        let r = radius as i32;
        Self::from_predicate(radius, |dx, dy| dx.abs() + dy.abs() <= r)
    }

    /// Create a disk structuring element
    ///
    /// Hits every position whose Euclidean distance from the origin is at
    /// most `radius`.
    pub fn create_disk(radius: u32) -> MorphResult<Self> {
        let r2 = (radius as i64) * (radius as i64);
        Self::from_predicate(radius, |dx, dy| {
            (dx as i64) * (dx as i64) + (dy as i64) * (dy as i64) <= r2
        })
    }

    fn from_predicate(radius: u32, inside: impl Fn(i32, i32) -> bool) -> MorphResult<Self> {
        let size = 2 * radius + 1;
        let mut sel = Self::new(size, size)?;
        let r = radius as i32;
        for y in 0..size {
            for x in 0..size {
                if inside(x as i32 - r, y as i32 - r) {
                    sel.set_element(x, y, SelElement::Hit);
                }
            }
        }
        Ok(sel)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Get an element at (x, y)
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set an element at (x, y); positions outside the SEL are ignored
    #[inline]
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = elem;
        }
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.data
            .iter()
            .enumerate()
            .filter_map(move |(idx, &elem)| {
                if elem == SelElement::Hit {
                    let x = (idx as u32 % width) as i32;
                    let y = (idx as u32 / width) as i32;
                    Some((x - cx, y - cy))
                } else {
                    None
                }
            })
    }
}
