//! Pta - Point arrays
//!
//! Arrays of floating-point coordinate pairs, used for polygon vertices
//! collected from successive clicks.
//!
//! # Storage layout
//!
//! Points are stored as separate X and Y vectors (SoA layout).

use crate::box_::Box;

/// Array of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pta {
    /// X coordinates
    x: Vec<f32>,
    /// Y coordinates
    y: Vec<f32>,
}

impl Pta {
    /// Create a new empty Pta.
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Create a Pta with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Create a Pta from integer pixel coordinates.
    pub fn from_pixels(points: &[(u32, u32)]) -> Self {
        let mut pta = Self::with_capacity(points.len());
        for &(x, y) in points {
            pta.push(x as f32, y as f32);
        }
        pta
    }

    /// Get the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if there are no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Append a point.
    pub fn push(&mut self, x: f32, y: f32) {
        self.x.push(x);
        self.y.push(y);
    }

    /// Get the point at `index`.
    pub fn get(&self, index: usize) -> Option<(f32, f32)> {
        Some((*self.x.get(index)?, *self.y.get(index)?))
    }

    /// Iterate over all points.
    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Return `true` if `(x, y)` is inside the polygon whose vertices are
    /// the points of `self`, in order.
    ///
    /// Uses the even-odd crossing rule with a half-open vertical test, so
    /// the polygon's left and top edges count as inside and its right and
    /// bottom edges as outside. Self-intersecting polygons are handled by
    /// the same parity rule.
    pub fn pt_inside_polygon(&self, x: f32, y: f32) -> bool {
        let n = self.len();
        if n < 3 {
            return false;
        }
        let (px, py) = (x as f64, y as f64);
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (self.x[i] as f64, self.y[i] as f64);
            let (xj, yj) = (self.x[j] as f64, self.y[j] as f64);
            if (yi > py) != (yj > py) {
                let x_cross = (xj - xi) * (py - yi) / (yj - yi) + xi;
                if px < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Integer bounding box enclosing every point (inclusive of the
    /// rightmost and bottommost point).
    ///
    /// Returns `None` if empty.
    pub fn bounding_box(&self) -> Option<Box> {
        if self.is_empty() {
            return None;
        }
        let xmin = self.x.iter().copied().fold(f32::MAX, f32::min).floor() as i32;
        let xmax = self.x.iter().copied().fold(f32::MIN, f32::max).ceil() as i32;
        let ymin = self.y.iter().copied().fold(f32::MAX, f32::min).floor() as i32;
        let ymax = self.y.iter().copied().fold(f32::MIN, f32::max).ceil() as i32;
        Some(Box::new_unchecked(
            xmin,
            ymin,
            xmax - xmin + 1,
            ymax - ymin + 1,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Pta {
        Pta::from_pixels(&[(0, 0), (4, 0), (4, 4), (0, 4)])
    }

    #[test]
    fn test_pt_inside_polygon() {
        let p = square();
        assert!(p.pt_inside_polygon(2.0, 2.0));
        assert!(!p.pt_inside_polygon(5.0, 2.0));
        assert!(!p.pt_inside_polygon(-1.0, 2.0));
    }

    #[test]
    fn test_pt_inside_polygon_edges_half_open() {
        let p = square();
        // Left and top edges are inside
        assert!(p.pt_inside_polygon(0.0, 2.0));
        assert!(p.pt_inside_polygon(2.0, 0.0));
        // Right and bottom edges are outside
        assert!(!p.pt_inside_polygon(4.0, 2.0));
        assert!(!p.pt_inside_polygon(2.0, 4.0));
    }

    #[test]
    fn test_degenerate_polygon() {
        let line = Pta::from_pixels(&[(0, 0), (5, 5)]);
        assert!(!line.pt_inside_polygon(1.0, 1.0));
        let collinear = Pta::from_pixels(&[(0, 0), (2, 2), (4, 4)]);
        assert!(!collinear.pt_inside_polygon(2.0, 2.0));
    }

    #[test]
    fn test_bounding_box() {
        let p = Pta::from_pixels(&[(3, 7), (9, 2), (5, 5)]);
        assert_eq!(p.bounding_box(), Some(Box::new_unchecked(3, 2, 7, 6)));
        assert_eq!(Pta::new().bounding_box(), None);
    }
}
