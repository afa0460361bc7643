//! Geometric region builders
//!
//! Regions drawn directly by the user: polygons from accumulated clicks,
//! axis-aligned squares from two corners, and circles stamped at a click.
//! None of them may overlap existing labels.

use crate::error::{EditError, EditResult};
use cellpick_core::{Box, Mask, Pta, Region};
use cellpick_morph::{Sel, binary};

/// How a drawn region is tested against the labels already in the mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapRule {
    /// The region may not share a pixel with any label
    Exact,
    /// The region may not touch the one-pixel cross dilation of the labels
    Dilated,
}

/// Pixels whose centers lie inside the polygon with the given vertices
///
/// # Errors
///
/// Returns `EditError::InvalidRegion` if there are fewer than 3 vertices
/// or no pixel center is inside.
pub fn polygon_region(vertices: &Pta, width: u32, height: u32) -> EditResult<Region> {
    if vertices.len() < 3 {
        return Err(EditError::InvalidRegion(format!(
            "polygon needs at least 3 vertices, got {}",
            vertices.len()
        )));
    }
    let mut region = Region::new(width, height)?;
    let Some(bounds) = vertices
        .bounding_box()
        .and_then(|b| b.clip(width as i32, height as i32))
    else {
        return Err(EditError::InvalidRegion("polygon outside the image".into()));
    };
    for y in bounds.y..bounds.bottom() {
        for x in bounds.x..bounds.right() {
            if vertices.pt_inside_polygon(x as f32, y as f32) {
                region.set_unchecked(x as u32, y as u32, true);
            }
        }
    }
    ensure_nonempty(region, "polygon")
}

/// Rectangle spanned by two diagonal corners, `[min, max)` on each axis
///
/// # Errors
///
/// Returns `EditError::InvalidRegion` if the rectangle covers no pixel.
pub fn square_region(
    corner1: (u32, u32),
    corner2: (u32, u32),
    width: u32,
    height: u32,
) -> EditResult<Region> {
    let mut region = Region::new(width, height)?;
    let rect = Box::from_corners(
        corner1.0 as i32,
        corner1.1 as i32,
        corner2.0 as i32,
        corner2.1 as i32,
    );
    region.fill_box(&rect);
    ensure_nonempty(region, "square")
}

/// Circle stamped at (cx, cy), clipped at the image border
///
/// `disk_size` 1 is the single pixel, 2 a plus-shaped cross, and any
/// larger size a Euclidean disk of radius `disk_size - 1`.
///
/// # Errors
///
/// Returns `EditError::InvalidRegion` if `disk_size` is 0.
pub fn circle_region(
    cx: u32,
    cy: u32,
    disk_size: u32,
    width: u32,
    height: u32,
) -> EditResult<Region> {
    let sel = match disk_size {
        0 => {
            return Err(EditError::InvalidRegion(
                "circle needs a disk size of at least 1".into(),
            ));
        }
        1 => Sel::create_square(1)?,
        2 => Sel::create_cross(3)?,
        d => Sel::create_disk(d - 1)?,
    };
    let mut center = Region::new(width, height)?;
    center.set(cx, cy, true)?;
    let region = binary::dilate(&center, &sel)?;
    ensure_nonempty(region, "circle")
}

/// Check that `region` does not collide with the labels of `mask`
///
/// # Errors
///
/// Returns `EditError::InvalidRegion` on overlap.
pub fn ensure_no_overlap(region: &Region, mask: &Mask, rule: OverlapRule) -> EditResult<()> {
    let occupied = match rule {
        OverlapRule::Exact => mask.foreground(),
        OverlapRule::Dilated => binary::dilate_cross(&mask.foreground())?,
    };
    if region.intersects(&occupied)? {
        return Err(EditError::InvalidRegion(
            "region overlaps an existing label".into(),
        ));
    }
    Ok(())
}

fn ensure_nonempty(region: Region, what: &str) -> EditResult<Region> {
    if region.is_empty() {
        return Err(EditError::InvalidRegion(format!("{} covers no pixel", what)));
    }
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_triangle() {
        let tri = Pta::from_pixels(&[(2, 2), (12, 2), (2, 12)]);
        let r = polygon_region(&tri, 20, 20).unwrap();
        assert_eq!(r.count(), 55);
        assert_eq!(r.get(3, 3), Some(true));
        assert_eq!(r.get(11, 11), Some(false));
    }

    #[test]
    fn test_polygon_too_few_vertices() {
        let line = Pta::from_pixels(&[(2, 2), (12, 2)]);
        assert!(matches!(
            polygon_region(&line, 20, 20),
            Err(EditError::InvalidRegion(_))
        ));
    }

    #[test]
    fn test_polygon_degenerate_is_rejected() {
        let collinear = Pta::from_pixels(&[(0, 0), (5, 5), (9, 9)]);
        assert!(polygon_region(&collinear, 20, 20).is_err());
    }

    #[test]
    fn test_square_half_open_any_corner_order() {
        let r = square_region((6, 5), (2, 1), 10, 10).unwrap();
        assert_eq!(r.count(), 16);
        assert_eq!(r.get(2, 1), Some(true));
        assert_eq!(r.get(6, 5), Some(false));
        assert_eq!(r.bounding_box(), Some(Box::new_unchecked(2, 1, 4, 4)));
    }

    #[test]
    fn test_square_degenerate() {
        assert!(square_region((3, 3), (3, 8), 10, 10).is_err());
    }

    #[test]
    fn test_circle_sizes() {
        assert!(circle_region(5, 5, 0, 11, 11).is_err());
        assert_eq!(circle_region(5, 5, 1, 11, 11).unwrap().count(), 1);
        assert_eq!(circle_region(5, 5, 2, 11, 11).unwrap().count(), 5);
        assert_eq!(circle_region(5, 5, 3, 11, 11).unwrap().count(), 13);
        assert_eq!(circle_region(5, 5, 4, 11, 11).unwrap().count(), 29);
    }

    #[test]
    fn test_circle_clipped_at_border() {
        let r = circle_region(0, 0, 2, 5, 5).unwrap();
        assert_eq!(r.count(), 3);
    }

    #[test]
    fn test_overlap_rules() {
        let mut mask = Mask::new(10, 10).unwrap();
        mask.set(5, 5, 1).unwrap();
        let mut adjacent = Region::new(10, 10).unwrap();
        adjacent.set(6, 5, true).unwrap();

        assert!(ensure_no_overlap(&adjacent, &mask, OverlapRule::Exact).is_ok());
        assert!(ensure_no_overlap(&adjacent, &mask, OverlapRule::Dilated).is_err());

        let mut diagonal = Region::new(10, 10).unwrap();
        diagonal.set(6, 6, true).unwrap();
        assert!(ensure_no_overlap(&diagonal, &mask, OverlapRule::Dilated).is_ok());
    }
}
