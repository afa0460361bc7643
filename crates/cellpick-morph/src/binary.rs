//! Binary morphological operations
//!
//! Implements erosion, dilation and opening on [`Region`]s.
//!
//! Pixels outside the raster are treated as background unless a function
//! says otherwise, so erosion shrinks regions that touch the border and
//! dilation never writes outside it.

use crate::{MorphResult, Sel};
use cellpick_core::Region;

/// Dilate a region
///
/// A pixel is set in the output if any hit of the SEL, placed with its
/// origin on that pixel, lands on a set source pixel.
pub fn dilate(region: &Region, sel: &Sel) -> MorphResult<Region> {
    let (w, h) = region.dimensions();
    let mut out = region.create_template();
    let offsets: Vec<_> = sel.hit_offsets().collect();

    for (x, y) in region.iter_set() {
        for &(dx, dy) in &offsets {
            let tx = x as i32 + dx;
            let ty = y as i32 + dy;
            if tx >= 0 && ty >= 0 && (tx as u32) < w && (ty as u32) < h {
                out.set_unchecked(tx as u32, ty as u32, true);
            }
        }
    }
    Ok(out)
}

/// Erode a region
///
/// A pixel is set in the output only if every hit of the SEL, placed with
/// its origin on that pixel, lands on a set source pixel. Hits falling
/// outside the raster count as background.
pub fn erode(region: &Region, sel: &Sel) -> MorphResult<Region> {
    let mut out = region.create_template();
    let offsets: Vec<_> = sel.hit_offsets().collect();

    for (x, y) in region.iter_set() {
        let keep = offsets
            .iter()
            .all(|&(dx, dy)| region.get_signed(x as i32 + dx, y as i32 + dy));
        if keep {
            out.set_unchecked(x, y, true);
        }
    }
    Ok(out)
}

/// Erode a region with its edge pixels replicated outward
///
/// Like [`erode`], but a hit falling outside the raster takes the value of
/// the nearest pixel inside it. A region covering the whole raster comes
/// back unchanged.
pub fn erode_replicate(region: &Region, sel: &Sel) -> MorphResult<Region> {
    let (w, h) = region.dimensions();
    let mut out = region.create_template();
    let offsets: Vec<_> = sel.hit_offsets().collect();
    let (max_x, max_y) = (w as i32 - 1, h as i32 - 1);

    for (x, y) in region.iter_set() {
        let keep = offsets.iter().all(|&(dx, dy)| {
            let tx = (x as i32 + dx).clamp(0, max_x);
            let ty = (y as i32 + dy).clamp(0, max_y);
            region.get_signed(tx, ty)
        });
        if keep {
            out.set_unchecked(x, y, true);
        }
    }
    Ok(out)
}

/// Open a region (erosion followed by dilation)
pub fn open(region: &Region, sel: &Sel) -> MorphResult<Region> {
    let eroded = erode(region, sel)?;
    dilate(&eroded, sel)
}

/// Dilate by the 3×3 cross
pub fn dilate_cross(region: &Region) -> MorphResult<Region> {
    dilate(region, &Sel::create_cross(3)?)
}

/// Erode by the 3×3 cross with the edge replicated
pub fn erode_cross_replicate(region: &Region) -> MorphResult<Region> {
    erode_replicate(region, &Sel::create_cross(3)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(w: u32, h: u32, x: u32, y: u32) -> Region {
        let mut r = Region::new(w, h).unwrap();
        r.set(x, y, true).unwrap();
        r
    }

    #[test]
    fn test_dilate_point_by_cross() {
        let d = dilate_cross(&point(5, 5, 2, 2)).unwrap();
        assert_eq!(d.count(), 5);
        assert_eq!(d.get(2, 1), Some(true));
        assert_eq!(d.get(1, 1), Some(false));
    }

    #[test]
    fn test_dilate_clips_at_border() {
        let d = dilate_cross(&point(5, 5, 0, 0)).unwrap();
        assert_eq!(d.count(), 3);
    }

    #[test]
    fn test_erode_outside_is_background() {
        let mut full = Region::new(4, 4).unwrap();
        full.fill_box(&cellpick_core::Box::new_unchecked(0, 0, 4, 4));
        let e = erode(&full, &Sel::create_cross(3).unwrap()).unwrap();
        // Only the 2x2 interior survives
        assert_eq!(e.count(), 4);
        assert_eq!(e.get(1, 1), Some(true));
        assert_eq!(e.get(0, 1), Some(false));
    }

    #[test]
    fn test_open_removes_isolated_pixel() {
        let mut r = Region::new(9, 9).unwrap();
        r.fill_box(&cellpick_core::Box::new_unchecked(1, 1, 5, 5));
        r.set(8, 8, true).unwrap();
        let sel = Sel::create_square(3).unwrap();
        let o = open(&r, &sel).unwrap();
        assert_eq!(o.get(8, 8), Some(false));
        assert_eq!(o.count(), 25);
    }

    #[test]
    fn test_erode_replicate_keeps_full_raster() {
        let mut full = Region::new(2, 2).unwrap();
        full.fill_box(&cellpick_core::Box::new_unchecked(0, 0, 2, 2));
        assert_eq!(erode_cross_replicate(&full).unwrap(), full);
    }

    #[test]
    fn test_erode_replicate_edge_follows_neighbor() {
        // Column 0 set, column 1 clear: the edge replicates column 0 but
        // the right neighbor is background
        let column = [true, false, false];
        let r = Region::from_data(3, 3, column.repeat(3)).unwrap();
        assert_eq!(erode_cross_replicate(&r).unwrap().count(), 0);

        let mut band = Region::new(4, 3).unwrap();
        band.fill_box(&cellpick_core::Box::new_unchecked(0, 0, 2, 3));
        let e = erode_cross_replicate(&band).unwrap();
        // Column 0 survives through replication, column 1 touches column 2
        assert_eq!(e.count(), 3);
        assert_eq!(e.get(0, 0), Some(true));
        assert_eq!(e.get(1, 1), Some(false));
    }
}
