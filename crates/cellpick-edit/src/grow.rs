//! Morphological growth engine
//!
//! Two ways to turn a single click into a region:
//!
//! - [`grow_region`]: Otsu-threshold a window around the click, keep the
//!   dark core, dilate it, optionally refine it against the time series,
//!   and keep clear of existing labels.
//! - [`legacy_grow_region`]: probe a diamond around the click, take the
//!   connected bright area relative to the probe mean, smooth it and
//!   expand it.

use crate::error::{EditError, EditResult};
use crate::params::SessionParams;
use crate::refine::{RefineOptions, refine_region};
use cellpick_core::{Box, Histogram, Image, Mask, Region, Series};
use cellpick_morph::{Sel, binary};
use cellpick_region::{ConnectivityType, component_at};
use rand::Rng;
use tracing::{debug, warn};

/// Seed for growth at (x, y)
///
/// The window `[x - d, x + d) × [y - d, y + d)` (clipped) is thresholded
/// with Otsu's method; pixels at or below the threshold are eroded by the
/// 3×3 cross within the window, with the window edge replicated outward,
/// then the result is dilated once by the cross in full-image coordinates.
/// A uniformly dark 2×2 window at disk size 1 therefore survives.
///
/// # Errors
///
/// Returns `EditError::InvalidRegion` if `disk_size` is 0 and
/// `EditError::OutOfBounds` if the click is outside the image.
pub fn seed_region(image: &Image, x: u32, y: u32, disk_size: u32) -> EditResult<Region> {
    check_click(image, x, y)?;
    if disk_size == 0 {
        return Err(EditError::InvalidRegion(
            "growth needs a disk size of at least 1".into(),
        ));
    }
    let (width, height) = image.dimensions();
    let window = Box::centered(x as i32, y as i32, disk_size as i32)
        .clip(width as i32, height as i32)
        .ok_or_else(|| EditError::InvalidRegion("growth window outside the image".into()))?;

    let sub = image.crop(&window)?;
    let threshold = Histogram::from_image(&sub).otsu_threshold();
    let below = sub.threshold_by(|v| Histogram::bin_of(v) <= threshold);
    let core = binary::erode_cross_replicate(&below)?;
    debug!(
        ?window,
        threshold,
        below = below.count(),
        core = core.count(),
        "thresholded growth window"
    );

    let mut seed = Region::new(width, height)?;
    seed.paste(&core, window.x, window.y)?;
    Ok(binary::dilate_cross(&seed)?)
}

/// Grow a new region from a click at (x, y)
///
/// Refinement against `series` runs only when a series is given. The
/// result excludes every pixel within the one-pixel cross dilation of the
/// labels already in `mask`.
///
/// # Errors
///
/// Returns `EditError::InvalidRegion` if nothing is left to add.
pub fn grow_region<R: Rng + ?Sized>(
    image: &Image,
    series: Option<&Series>,
    mask: &Mask,
    (x, y): (u32, u32),
    disk_size: u32,
    options: &RefineOptions,
    rng: &mut R,
) -> EditResult<Region> {
    let seed = seed_region(image, x, y, disk_size)?;
    let grown = match series {
        Some(series) => refine_region(&seed, series, options, rng)?,
        None => {
            warn!("no time series loaded, skipping correlation refinement");
            seed
        }
    };
    let occupied = binary::dilate_cross(&mask.foreground())?;
    let region = grown.subtract(&occupied)?;
    if region.is_empty() {
        return Err(EditError::InvalidRegion(format!(
            "growth at ({}, {}) found nothing to add",
            x, y
        )));
    }
    Ok(region)
}

/// Grow a region from a click by intensity contrast
///
/// Uses `cell_radius`, `contrast_threshold` and `disk_size` from `params`.
///
/// # Errors
///
/// Returns `EditError::InvalidRegion` if the probe lies entirely in the
/// exclusion zone around existing labels or the result is empty.
pub fn legacy_grow_region(
    image: &Image,
    mask: &Mask,
    x: u32,
    y: u32,
    params: &SessionParams,
) -> EditResult<Region> {
    check_click(image, x, y)?;
    let (width, height) = image.dimensions();

    let exclusion = binary::dilate(&mask.foreground(), &Sel::create_square(3)?)?;
    let safe = exclusion.invert();

    let mut click = Region::new(width, height)?;
    click.set(x, y, true)?;
    let probe = binary::dilate(&click, &Sel::create_diamond(params.cell_radius)?)?.and(&safe)?;
    let Some(probe_mean) = image.mean_over(&probe)? else {
        return Err(EditError::InvalidRegion(
            "probe lies inside the exclusion zone".into(),
        ));
    };

    let level = probe_mean * params.contrast_threshold;
    let bright = image.threshold_by(|v| v as f64 >= level).and(&safe)?;
    let connected = component_at(&bright, x, y, ConnectivityType::FourWay)?;
    debug!(
        probe_mean,
        level,
        probe = probe.count(),
        connected = connected.count(),
        "legacy growth probe"
    );

    let junk = Sel::create_diamond((params.cell_radius / 4).max(1))?;
    let body = connected.or(&probe)?.and(&safe)?;
    let smoothed = binary::open(&body, &junk)?;
    let expanded = binary::dilate(&smoothed, &Sel::create_diamond(params.disk_size)?)?;
    let region = expanded.and(&safe)?;
    if region.is_empty() {
        return Err(EditError::InvalidRegion(format!(
            "legacy growth at ({}, {}) found nothing to add",
            x, y
        )));
    }
    Ok(region)
}

fn check_click(image: &Image, x: u32, y: u32) -> EditResult<()> {
    if x >= image.width() || y >= image.height() {
        return Err(EditError::OutOfBounds { x, y });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dark_spot_image() -> Image {
        // Dark disk of radius 2 around (10, 10) on a bright background
        Image::from_fn(24, 24, |x, y| {
            let dx = x as i32 - 10;
            let dy = y as i32 - 10;
            if dx * dx + dy * dy <= 4 { 50.0 } else { 200.0 }
        })
        .unwrap()
    }

    #[test]
    fn test_seed_region_dark_spot() {
        let seed = seed_region(&dark_spot_image(), 10, 10, 3).unwrap();
        assert_eq!(seed.get(10, 10), Some(true));
        // Stays near the spot
        let bbox = seed.bounding_box().unwrap();
        assert!(Box::new_unchecked(7, 7, 7, 7).contains_box(&bbox));
    }

    #[test]
    fn test_seed_region_constant_window() {
        let image = Image::new_with_value(20, 20, 100.0).unwrap();
        let seed = seed_region(&image, 10, 10, 3).unwrap();
        // 6x6 window [7, 13) kept whole, dilated by the cross
        assert_eq!(seed.get(10, 10), Some(true));
        assert_eq!(seed.count(), 36 + 4 * 6);
    }

    #[test]
    fn test_seed_region_default_disk_size() {
        // 2x2 window [9, 11) inside the dark spot
        let seed = seed_region(&dark_spot_image(), 10, 10, 1).unwrap();
        assert_eq!(seed.get(9, 9), Some(true));
        assert_eq!(seed.get(10, 10), Some(true));
        assert_eq!(seed.count(), 4 + 4 * 2);
    }

    #[test]
    fn test_seed_region_rejects_zero_disk() {
        let image = Image::new(10, 10).unwrap();
        assert!(matches!(
            seed_region(&image, 5, 5, 0),
            Err(EditError::InvalidRegion(_))
        ));
        assert!(matches!(
            seed_region(&image, 10, 5, 1),
            Err(EditError::OutOfBounds { x: 10, y: 5 })
        ));
    }

    #[test]
    fn test_grow_avoids_existing_labels() {
        let image = Image::new_with_value(20, 20, 100.0).unwrap();
        let mut mask = Mask::new(20, 20).unwrap();
        mask.set(12, 10, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let region = grow_region(
            &image,
            None,
            &mask,
            (9, 10),
            3,
            &RefineOptions::default(),
            &mut rng,
        )
        .unwrap();
        let occupied = binary::dilate_cross(&mask.foreground()).unwrap();
        assert!(!region.intersects(&occupied).unwrap());
        assert!(!region.is_empty());
    }

    #[test]
    fn test_grow_fully_blocked_is_rejected() {
        let image = Image::new_with_value(20, 20, 100.0).unwrap();
        let mut mask = Mask::new(20, 20).unwrap();
        for y in 4..16 {
            for x in 4..16 {
                mask.set(x, y, 2).unwrap();
            }
        }
        let mut rng = StdRng::seed_from_u64(0);
        let result = grow_region(
            &image,
            None,
            &mask,
            (10, 10),
            3,
            &RefineOptions::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(EditError::InvalidRegion(_))));
    }

    #[test]
    fn test_legacy_grow_bright_blob() {
        // Bright 7x7 square on a dark background
        let image = Image::from_fn(30, 30, |x, y| {
            if (10..17).contains(&x) && (10..17).contains(&y) {
                100.0
            } else {
                10.0
            }
        })
        .unwrap();
        let mask = Mask::new(30, 30).unwrap();
        let params = SessionParams::default()
            .with_cell_radius(2)
            .with_disk_size(0)
            .with_contrast_threshold(0.9);
        let region = legacy_grow_region(&image, &mask, 13, 13, &params).unwrap();
        assert_eq!(region.get(13, 13), Some(true));
        assert_eq!(region.get(10, 13), Some(true));
        // Opening by the cross rounds off the corners
        assert_eq!(region.get(10, 10), Some(false));
        assert_eq!(region.get(20, 20), Some(false));
    }

    #[test]
    fn test_legacy_grow_respects_exclusion() {
        let image = Image::new_with_value(20, 20, 50.0).unwrap();
        let mut mask = Mask::new(20, 20).unwrap();
        mask.set(10, 10, 1).unwrap();
        let params = SessionParams::default().with_cell_radius(3).with_disk_size(1);
        let region = legacy_grow_region(&image, &mask, 13, 10, &params).unwrap();
        let exclusion =
            binary::dilate(&mask.foreground(), &Sel::create_square(3).unwrap()).unwrap();
        assert!(!region.intersects(&exclusion).unwrap());
    }

    #[test]
    fn test_legacy_grow_probe_excluded() {
        let image = Image::new_with_value(9, 9, 50.0).unwrap();
        let mut mask = Mask::new(9, 9).unwrap();
        for y in 0..9 {
            for x in 0..9 {
                if (x, y) != (4, 4) {
                    mask.set(x, y, 1).unwrap();
                }
            }
        }
        let params = SessionParams::default().with_cell_radius(1);
        assert!(matches!(
            legacy_grow_region(&image, &mask, 4, 4, &params),
            Err(EditError::InvalidRegion(_))
        ));
    }
}
