//! Seed fill operations
//!
//! Flood fill on binary regions: grow from a seed pixel through pixels of
//! the same value.

use crate::conncomp::ConnectivityType;
use crate::error::{RegionError, RegionResult};
use cellpick_core::Region;
use std::collections::VecDeque;

/// Options for seed fill operations
#[derive(Debug, Clone, Default)]
pub struct SeedFillOptions {
    /// Connectivity type (4-way or 8-way)
    pub connectivity: ConnectivityType,
}

impl SeedFillOptions {
    /// Create new options with the specified connectivity
    pub fn new(connectivity: ConnectivityType) -> Self {
        Self { connectivity }
    }
}

/// Flood fill a region in place starting from a seed point
///
/// Every pixel reachable from the seed through pixels sharing the seed's
/// value is set to `new_value`.
///
/// # Returns
///
/// The number of pixels that were filled.
///
/// # Errors
///
/// Returns `RegionError::InvalidSeed` if the seed is out of bounds.
pub fn floodfill(
    region: &mut Region,
    seed_x: u32,
    seed_y: u32,
    new_value: bool,
    connectivity: ConnectivityType,
) -> RegionResult<u32> {
    let Some(old_value) = region.get(seed_x, seed_y) else {
        return Err(RegionError::InvalidSeed {
            x: seed_x,
            y: seed_y,
        });
    };
    if old_value == new_value {
        return Ok(0);
    }

    let (width, height) = region.dimensions();
    let mut filled_count = 0u32;
    let mut queue = VecDeque::new();
    region.set_unchecked(seed_x, seed_y, new_value);
    queue.push_back((seed_x, seed_y));

    while let Some((x, y)) = queue.pop_front() {
        filled_count += 1;
        for &(dx, dy) in connectivity.offsets() {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx < 0 || ny < 0 || nx as u32 >= width || ny as u32 >= height {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if region.get_unchecked(nx, ny) == old_value {
                region.set_unchecked(nx, ny, new_value);
                queue.push_back((nx, ny));
            }
        }
    }

    Ok(filled_count)
}

/// Seed fill for binary regions
///
/// Returns the set pixels of `region` connected to the seed. The result is
/// empty if the seed pixel itself is unset.
///
/// # Errors
///
/// Returns `RegionError::InvalidSeed` if the seed is out of bounds.
pub fn seedfill_binary(
    region: &Region,
    seed_x: u32,
    seed_y: u32,
    options: &SeedFillOptions,
) -> RegionResult<Region> {
    let Some(seed_set) = region.get(seed_x, seed_y) else {
        return Err(RegionError::InvalidSeed {
            x: seed_x,
            y: seed_y,
        });
    };
    if !seed_set {
        return Ok(region.create_template());
    }

    // Clear the component in a scratch copy, then keep what was cleared
    let mut scratch = region.clone();
    floodfill(&mut scratch, seed_x, seed_y, false, options.connectivity)?;
    Ok(region.subtract(&scratch)?)
}
