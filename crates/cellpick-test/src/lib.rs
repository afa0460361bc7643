//! cellpick-test - Regression test framework for cellpick
//!
//! Provides [`RegParams`], a small harness that numbers each check,
//! records failures and reports them at [`RegParams::cleanup`], plus
//! synthetic fixtures so tests need no image files.
//!
//! # Usage
//!
//! ```ignore
//! use cellpick_test::{RegParams, synthetic_cell_image};
//!
//! let mut rp = RegParams::new("grow");
//! rp.compare_values(2.0, history_len as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"
//! - `RUST_LOG`: Filter for the log output installed by [`init_logging`]

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use cellpick_core::{Box, Image, Mask, Series};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

/// Background intensity of synthetic images
pub const BACKGROUND_LEVEL: f32 = 200.0;

/// Intensity of synthetic cells
pub const CELL_LEVEL: f32 = 50.0;

/// A synthetic cell: center and Euclidean radius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpec {
    pub cx: u32,
    pub cy: u32,
    pub radius: u32,
}

impl CellSpec {
    pub const fn new(cx: u32, cy: u32, radius: u32) -> Self {
        Self { cx, cy, radius }
    }

    /// True if (x, y) lies inside the cell
    pub fn contains(&self, x: u32, y: u32) -> bool {
        let dx = x as i64 - self.cx as i64;
        let dy = y as i64 - self.cy as i64;
        dx * dx + dy * dy <= (self.radius as i64) * (self.radius as i64)
    }
}

/// Install a `tracing` subscriber for tests
///
/// Honors `RUST_LOG`, defaulting to `warn`. Safe to call repeatedly.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Image with dark disks on a bright background
pub fn synthetic_cell_image(width: u32, height: u32, cells: &[CellSpec]) -> TestResult<Image> {
    Ok(Image::from_fn(width, height, |x, y| {
        if cells.iter().any(|c| c.contains(x, y)) {
            CELL_LEVEL
        } else {
            BACKGROUND_LEVEL
        }
    })?)
}

/// Time series in which every pixel of a cell follows the cell's shared
/// signal plus small noise, while background pixels are independent noise
///
/// Deterministic for a given `seed`.
pub fn synthetic_cell_series(
    width: u32,
    height: u32,
    depth: u32,
    cells: &[CellSpec],
    seed: u64,
) -> TestResult<Series> {
    if depth < 2 {
        return Err(TestError::InvalidFixture(format!(
            "series needs at least 2 timepoints, got {}",
            depth
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let signals: Vec<Vec<f32>> = cells
        .iter()
        .map(|_| (0..depth).map(|_| rng.random_range(-1.0..1.0)).collect())
        .collect();

    let mut series = Series::new(width, height, depth)?;
    for y in 0..height {
        for x in 0..width {
            let cell = cells.iter().position(|c| c.contains(x, y));
            for k in 0..depth {
                let noise: f32 = rng.random_range(-1.0..1.0);
                let v = match cell {
                    Some(i) => 100.0 + 20.0 * signals[i][k as usize] + 2.0 * noise,
                    None => 100.0 + 20.0 * noise,
                };
                series.set(x, y, k, v)?;
            }
        }
    }
    Ok(series)
}

/// Empty mask with the rectangle `rect` set to `value`
pub fn block_mask(width: u32, height: u32, rect: Box, value: u16) -> TestResult<Mask> {
    let mut mask = Mask::new(width, height)?;
    let clipped = rect
        .clip(width as i32, height as i32)
        .ok_or_else(|| TestError::InvalidFixture(format!("{:?} outside the mask", rect)))?;
    for y in clipped.y..clipped.bottom() {
        for x in clipped.x..clipped.right() {
            mask.set(x as u32, y as u32, value)?;
        }
    }
    Ok(mask)
}
