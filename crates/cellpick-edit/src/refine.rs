//! Correlation-guided refinement
//!
//! Grows a seed region by sampling random subsets of its one-pixel (cross)
//! dilation ring, scoring each candidate by the average pairwise
//! correlation of its pixel time-courses, and keeping the ring pixels that
//! appear in most of the best-scoring candidates.
//!
//! All work happens on a crop around the seed, so the cost depends on the
//! seed size and not on the image size.

use crate::correlation::{CorrelationAccumulator, average_pairwise_correlation, z_normalize};
use crate::error::{EditError, EditResult};
use cellpick_core::{Region, Series};
use cellpick_morph::binary;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Options for correlation-guided refinement
#[derive(Debug, Clone, PartialEq)]
pub struct RefineOptions {
    /// Number of random candidates to score
    pub num_guesses: usize,
    /// Rank of the last candidate kept; the single best is skipped
    pub top_cut: usize,
    /// Membership fraction a ring pixel must exceed to be kept
    pub cutoff: f64,
    /// Crop margin around the seed's bounding box
    pub margin: u32,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            num_guesses: 750,
            top_cut: 50,
            cutoff: 0.5,
            margin: 2,
        }
    }
}

impl RefineOptions {
    /// Set the number of candidates (at least 1)
    pub fn with_num_guesses(mut self, n: usize) -> Self {
        self.num_guesses = n.max(1);
        self
    }

    /// Set the rank cut (at least 2)
    pub fn with_top_cut(mut self, top_cut: usize) -> Self {
        self.top_cut = top_cut.max(2);
        self
    }

    /// Set the membership cutoff (clamped to `[0, 1)`)
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = if cutoff.is_nan() {
            0.5
        } else {
            cutoff.clamp(0.0, 0.999)
        };
        self
    }

    /// Set the crop margin (at least 1, so the ring stays inside the crop)
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin.max(1);
        self
    }
}

/// Refine `seed` using the time-courses in `series`
///
/// The result always contains the seed. An empty seed yields an empty
/// region. If no candidate gets a finite score, the seed is returned.
///
/// # Errors
///
/// Returns `DimensionMismatch` if `seed` and `series` differ in size.
pub fn refine_region<R: Rng + ?Sized>(
    seed: &Region,
    series: &Series,
    options: &RefineOptions,
    rng: &mut R,
) -> EditResult<Region> {
    refine_impl(seed, series, options, rng, None)
}

/// Like [`refine_region`], checking `cancel` between candidates
///
/// # Errors
///
/// Returns `EditError::Cancelled` once `cancel` is observed set.
pub fn refine_region_with_cancel<R: Rng + ?Sized>(
    seed: &Region,
    series: &Series,
    options: &RefineOptions,
    rng: &mut R,
    cancel: &AtomicBool,
) -> EditResult<Region> {
    refine_impl(seed, series, options, rng, Some(cancel))
}

struct Candidate {
    score: f64,
    ring_members: Vec<bool>,
}

fn refine_impl<R: Rng + ?Sized>(
    seed: &Region,
    series: &Series,
    options: &RefineOptions,
    rng: &mut R,
    cancel: Option<&AtomicBool>,
) -> EditResult<Region> {
    if seed.dimensions() != series.dimensions() {
        return Err(cellpick_core::Error::DimensionMismatch {
            expected: series.dimensions(),
            actual: seed.dimensions(),
        }
        .into());
    }
    let Some(bbox) = seed.bounding_box() else {
        return Ok(seed.create_template());
    };

    let (width, height) = seed.dimensions();
    let margin = options.margin.max(1) as i32;
    let crop = bbox
        .expand(margin)
        .clip(width as i32, height as i32)
        .ok_or_else(|| EditError::InvalidRegion("seed crop outside the image".into()))?;

    let sub_seed = seed.crop(&crop)?;
    let sub_series = series.crop(&crop)?;

    let baseline = average_pairwise_correlation(&sub_series, &sub_seed)?;
    debug!(
        pixels = sub_seed.count(),
        baseline, "refining seed against time series"
    );

    let ring = binary::dilate_cross(&sub_seed)?.subtract(&sub_seed)?;
    let ring_pixels: Vec<(u32, u32)> = ring.iter_set().collect();
    if ring_pixels.is_empty() {
        return Ok(seed.clone());
    }

    let depth = sub_series.depth() as usize;
    let mut seed_acc = CorrelationAccumulator::new(depth);
    for (x, y) in sub_seed.iter_set() {
        seed_acc.add(z_normalize(sub_series.time_course_unchecked(x, y)).as_deref());
    }
    let ring_z: Vec<Option<Vec<f64>>> = ring_pixels
        .iter()
        .map(|&(x, y)| z_normalize(sub_series.time_course_unchecked(x, y)))
        .collect();

    let mut candidates = Vec::with_capacity(options.num_guesses);
    for _ in 0..options.num_guesses {
        if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            debug!("refinement cancelled");
            return Err(EditError::Cancelled);
        }
        let mut acc = seed_acc.clone();
        let ring_members: Vec<bool> = ring_z
            .iter()
            .map(|z| {
                let keep = rng.random_bool(0.5);
                if keep {
                    acc.add(z.as_deref());
                }
                keep
            })
            .collect();
        candidates.push(Candidate {
            score: acc.score(),
            ring_members,
        });
    }

    candidates.retain(|c| !c.score.is_nan());
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    let end = options.top_cut.min(candidates.len());
    let selected = candidates.get(1..end).unwrap_or(&[]);
    debug!(
        scored = candidates.len(),
        selected = selected.len(),
        best = candidates.first().map(|c| c.score),
        "ranked refinement candidates"
    );
    if selected.is_empty() {
        return Ok(seed.clone());
    }

    let mut out = seed.clone();
    let n = selected.len() as f64;
    for (i, &(x, y)) in ring_pixels.iter().enumerate() {
        let hits = selected.iter().filter(|c| c.ring_members[i]).count() as f64;
        if hits / n > options.cutoff {
            out.set_unchecked(crop.x as u32 + x, crop.y as u32 + y, true);
        }
    }
    Ok(out)
}
