//! Intensity histograms and Otsu thresholding
//!
//! Intensities are binned by saturating truncation to `u16`, i.e. clamped
//! to `0..=65535` with NaN mapping to bin 0. The histogram is as long as
//! the largest occupied bin plus one.

use crate::image::Image;

/// Integer-binned intensity histogram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u64>,
    total: u64,
}

impl Histogram {
    /// Bin index of an intensity value
    #[inline]
    pub fn bin_of(value: f32) -> u32 {
        value as u16 as u32
    }

    /// Build the histogram of every pixel of `image`
    pub fn from_image(image: &Image) -> Histogram {
        Self::from_values(image.data().iter().copied())
    }

    /// Build the histogram of a sequence of intensities
    pub fn from_values(values: impl IntoIterator<Item = f32>) -> Histogram {
        let mut counts: Vec<u64> = Vec::new();
        let mut total = 0u64;
        for v in values {
            let bin = Self::bin_of(v) as usize;
            if bin >= counts.len() {
                counts.resize(bin + 1, 0);
            }
            counts[bin] += 1;
            total += 1;
        }
        Histogram { counts, total }
    }

    /// Per-bin counts
    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Number of bins
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no value was binned
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of values binned
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Otsu threshold
    ///
    /// Returns the bin `t` that maximizes the between-class variance when
    /// the background class is bins `0..=t` and the object class is the
    /// rest. If no split leaves both classes populated (a constant input),
    /// the last occupied bin is returned so that every value falls in the
    /// background class. An empty histogram yields 0.
    pub fn otsu_threshold(&self) -> u32 {
        let n = self.counts.len();
        if n == 0 {
            return 0;
        }
        let total = self.total as f64;
        let sum_all: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| i as f64 * c as f64)
            .sum();

        let mut best: Option<(u32, f64)> = None;
        let mut w0 = 0.0f64;
        let mut sum0 = 0.0f64;
        for t in 0..n - 1 {
            let c = self.counts[t] as f64;
            w0 += c;
            sum0 += t as f64 * c;
            if w0 == 0.0 {
                continue;
            }
            let w1 = total - w0;
            if w1 == 0.0 {
                break;
            }
            let mu0 = sum0 / w0;
            let mu1 = (sum_all - sum0) / w1;
            let between = w0 * w1 * (mu0 - mu1) * (mu0 - mu1);
            if best.is_none_or(|(_, b)| between > b) {
                best = Some((t as u32, between));
            }
        }
        best.map_or((n - 1) as u32, |(t, _)| t)
    }
}
