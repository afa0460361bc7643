//! Average pairwise correlation of pixel time-courses
//!
//! The score of a set of pixels is the mean Pearson correlation over all
//! unordered pairs of their time-courses. It is computed in linear time
//! from z-normalized time-courses:
//!
//! ```text
//! sum_{i<j} r_ij = (|sum_i z_i|^2 / T - n) / 2
//! ```
//!
//! since each z-normalized course has squared norm `T`.
//!
//! A score is NaN (never an error) when there are fewer than 2 pixels,
//! fewer than 2 timepoints, or any selected pixel has a constant
//! time-course.

use crate::error::EditResult;
use cellpick_core::{Region, Series};

/// Pearson correlation of two equally long sequences
///
/// NaN if they are shorter than 2 or either is constant.
pub fn pearson(a: &[f32], b: &[f32]) -> f64 {
    let n = a.len().min(b.len());
    if n < 2 {
        return f64::NAN;
    }
    let (a, b) = (&a[..n], &b[..n]);
    let mean_a = a.iter().map(|&v| v as f64).sum::<f64>() / n as f64;
    let mean_b = b.iter().map(|&v| v as f64).sum::<f64>() / n as f64;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x as f64 - mean_a;
        let dy = y as f64 - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}

/// Z-normalized time-course, or `None` if it is constant
pub(crate) fn z_normalize(course: &[f32]) -> Option<Vec<f64>> {
    let t = course.len() as f64;
    let mean = course.iter().map(|&v| v as f64).sum::<f64>() / t;
    let var = course
        .iter()
        .map(|&v| (v as f64 - mean) * (v as f64 - mean))
        .sum::<f64>()
        / t;
    if var.is_nan() || var <= 0.0 {
        return None;
    }
    let sd = var.sqrt();
    Some(course.iter().map(|&v| (v as f64 - mean) / sd).collect())
}

/// Running sum of z-normalized courses
///
/// Accumulates pixels one at a time and yields the average pairwise
/// correlation of everything added so far.
#[derive(Debug, Clone)]
pub(crate) struct CorrelationAccumulator {
    sum: Vec<f64>,
    count: usize,
    degenerate: bool,
}

impl CorrelationAccumulator {
    pub(crate) fn new(depth: usize) -> Self {
        Self {
            sum: vec![0.0; depth],
            count: 0,
            degenerate: depth < 2,
        }
    }

    /// Add one pixel; `None` marks a constant time-course
    pub(crate) fn add(&mut self, z: Option<&[f64]>) {
        self.count += 1;
        match z {
            Some(z) => {
                for (s, &v) in self.sum.iter_mut().zip(z) {
                    *s += v;
                }
            }
            None => self.degenerate = true,
        }
    }

    pub(crate) fn score(&self) -> f64 {
        let n = self.count as f64;
        if self.degenerate || self.count < 2 {
            return f64::NAN;
        }
        let t = self.sum.len() as f64;
        let norm2: f64 = self.sum.iter().map(|v| v * v).sum();
        (norm2 / t - n) / (n * (n - 1.0))
    }
}

/// Average pairwise correlation of the time-courses of the pixels in `region`
///
/// # Errors
///
/// Returns `DimensionMismatch` if `region` and `series` differ in size.
pub fn average_pairwise_correlation(series: &Series, region: &Region) -> EditResult<f64> {
    if series.dimensions() != region.dimensions() {
        return Err(cellpick_core::Error::DimensionMismatch {
            expected: series.dimensions(),
            actual: region.dimensions(),
        }
        .into());
    }
    let mut acc = CorrelationAccumulator::new(series.depth() as usize);
    for (x, y) in region.iter_set() {
        let z = z_normalize(series.time_course_unchecked(x, y));
        acc.add(z.as_deref());
    }
    Ok(acc.score())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mean of the pairwise Pearson coefficients, computed pair by pair
    fn pairwise_reference(series: &Series, region: &Region) -> f64 {
        let courses: Vec<&[f32]> = region
            .iter_set()
            .map(|(x, y)| series.time_course_unchecked(x, y))
            .collect();
        let n = courses.len();
        if n < 2 {
            return f64::NAN;
        }
        let mut total = 0.0;
        let mut pairs = 0usize;
        for i in 0..n {
            for j in i + 1..n {
                total += pearson(courses[i], courses[j]);
                pairs += 1;
            }
        }
        total / pairs as f64
    }

    fn series_3x1(courses: [[f32; 4]; 3]) -> Series {
        Series::from_data(3, 1, 4, courses.concat()).unwrap()
    }

    fn full_region(w: u32, h: u32) -> Region {
        Region::from_data(w, h, vec![true; (w * h) as usize]).unwrap()
    }

    #[test]
    fn test_pearson() {
        assert!((pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]) + 1.0).abs() < 1e-12);
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(pearson(&[1.0], &[1.0]).is_nan());
    }

    #[test]
    fn test_single_pixel_is_nan() {
        let s = series_3x1([[1.0, 2.0, 3.0, 4.0], [0.0; 4], [0.0; 4]]);
        let mut r = Region::new(3, 1).unwrap();
        r.set(0, 0, true).unwrap();
        assert!(average_pairwise_correlation(&s, &r).unwrap().is_nan());
        assert!(
            average_pairwise_correlation(&s, &Region::new(3, 1).unwrap())
                .unwrap()
                .is_nan()
        );
    }

    #[test]
    fn test_two_pixels() {
        let s = series_3x1([
            [1.0, 2.0, 3.0, 4.0],
            [2.0, 4.0, 6.0, 9.0],
            [0.0; 4],
        ]);
        let mut r = Region::new(3, 1).unwrap();
        r.set(0, 0, true).unwrap();
        r.set(1, 0, true).unwrap();
        let score = average_pairwise_correlation(&s, &r).unwrap();
        let expected = pearson(s.time_course_unchecked(0, 0), s.time_course_unchecked(1, 0));
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_constant_course_is_nan() {
        let s = series_3x1([
            [1.0, 2.0, 3.0, 4.0],
            [2.0, 4.0, 6.0, 9.0],
            [5.0; 4],
        ]);
        assert!(
            average_pairwise_correlation(&s, &full_region(3, 1))
                .unwrap()
                .is_nan()
        );
    }

    #[test]
    fn test_single_timepoint_is_nan() {
        let s = Series::from_data(2, 1, 1, vec![1.0, 2.0]).unwrap();
        assert!(
            average_pairwise_correlation(&s, &full_region(2, 1))
                .unwrap()
                .is_nan()
        );
    }

    #[test]
    fn test_matches_pairwise_reference() {
        let s = series_3x1([
            [1.0, 5.0, 2.0, 8.0],
            [2.0, 4.0, 3.0, 7.0],
            [9.0, 1.0, 4.0, 0.5],
        ]);
        let r = full_region(3, 1);
        let fast = average_pairwise_correlation(&s, &r).unwrap();
        let slow = pairwise_reference(&s, &r);
        assert!((fast - slow).abs() < 1e-9, "{fast} vs {slow}");
    }

    #[test]
    fn test_dimension_mismatch() {
        let s = Series::new(3, 3, 4).unwrap();
        assert!(average_pairwise_correlation(&s, &Region::new(2, 3).unwrap()).is_err());
    }
}
