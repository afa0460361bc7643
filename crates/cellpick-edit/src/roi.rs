//! ROI queries
//!
//! An ROI is either the set of pixels changed by the last edit or one
//! 4-connected component of the nonzero mask, addressed by its label in the
//! raster-order labeling. Labels are recomputed on every query.

use crate::correlation::average_pairwise_correlation;
use crate::error::{EditError, EditResult};
use crate::history::History;
use cellpick_core::{Mask, Region, Series};
use cellpick_region::{ConnectivityType, extract_component, label_connected_components};

/// Summary of one ROI
#[derive(Debug, Clone, PartialEq)]
pub struct RoiReport {
    /// Component label, `None` for the last-change ROI
    pub label: Option<u32>,
    /// Number of pixels in the ROI
    pub pixel_count: usize,
    /// Per-timepoint mean over the ROI, if a series is loaded
    pub time_course: Option<Vec<f64>>,
    /// Average pairwise correlation of the ROI's time-courses
    pub correlation: Option<f64>,
}

/// Pixels of an ROI
///
/// `None` selects the last change recorded in `history`; `Some(id)` the
/// component labeled `id` in the current mask.
///
/// # Errors
///
/// Returns `EditError::EmptyRoi` if the selection has no pixels or `id`
/// does not name a component.
pub fn roi_mask(history: &History, label: Option<u32>) -> EditResult<Region> {
    let region = match label {
        None => history.last_change()?,
        Some(id) => {
            let foreground = history.current().foreground();
            let labels = label_connected_components(&foreground, ConnectivityType::FourWay)?;
            if id == 0 || id > labels.num_components() {
                return Err(EditError::EmptyRoi);
            }
            extract_component(&labels, id)?
        }
    };
    if region.is_empty() {
        return Err(EditError::EmptyRoi);
    }
    Ok(region)
}

/// Label of the component under (x, y), `None` on background
pub fn component_label_at(mask: &Mask, x: u32, y: u32) -> EditResult<Option<u32>> {
    if x >= mask.width() || y >= mask.height() {
        return Err(EditError::OutOfBounds { x, y });
    }
    if mask.get(x, y) == Some(0) {
        return Ok(None);
    }
    let labels = label_connected_components(&mask.foreground(), ConnectivityType::FourWay)?;
    Ok(labels.get(x, y).filter(|&l| l != 0))
}

/// Mean of the ROI's time-courses at each timepoint
///
/// # Errors
///
/// Returns `EditError::MissingSeries` without a series and
/// `EditError::EmptyRoi` for an empty ROI.
pub fn time_course(series: Option<&Series>, roi: &Region) -> EditResult<Vec<f64>> {
    let series = series.ok_or(EditError::MissingSeries)?;
    if series.dimensions() != roi.dimensions() {
        return Err(cellpick_core::Error::DimensionMismatch {
            expected: series.dimensions(),
            actual: roi.dimensions(),
        }
        .into());
    }
    let mut sum = vec![0.0f64; series.depth() as usize];
    let mut n = 0usize;
    for (x, y) in roi.iter_set() {
        for (s, &v) in sum.iter_mut().zip(series.time_course_unchecked(x, y)) {
            *s += v as f64;
        }
        n += 1;
    }
    if n == 0 {
        return Err(EditError::EmptyRoi);
    }
    for s in &mut sum {
        *s /= n as f64;
    }
    Ok(sum)
}

/// Size and mean time-course of an ROI
///
/// The time-course is left out when no series is loaded.
pub fn roi_info(
    history: &History,
    series: Option<&Series>,
    label: Option<u32>,
) -> EditResult<RoiReport> {
    let roi = roi_mask(history, label)?;
    let time_course = match series {
        Some(_) => Some(time_course(series, &roi)?),
        None => None,
    };
    Ok(RoiReport {
        label,
        pixel_count: roi.count(),
        time_course,
        correlation: None,
    })
}

/// Average pairwise correlation of an ROI's time-courses
///
/// # Errors
///
/// Returns `EditError::MissingSeries` without a series.
pub fn roi_correlation(
    history: &History,
    series: Option<&Series>,
    label: Option<u32>,
) -> EditResult<RoiReport> {
    let series = series.ok_or(EditError::MissingSeries)?;
    let roi = roi_mask(history, label)?;
    let correlation = average_pairwise_correlation(series, &roi)?;
    Ok(RoiReport {
        label,
        pixel_count: roi.count(),
        time_course: Some(time_course(Some(series), &roi)?),
        correlation: Some(correlation),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blob_mask() -> Mask {
        let mut m = Mask::new(8, 4).unwrap();
        for (x, y) in [(0, 0), (1, 0), (0, 1)] {
            m.set(x, y, 1).unwrap();
        }
        for (x, y) in [(5, 2), (6, 2)] {
            m.set(x, y, 3).unwrap();
        }
        m
    }

    #[test]
    fn test_roi_by_label() {
        let h = History::new(two_blob_mask());
        assert_eq!(roi_mask(&h, Some(1)).unwrap().count(), 3);
        assert_eq!(roi_mask(&h, Some(2)).unwrap().count(), 2);
        assert!(matches!(roi_mask(&h, Some(0)), Err(EditError::EmptyRoi)));
        assert!(matches!(roi_mask(&h, Some(3)), Err(EditError::EmptyRoi)));
    }

    #[test]
    fn test_roi_last_change() {
        let mut h = History::new(two_blob_mask());
        assert_eq!(roi_mask(&h, None).unwrap().count(), 5);
        h.push(h.current().clone()).unwrap();
        // Identical snapshot: nothing changed
        assert!(matches!(roi_mask(&h, None), Err(EditError::EmptyRoi)));
    }

    #[test]
    fn test_empty_initial_mask_has_no_roi() {
        let h = History::new(Mask::new(4, 4).unwrap());
        assert!(matches!(roi_mask(&h, None), Err(EditError::EmptyRoi)));
    }

    #[test]
    fn test_component_label_at() {
        let m = two_blob_mask();
        assert_eq!(component_label_at(&m, 1, 0).unwrap(), Some(1));
        assert_eq!(component_label_at(&m, 6, 2).unwrap(), Some(2));
        assert_eq!(component_label_at(&m, 3, 3).unwrap(), None);
        assert!(component_label_at(&m, 8, 0).is_err());
    }

    #[test]
    fn test_time_course_mean() {
        let series = Series::from_data(2, 1, 3, vec![1.0, 2.0, 3.0, 3.0, 4.0, 5.0]).unwrap();
        let roi = Region::from_data(2, 1, vec![true, true]).unwrap();
        assert_eq!(time_course(Some(&series), &roi).unwrap(), vec![2.0, 3.0, 4.0]);
        assert!(matches!(
            time_course(None, &roi),
            Err(EditError::MissingSeries)
        ));
        assert!(matches!(
            time_course(Some(&series), &Region::new(2, 1).unwrap()),
            Err(EditError::EmptyRoi)
        ));
    }

    #[test]
    fn test_info_without_series() {
        let h = History::new(two_blob_mask());
        let report = roi_info(&h, None, Some(2)).unwrap();
        assert_eq!(report.pixel_count, 2);
        assert!(report.time_course.is_none());
        assert!(matches!(
            roi_correlation(&h, None, Some(2)),
            Err(EditError::MissingSeries)
        ));
    }

    #[test]
    fn test_correlation_report() {
        let mut m = Mask::new(2, 1).unwrap();
        m.set(0, 0, 1).unwrap();
        m.set(1, 0, 1).unwrap();
        let h = History::new(m);
        let series =
            Series::from_data(2, 1, 4, vec![1.0, 2.0, 3.0, 4.0, 2.0, 4.0, 6.0, 8.0]).unwrap();
        let report = roi_correlation(&h, Some(&series), Some(1)).unwrap();
        assert!((report.correlation.unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(report.time_course.unwrap().len(), 4);
    }
}
