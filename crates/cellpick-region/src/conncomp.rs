//! Connected component analysis
//!
//! This module labels the connected components of a binary [`Region`].
//! Components are discovered in raster order, so label 1 is the component
//! containing the first set pixel met scanning rows top to bottom.

use crate::error::{RegionError, RegionResult};
use cellpick_core::{Box, Region};
use std::collections::VecDeque;

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    /// Neighbor offsets for this connectivity
    pub fn offsets(self) -> &'static [(i32, i32)] {
        const FOUR: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const EIGHT: [(i32, i32); 8] = [
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
            (-1, -1),
            (1, -1),
            (-1, 1),
            (1, 1),
        ];
        match self {
            ConnectivityType::FourWay => &FOUR,
            ConnectivityType::EightWay => &EIGHT,
        }
    }
}

/// A connected component in a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label of this component (1-based)
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
}

/// Per-pixel component labels
///
/// Background pixels carry label 0; components are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    width: u32,
    height: u32,
    data: Vec<u32>,
    count: u32,
}

impl Labels {
    /// Number of components
    #[inline]
    pub fn num_components(&self) -> u32 {
        self.count
    }

    /// Dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Label at (x, y), or `None` outside the raster
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Raw row-major labels
    pub fn data(&self) -> &[u32] {
        &self.data
    }
}

/// Label all connected components of a region
pub fn label_connected_components(
    region: &Region,
    connectivity: ConnectivityType,
) -> RegionResult<Labels> {
    let (width, height) = region.dimensions();
    let mut data = vec![0u32; (width as usize) * (height as usize)];
    let mut count = 0u32;
    let mut queue = VecDeque::new();

    for (sx, sy) in region.iter_set() {
        let start = (sy as usize) * (width as usize) + sx as usize;
        if data[start] != 0 {
            continue;
        }
        count += 1;
        data[start] = count;
        queue.push_back((sx, sy));

        while let Some((x, y)) = queue.pop_front() {
            for &(dx, dy) in connectivity.offsets() {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if !region.get_signed(nx, ny) {
                    continue;
                }
                let idx = (ny as usize) * (width as usize) + nx as usize;
                if data[idx] == 0 {
                    data[idx] = count;
                    queue.push_back((nx as u32, ny as u32));
                }
            }
        }
    }

    Ok(Labels {
        width,
        height,
        data,
        count,
    })
}

/// Find all connected components of a region
///
/// Returns one entry per component, in label order, with its pixel count
/// and bounding box.
pub fn find_connected_components(
    region: &Region,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    let labels = label_connected_components(region, connectivity)?;
    let n = labels.count as usize;
    let mut counts = vec![0u32; n];
    let mut extents: Vec<Option<(u32, u32, u32, u32)>> = vec![None; n];

    for (i, &label) in labels.data.iter().enumerate() {
        if label == 0 {
            continue;
        }
        let x = (i as u32) % labels.width;
        let y = (i as u32) / labels.width;
        let k = (label - 1) as usize;
        counts[k] += 1;
        extents[k] = Some(match extents[k] {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    Ok(counts
        .into_iter()
        .zip(extents)
        .enumerate()
        .filter_map(|(k, (pixel_count, ext))| {
            let (x0, y0, x1, y1) = ext?;
            Some(ConnectedComponent {
                label: k as u32 + 1,
                pixel_count,
                bounds: Box::new_unchecked(
                    x0 as i32,
                    y0 as i32,
                    (x1 - x0 + 1) as i32,
                    (y1 - y0 + 1) as i32,
                ),
            })
        })
        .collect())
}

/// Extract a single component from a labeling
///
/// # Errors
///
/// Returns `RegionError::InvalidLabel` if `label` is 0 or greater than the
/// number of components.
pub fn extract_component(labels: &Labels, label: u32) -> RegionResult<Region> {
    if label == 0 || label > labels.count {
        return Err(RegionError::InvalidLabel(label));
    }
    let data = labels.data.iter().map(|&l| l == label).collect();
    Ok(Region::from_data(labels.width, labels.height, data)?)
}

/// Component of `region` containing (x, y)
///
/// Returns an empty region if (x, y) is not set in `region`.
///
/// # Errors
///
/// Returns `RegionError::InvalidSeed` if (x, y) is outside the raster.
pub fn component_at(
    region: &Region,
    x: u32,
    y: u32,
    connectivity: ConnectivityType,
) -> RegionResult<Region> {
    crate::seedfill::seedfill_binary(region, x, y, &crate::SeedFillOptions::new(connectivity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_from_rows(rows: &[&str]) -> Region {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let data = rows
            .iter()
            .flat_map(|r| r.chars().map(|c| c == '#'))
            .collect();
        Region::from_data(w, h, data).unwrap()
    }

    #[test]
    fn test_four_vs_eight_way() {
        let r = region_from_rows(&["#..", ".#.", "..#"]);
        let four = label_connected_components(&r, ConnectivityType::FourWay).unwrap();
        assert_eq!(four.num_components(), 3);
        let eight = label_connected_components(&r, ConnectivityType::EightWay).unwrap();
        assert_eq!(eight.num_components(), 1);
    }

    #[test]
    fn test_labels_in_raster_order() {
        let r = region_from_rows(&["..##", "#...", "#..#"]);
        let labels = label_connected_components(&r, ConnectivityType::FourWay).unwrap();
        assert_eq!(labels.num_components(), 3);
        assert_eq!(labels.get(2, 0), Some(1));
        assert_eq!(labels.get(0, 2), Some(2));
        assert_eq!(labels.get(3, 2), Some(3));
        assert_eq!(labels.get(1, 1), Some(0));
    }

    #[test]
    fn test_find_components_stats() {
        let r = region_from_rows(&["##..", "##..", "...#"]);
        let comps = find_connected_components(&r, ConnectivityType::FourWay).unwrap();
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].pixel_count, 4);
        assert_eq!(comps[0].bounds, Box::new_unchecked(0, 0, 2, 2));
        assert_eq!(comps[1].bounds, Box::new_unchecked(3, 2, 1, 1));
    }

    #[test]
    fn test_extract_component() {
        let r = region_from_rows(&["#.#"]);
        let labels = label_connected_components(&r, ConnectivityType::FourWay).unwrap();
        let second = extract_component(&labels, 2).unwrap();
        assert_eq!(second.data(), &[false, false, true]);
        assert!(matches!(
            extract_component(&labels, 3),
            Err(RegionError::InvalidLabel(3))
        ));
        assert!(extract_component(&labels, 0).is_err());
    }

    #[test]
    fn test_empty_region() {
        let r = Region::new(4, 4).unwrap();
        let labels = label_connected_components(&r, ConnectivityType::FourWay).unwrap();
        assert_eq!(labels.num_components(), 0);
        assert!(find_connected_components(&r, ConnectivityType::FourWay)
            .unwrap()
            .is_empty());
    }
}
