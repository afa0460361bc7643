//! Overlay rendering
//!
//! Maps each mask value to a translucent RGBA color. The eight mask numbers
//! take evenly spaced samples of the jet colormap; background is fully
//! transparent.

use cellpick_core::color::compose_rgba;
use cellpick_core::{MAX_MASK_NUMBER, Mask};

/// Alpha of labeled pixels
pub const OVERLAY_ALPHA: u8 = 128;

// Piecewise-linear jet segments: (position, value)
const JET_RED: [(f64, f64); 5] = [(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const JET_GREEN: [(f64, f64); 6] = [
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const JET_BLUE: [(f64, f64); 5] = [(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

/// RGBA rendering of a mask, one `0xRRGGBBAA` pixel per mask pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl Overlay {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    pub fn data(&self) -> &[u32] {
        &self.data
    }
}

fn interpolate(segments: &[(f64, f64)], t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    for pair in segments.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if t <= x1 {
            return y0 + (y1 - y0) * (t - x0) / (x1 - x0);
        }
    }
    segments.last().map_or(0.0, |&(_, y)| y)
}

/// Jet colormap sample at `t` in `[0, 1]`, as 8-bit RGB
pub fn jet(t: f64) -> (u8, u8, u8) {
    let channel = |segments: &[(f64, f64)]| (interpolate(segments, t) * 255.0).round() as u8;
    (channel(&JET_RED), channel(&JET_GREEN), channel(&JET_BLUE))
}

/// Color of mask value `value` (1..=8), or `None` for background
pub fn label_color(value: u16) -> Option<(u8, u8, u8)> {
    if value == 0 || value > MAX_MASK_NUMBER {
        return None;
    }
    Some(jet(value as f64 / MAX_MASK_NUMBER as f64))
}

/// Render `mask` as an RGBA overlay
pub fn render_overlay(mask: &Mask) -> Overlay {
    let palette: Vec<u32> = (0..=MAX_MASK_NUMBER)
        .map(|v| match label_color(v) {
            Some((r, g, b)) => compose_rgba(r, g, b, OVERLAY_ALPHA),
            None => compose_rgba(0, 0, 0, 0),
        })
        .collect();
    let data = mask
        .data()
        .iter()
        .map(|&v| palette.get(v as usize).copied().unwrap_or(0))
        .collect();
    Overlay {
        width: mask.width(),
        height: mask.height(),
        data,
    }
}
