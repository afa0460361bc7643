//! Otsu threshold regression test
//!
//! Thresholds synthetic bimodal, constant and saturating intensity
//! distributions and checks where the split falls.
//!
//! Run with:
//! ```
//! cargo test -p cellpick-core --test otsu_reg
//! ```

use cellpick_core::{Histogram, Image};
use cellpick_test::{BACKGROUND_LEVEL, CELL_LEVEL, CellSpec, RegParams, synthetic_cell_image};

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

#[test]
fn otsu_reg() {
    let mut rp = RegParams::new("otsu");

    // Two clusters: 20..=30 and 170..=180
    let values: Vec<f32> = (0..400)
        .map(|i| {
            let base = if i % 2 == 0 { 20.0 } else { 170.0 };
            base + (i % 11) as f32
        })
        .collect();
    let t = Histogram::from_values(values.iter().copied()).otsu_threshold();
    eprintln!("  bimodal threshold: {}", t);
    rp.compare_values(30.0, t as f64, 0.0);

    // Every value of the low cluster is background, none of the high one
    let below = values.iter().filter(|&&v| Histogram::bin_of(v) <= t).count();
    rp.compare_values(200.0, below as f64, 0.0);

    // Constant input: the value itself
    let constant = Image::new_with_value(6, 6, 77.0).expect("image");
    rp.compare_values(77.0, Histogram::from_image(&constant).otsu_threshold() as f64, 0.0);

    // Synthetic cells: the split separates cell and background levels
    let image = synthetic_cell_image(32, 32, &[CellSpec::new(16, 16, 6)]).expect("image");
    let t = Histogram::from_image(&image).otsu_threshold() as f64;
    let between = (CELL_LEVEL as f64) <= t && t < BACKGROUND_LEVEL as f64;
    rp.compare_values(1.0, flag(between), 0.0);
    let cells = image.threshold_by(|v| Histogram::bin_of(v) as f64 <= t);
    let expected = (0..32u32)
        .flat_map(|y| (0..32u32).map(move |x| (x, y)))
        .filter(|&(x, y)| CellSpec::new(16, 16, 6).contains(x, y))
        .count();
    rp.compare_values(expected as f64, cells.count() as f64, 0.0);

    // Out-of-range and NaN intensities saturate instead of failing
    let hist = Histogram::from_values([-5.0, f32::NAN, 70000.0]);
    rp.compare_values(2.0, hist.counts()[0] as f64, 0.0);
    rp.compare_values(65536.0, hist.len() as f64, 0.0);
    let empty = Histogram::from_values(std::iter::empty::<f32>());
    rp.compare_values(0.0, empty.otsu_threshold() as f64, 0.0);

    assert!(rp.cleanup(), "otsu regression test failed");
}
