//! Connected component regression test
//!
//! Labels the foreground of a mask holding several cells and checks
//! component counts, sizes and raster-order numbering, then extracts
//! single components by label and by seed.
//!
//! Run with:
//! ```
//! cargo test -p cellpick-region --test conncomp_reg
//! ```

use cellpick_core::{Box, Region};
use cellpick_region::{
    ConnectivityType, SeedFillOptions, component_at, extract_component,
    find_connected_components, floodfill, label_connected_components, seedfill_binary,
};
use cellpick_test::{RegParams, block_mask};

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

fn three_blocks() -> Region {
    let mut mask = block_mask(30, 20, Box::new_unchecked(2, 2, 4, 3), 1).expect("mask");
    for (rect, value) in [
        (Box::new_unchecked(20, 1, 5, 5), 2),
        (Box::new_unchecked(10, 12, 3, 6), 1),
    ] {
        let mut r = Region::new(30, 20).expect("region");
        r.fill_box(&rect);
        mask.paint(&r, value).expect("paint");
    }
    // A diagonal neighbor of the first block: separate under 4-connectivity
    mask.set(6, 5, 3).expect("set");
    mask.foreground()
}

#[test]
fn conncomp_reg() {
    let mut rp = RegParams::new("conncomp");

    let fg = three_blocks();
    let four = find_connected_components(&fg, ConnectivityType::FourWay).expect("components");
    let eight = find_connected_components(&fg, ConnectivityType::EightWay).expect("components");
    rp.compare_values(4.0, four.len() as f64, 0.0);
    rp.compare_values(3.0, eight.len() as f64, 0.0);

    // Raster order: the block at top right starts on the first occupied row
    rp.compare_values(25.0, four[0].pixel_count as f64, 0.0);
    rp.compare_values(12.0, four[1].pixel_count as f64, 0.0);
    rp.compare_values(
        1.0,
        flag(four[0].bounds == Box::new_unchecked(20, 1, 5, 5)),
        0.0,
    );

    let labels = label_connected_components(&fg, ConnectivityType::FourWay).expect("labels");
    rp.compare_values(4.0, labels.num_components() as f64, 0.0);
    for component in &four {
        let extracted = extract_component(&labels, component.label).expect("extract");
        rp.compare_values(component.pixel_count as f64, extracted.count() as f64, 0.0);
    }
    rp.compare_values(1.0, flag(extract_component(&labels, 5).is_err()), 0.0);

    // Component under a seed
    let at = component_at(&fg, 11, 15, ConnectivityType::FourWay).expect("component");
    rp.compare_values(18.0, at.count() as f64, 0.0);
    let background = component_at(&fg, 0, 19, ConnectivityType::FourWay).expect("component");
    rp.compare_values(0.0, background.count() as f64, 0.0);
    let joined = seedfill_binary(&fg, 3, 3, &SeedFillOptions::new(ConnectivityType::EightWay))
        .expect("seedfill");
    rp.compare_values(13.0, joined.count() as f64, 0.0);
    rp.compare_values(1.0, flag(component_at(&fg, 30, 0, ConnectivityType::FourWay).is_err()), 0.0);

    // Flood fill erases a component in place
    let mut erased = fg.clone();
    let filled =
        floodfill(&mut erased, 22, 3, false, ConnectivityType::FourWay).expect("floodfill");
    rp.compare_values(25.0, filled as f64, 0.0);
    rp.compare_values((fg.count() - 25) as f64, erased.count() as f64, 0.0);

    assert!(rp.cleanup(), "conncomp regression test failed");
}
