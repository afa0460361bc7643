//! History regression test
//!
//! Pushes a sequence of edited masks, reverts them one at a time and
//! checks each restored snapshot bit for bit, including the last-change
//! ROI between consecutive snapshots.
//!
//! Run with:
//! ```
//! cargo test -p cellpick-edit --test history_reg
//! ```

use cellpick_core::{Box, Mask, Region};
use cellpick_edit::{EditError, History, roi_mask};
use cellpick_test::{RegParams, block_mask};

#[test]
fn history_reg() {
    let mut rp = RegParams::new("history");

    let initial = block_mask(20, 20, Box::new_unchecked(1, 1, 2, 2), 3).expect("mask");
    let mut history = History::new(initial.clone());

    // Five edits, each painting a new block with its own label
    let mut snapshots = vec![initial.clone()];
    for k in 0..5u16 {
        let mut region = Region::new(20, 20).expect("region");
        region.fill_box(&Box::new_unchecked(3 * k as i32 + 4, 10, 2, 3));
        let next = history
            .current()
            .painted(&region, k % 8 + 1)
            .expect("paint");
        history.push(next.clone()).expect("push");
        snapshots.push(next);

        rp.compare_masks(snapshots.last().expect("snapshot"), history.current());
        let change = roi_mask(&history, None).expect("last change");
        rp.compare_regions(&region, &change);
    }
    rp.compare_values(6.0, history.len() as f64, 0.0);

    // Revert walks back through every snapshot
    for expected in snapshots.iter().rev().skip(1) {
        let current = history.revert().expect("revert");
        rp.compare_masks(expected, current);
    }
    rp.compare_values(1.0, history.len() as f64, 0.0);
    rp.compare_masks(&initial, history.current());

    // Nothing left to revert
    let result = history.revert();
    rp.compare_values(
        1.0,
        if matches!(result, Err(EditError::NothingToRevert)) { 1.0 } else { 0.0 },
        0.0,
    );
    rp.compare_masks(&initial, history.current());

    // Relabeling leaves the foreground alone, so the last change is empty
    let relabeled = initial
        .painted(&initial.foreground(), 5)
        .expect("paint");
    history.push(relabeled).expect("push");
    let change = roi_mask(&history, None);
    rp.compare_values(
        1.0,
        if matches!(change, Err(EditError::EmptyRoi)) { 1.0 } else { 0.0 },
        0.0,
    );

    // Snapshots must keep the session size
    let wrong = Mask::new(20, 19).expect("mask");
    rp.compare_values(1.0, if history.push(wrong).is_err() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(2.0, history.len() as f64, 0.0);

    assert!(rp.cleanup(), "history regression test failed");
}
