//! Mask history
//!
//! An append-only stack of full mask snapshots. The first snapshot is the
//! initial mask and is never removed, so the history always has a current
//! mask to hand out.

use crate::error::{EditError, EditResult};
use cellpick_core::{Mask, Region};

/// Undo stack of mask snapshots
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Mask>,
}

impl History {
    /// Start a history at `initial`
    pub fn new(initial: Mask) -> Self {
        Self {
            snapshots: vec![initial],
        }
    }

    /// Number of snapshots, including the initial mask
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True if there is an edit to revert
    pub fn can_revert(&self) -> bool {
        self.snapshots.len() > 1
    }

    /// The current (most recent) mask
    pub fn current(&self) -> &Mask {
        // Invariant: snapshots is never empty
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// The mask before the current one, if any
    pub fn previous(&self) -> Option<&Mask> {
        self.snapshots.len().checked_sub(2).map(|i| &self.snapshots[i])
    }

    /// Consume the history, keeping only the current mask
    pub fn into_current(mut self) -> Mask {
        let last = self.snapshots.len() - 1;
        self.snapshots.swap_remove(last)
    }

    /// Append a new snapshot; it becomes current
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `mask` differs in size from the
    /// initial mask.
    pub fn push(&mut self, mask: Mask) -> EditResult<()> {
        let expected = self.current().dimensions();
        if mask.dimensions() != expected {
            return Err(cellpick_core::Error::DimensionMismatch {
                expected,
                actual: mask.dimensions(),
            }
            .into());
        }
        self.snapshots.push(mask);
        Ok(())
    }

    /// Discard the current snapshot and return the new current one
    ///
    /// # Errors
    ///
    /// Returns `EditError::NothingToRevert` if only the initial mask is left.
    pub fn revert(&mut self) -> EditResult<&Mask> {
        if !self.can_revert() {
            return Err(EditError::NothingToRevert);
        }
        self.snapshots.pop();
        Ok(self.current())
    }

    /// Pixels touched by the most recent edit
    ///
    /// With a single snapshot this is the foreground of the current mask.
    /// Otherwise it is the symmetric difference of the last two foregrounds:
    /// added and erased pixels count, relabeled ones do not.
    pub fn last_change(&self) -> EditResult<Region> {
        match self.previous() {
            Some(prev) => Ok(self.current().foreground().xor(&prev.foreground())?),
            None => Ok(self.current().foreground()),
        }
    }
}
