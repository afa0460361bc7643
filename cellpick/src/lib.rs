//! Cellpick - Interactive cell picking for microscopy masks
//!
//! Delineates regions of interest on a microscopy image or image
//! time-series and produces a labeled integer mask.
//!
//! # Overview
//!
//! - Raster containers: images, time series, labeled masks, binary regions
//! - Binary morphology with cross, diamond, disk and square elements
//! - Connected-component labeling and seed fill
//! - The editing engine: seeded growth with Otsu thresholding,
//!   correlation-guided refinement, contrast growth, polygon/square/circle
//!   shapes, undo history and ROI time-course analysis
//!
//! # Example
//!
//! ```
//! use cellpick::{Background, Event, Image, Key, pick_cells};
//!
//! let image = Image::new_with_value(64, 64, 120.0).unwrap();
//! let events = [
//!     Event::Key(Key::char(']')),
//!     Event::Click { x: 20, y: 20 },
//!     Event::Key(Key::Return),
//! ];
//! let mask = pick_cells(Background::Image(image), None, None, events, |_| {}).unwrap();
//! assert_eq!(mask.get(20, 20), Some(1));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use cellpick_core::*;

// The editing engine is the main entry point
pub use cellpick_edit::{
    Background, EditError, EditResult, Event, InteractionMode, Key, Keymap, Outcome, Overlay,
    RefineOptions, Response, RoiReport, Session, SessionParams, pick_cells,
};

// Re-export domain crates as modules to avoid name conflicts
pub use cellpick_edit as edit;
pub use cellpick_morph as morph;
pub use cellpick_region as region;
