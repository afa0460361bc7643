//! cellpick-edit - Interactive mask-editing engine
//!
//! This crate turns clicks and key presses into edits of a labeled mask:
//!
//! - **History** - undo stack of full mask snapshots
//! - **Shapes** - polygon, square and circle regions
//! - **Growth** - Otsu-seeded growth and legacy contrast growth
//! - **Refinement** - correlation-guided dilation against a time series
//! - **ROI queries** - time-courses and pairwise correlation of an ROI
//! - **Session** - the event dispatcher tying it all together
//!
//! # Examples
//!
//! ```
//! use cellpick_core::Image;
//! use cellpick_edit::{Background, Event, Outcome, Session, SessionParams};
//!
//! let image = Image::new_with_value(32, 32, 100.0).unwrap();
//! let mut session = Session::new(Background::Image(image), None, None)
//!     .unwrap()
//!     .with_params(SessionParams::default().with_disk_size(3))
//!     .with_seed(7);
//!
//! let response = session.handle(Event::Click { x: 10, y: 10 }).unwrap();
//! assert_eq!(response.outcome, Outcome::Changed);
//! assert_eq!(session.current_mask().get(10, 10), Some(1));
//! ```

pub mod correlation;
mod error;
pub mod event;
pub mod grow;
pub mod history;
pub mod mode;
pub mod overlay;
pub mod params;
pub mod refine;
pub mod roi;
pub mod session;
pub mod shapes;

pub use error::{EditError, EditResult};

pub use correlation::{average_pairwise_correlation, pearson};
pub use event::{Command, Event, Key, Keymap};
pub use grow::{grow_region, legacy_grow_region, seed_region};
pub use history::History;
pub use mode::{InteractionMode, ModeAction, ModeState};
pub use overlay::{OVERLAY_ALPHA, Overlay, jet, label_color, render_overlay};
pub use params::{CONTRAST_STEP, MAX_CONTRAST_THRESHOLD, MAX_DISK_SIZE, SessionParams};
pub use refine::{RefineOptions, refine_region, refine_region_with_cancel};
pub use roi::{RoiReport, component_label_at, roi_correlation, roi_info, roi_mask, time_course};
pub use session::{Background, Outcome, Response, Session, pick_cells};
pub use shapes::{OverlapRule, circle_region, ensure_no_overlap, polygon_region, square_region};
