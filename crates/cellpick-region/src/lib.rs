//! cellpick-region - Region analysis for the cellpick mask editor
//!
//! This crate provides:
//!
//! - **Connected component analysis** - labeling the ROIs of a binary region
//! - **Seed fill operations** - flood fill and component-of-seed extraction
//!
//! # Examples
//!
//! ```
//! use cellpick_core::Region;
//! use cellpick_region::{ConnectivityType, find_connected_components};
//!
//! let mut region = Region::new(100, 100).unwrap();
//! region.set(10, 10, true).unwrap();
//! region.set(11, 10, true).unwrap();
//! region.set(50, 50, true).unwrap();
//!
//! let components = find_connected_components(&region, ConnectivityType::FourWay).unwrap();
//! assert_eq!(components.len(), 2);
//! ```

pub mod conncomp;
pub mod error;
pub mod seedfill;

pub use error::{RegionError, RegionResult};

pub use conncomp::{
    ConnectedComponent, ConnectivityType, Labels, component_at, extract_component,
    find_connected_components, label_connected_components,
};

pub use seedfill::{SeedFillOptions, floodfill, seedfill_binary};
