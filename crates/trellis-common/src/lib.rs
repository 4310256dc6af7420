//! Common utilities for the Trellis layout crates.
//!
//! This crate provides shared infrastructure used by all layout components:
//! - **Geometry** - sizes, rectangles and edge sizes in CSS pixels
//! - **Signals** - typed single-threaded observers with scoped connections
//! - **Warning System** - deduplicated warnings routed through `log`

pub mod geometry;
pub mod signal;
pub mod warning;

pub use geometry::{EdgeSizes, Rect, Size};
pub use signal::{Connection, Signal};
