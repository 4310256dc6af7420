//! Layout orchestration for trees of visual panels.
//!
//! # Scope
//!
//! This crate implements:
//! - **Box Geometry** - six named quantities per view and the `layout_bbox` snapshot
//! - **Space Prober** - available space from the nearest sized ancestor or the viewport
//! - **Size Negotiator** - aspect-preserving fit into available space
//! - **Child Tree Manager** - ordered build, rebuild and recursive teardown of child views
//! - **Layout Invoker** - the root-anchored layout pass and its triggers
//! - **Finish/Idle Tracker** - subtree completion and the one-shot idle notification
//!
//! # Not Implemented
//!
//! - Solving constraints between quantities. [`Variable`]s are named cells an
//!   external solver can bind; this crate only writes and reads them.
//! - Drawing. Views decide where and how big, never what.
//!
//! # Usage
//!
//! ```ignore
//! let mut tree = LayoutTree::new(LayoutOptions::default());
//! let mut cx = LayoutContext::new(&document, &mut dom);
//! let root = tree.mount(root_model, None, &mut cx)?;
//! dom.resize_viewport(Size::new(1024.0, 768.0));
//! tree.process_pending(&mut LayoutContext::new(&document, &mut dom))?;
//! ```

pub mod context;
mod dump;
pub mod error;
mod finish;
pub mod geometry;
pub mod host;
mod invoke;
pub mod options;
pub mod sizing;
pub mod space;
pub mod tree;
pub mod view;

pub use context::LayoutContext;
pub use error::LayoutError;
pub use geometry::{BoxGeometry, LayoutBBox, Quantity, Variable};
pub use host::RenderHost;
pub use options::LayoutOptions;
pub use sizing::{SizingError, fit_aspect, resolve_size};
pub use space::{AvailableSpace, available_space};
pub use tree::{LayoutTree, Trigger};
pub use view::{LayoutView, ViewId};
