//! Panel models for Trellis.
//!
//! # Scope
//!
//! This crate provides the model side of a panel tree:
//! - **Sizing modes** - how a panel derives its size ([`SizingMode`])
//! - **Arrangements** - how a container places its children ([`Arrangement`])
//! - **Panel models** - declared sizes, classes and ordered children ([`PanelModel`])
//! - **Document** - the model arena, change events and the idle channel ([`Document`])
//! - **Declarations** - serde-loadable nested panel trees ([`PanelDecl`])
//!
//! Views never mutate models. Every mutation goes through [`Document`], which
//! emits a typed event only when a value actually changed.

pub mod decl;
pub mod document;
pub mod panel;
pub mod sizing;

pub use decl::PanelDecl;
pub use document::{ChildrenChanged, Document, ModelError, SizingModeChanged};
pub use panel::{ModelId, PanelModel};
pub use sizing::{Arrangement, SizingMode};
