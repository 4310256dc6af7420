//! Layout views: the per-model layout state living in a [`LayoutTree`].
//!
//! [`LayoutTree`]: crate::LayoutTree

use std::fmt;

use trellis_common::Connection;
use trellis_dom::ElementId;
use trellis_model::ModelId;

use crate::geometry::{BoxGeometry, LayoutBBox};

/// Arena index of a view inside its [`LayoutTree`](crate::LayoutTree).
///
/// Slots are never reused, so a stale id keeps failing with
/// [`LayoutError::UnknownView`](crate::LayoutError::UnknownView) after its view
/// is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub(crate) usize);

impl ViewId {
    /// The arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Layout state of one panel: its element, geometry, ordered children and
/// completion flags.
#[derive(Debug)]
pub struct LayoutView {
    pub(crate) id: ViewId,
    pub(crate) model: ModelId,
    pub(crate) name: String,
    pub(crate) el: ElementId,
    pub(crate) parent: Option<ViewId>,
    pub(crate) children: Vec<ViewId>,
    pub(crate) geometry: BoxGeometry,
    pub(crate) finished: bool,
    pub(crate) idle_notified: bool,
    /// Document subscriptions; dropping them unsubscribes.
    pub(crate) subscriptions: Vec<Connection>,
    /// Root only.
    pub(crate) resize: Option<Connection>,
}

impl LayoutView {
    pub(crate) fn new(
        id: ViewId,
        model: ModelId,
        kind: &str,
        el: ElementId,
        parent: Option<ViewId>,
    ) -> Self {
        let name = format!("{kind}View({model})");
        Self {
            id,
            model,
            geometry: BoxGeometry::new(&name),
            name,
            el,
            parent,
            children: Vec::new(),
            finished: false,
            idle_notified: false,
            subscriptions: Vec::new(),
            resize: None,
        }
    }

    /// This view's id.
    #[must_use]
    pub const fn id(&self) -> ViewId {
        self.id
    }

    /// The model this view lays out.
    #[must_use]
    pub const fn model(&self) -> ModelId {
        self.model
    }

    /// Display name, `"<Kind>View(<model id>)"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element this view owns.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.el
    }

    /// Parent view; `None` for a root.
    #[must_use]
    pub const fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    /// Whether this view has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Child views in declared order.
    #[must_use]
    pub fn children(&self) -> &[ViewId] {
        &self.children
    }

    /// The six geometry cells.
    #[must_use]
    pub const fn geometry(&self) -> &BoxGeometry {
        &self.geometry
    }

    /// Snapshot of the current geometry.
    #[must_use]
    pub const fn layout_bbox(&self) -> LayoutBBox {
        self.geometry.layout_bbox()
    }

    /// This view's own finished flag, ignoring its children.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the idle notification already went out (root only).
    #[must_use]
    pub const fn idle_notified(&self) -> bool {
        self.idle_notified
    }

    /// Whether the view holds a live resize subscription.
    #[must_use]
    pub fn listens_for_resize(&self) -> bool {
        self.resize.as_ref().is_some_and(Connection::is_live)
    }
}
