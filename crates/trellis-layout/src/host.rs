//! The rendering primitives the layout core needs from its host page.
//!
//! Views never touch a concrete element tree directly; everything goes
//! through [`RenderHost`]. [`DomTree`] is the in-process implementation.

use trellis_common::{Connection, EdgeSizes, Rect, Size};
use trellis_dom::{DomTree, ElementId, InlineStyle};

/// Element creation, styling and measurement of a live element tree.
pub trait RenderHost {
    /// Create a detached element.
    fn create_element(&mut self, tag_name: &str) -> ElementId;

    /// Append (or move) `child` to the end of `parent`'s children.
    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Detach `element` from its parent.
    fn remove_element(&mut self, element: ElementId);

    /// Detach every child of `element`.
    fn empty(&mut self, element: ElementId);

    /// Children of `element`, in document order.
    fn children(&self, element: ElementId) -> Vec<ElementId>;

    /// Parent element, if any. The document node does not count.
    fn parent_element(&self, element: ElementId) -> Option<ElementId>;

    /// Whether `element` carries class `name`.
    fn has_class(&self, element: ElementId, name: &str) -> bool;

    /// Replace `element`'s class list.
    fn set_class_list(&mut self, element: ElementId, classes: Vec<String>);

    /// Replace `element`'s positioning styles.
    fn set_style(&mut self, element: ElementId, style: InlineStyle);

    /// The `<body>` element.
    fn body(&self) -> ElementId;

    /// Client size of the document element (the viewport).
    fn client_size(&self) -> Size;

    /// Computed margin of `element`.
    fn margin(&self, element: ElementId) -> EdgeSizes;

    /// Computed padding of `element`.
    fn padding(&self, element: ElementId) -> EdgeSizes;

    /// Border box of `element`; all zero when it is not connected.
    fn bounding_client_rect(&self, element: ElementId) -> Rect;

    /// Subscribe to viewport resizes until the connection is dropped.
    fn on_resize(&self, handler: Box<dyn FnMut(&Size)>) -> Connection;
}

impl RenderHost for DomTree {
    fn create_element(&mut self, tag_name: &str) -> ElementId {
        Self::create_element(self, tag_name)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        Self::append_child(self, parent, child);
    }

    fn remove_element(&mut self, element: ElementId) {
        self.detach(element);
    }

    fn empty(&mut self, element: ElementId) {
        Self::empty(self, element);
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        Self::children(self, element).to_vec()
    }

    fn parent_element(&self, element: ElementId) -> Option<ElementId> {
        Self::parent_element(self, element)
    }

    fn has_class(&self, element: ElementId, name: &str) -> bool {
        Self::has_class(self, element, name)
    }

    fn set_class_list(&mut self, element: ElementId, classes: Vec<String>) {
        Self::set_class_list(self, element, classes);
    }

    fn set_style(&mut self, element: ElementId, style: InlineStyle) {
        if let Some(current) = self.style_mut(element) {
            *current = style;
        }
    }

    fn body(&self) -> ElementId {
        Self::body(self)
    }

    fn client_size(&self) -> Size {
        Self::client_size(self)
    }

    fn margin(&self, element: ElementId) -> EdgeSizes {
        Self::margin(self, element)
    }

    fn padding(&self, element: ElementId) -> EdgeSizes {
        Self::padding(self, element)
    }

    fn bounding_client_rect(&self, element: ElementId) -> Rect {
        Self::bounding_client_rect(self, element)
    }

    fn on_resize(&self, handler: Box<dyn FnMut(&Size)>) -> Connection {
        Self::on_resize(self, handler)
    }
}
