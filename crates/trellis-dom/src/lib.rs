//! Host element tree for Trellis.
//!
//! This crate stands in for the page a panel tree is embedded in: an
//! arena-based element tree following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), plus the pieces of
//! CSSOM View the layout core reads back (bounding rects, padding, margin,
//! viewport client size) and the window's resize event.
//!
//! # Design
//!
//! The tree uses arena allocation with [`ElementId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Nodes are never freed: a removed element is simply detached, so a
//! stale [`ElementId`] still refers to the same (now disconnected) element.

use trellis_common::{Connection, EdgeSizes, Rect, Signal, Size};

/// Viewport used by [`DomTree::default`].
pub const DEFAULT_VIEWPORT: Size = Size::new(1280.0, 720.0);

/// [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
///
/// "body { margin: 8px; }"
pub const DEFAULT_BODY_MARGIN: f64 = 8.0;

/// A type-safe index into the element tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl ElementId {
    /// The document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node document... and parent (null or an element)."
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<ElementId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<ElementId>,
}

/// The two node types a host page needs.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
}

/// Element-specific data.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// [§ 4.9 `classList`](https://dom.spec.whatwg.org/#dom-element-classlist),
    /// in insertion order.
    pub class_list: Vec<String>,
    /// The element's `style` attribute, limited to the positioning properties.
    pub style: InlineStyle,
    /// Geometry the host reports for the element when no inline size is set.
    pub metrics: BoxMetrics,
}

impl ElementData {
    /// Whether `name` is in the element's class list.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.class_list.iter().any(|c| c == name)
    }
}

/// Inline positioning style, each value a CSS string such as `"12px"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    /// `position` (`"relative"`, `"absolute"`, ...).
    pub position: Option<String>,
    /// `left`.
    pub left: Option<String>,
    /// `top`.
    pub top: Option<String>,
    /// `width`.
    pub width: Option<String>,
    /// `height`.
    pub height: Option<String>,
}

/// Measured box of an element as the host's own layout engine reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxMetrics {
    /// Border box in page coordinates.
    pub border_box: Rect,
    /// Computed padding.
    pub padding: EdgeSizes,
    /// Computed margin.
    pub margin: EdgeSizes,
}

/// Format a pixel length the way inline styles carry it.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Parse a `"<number>px"` length. Anything else yields `None`.
#[must_use]
pub fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

/// Arena-based element tree with a viewport and a resize event.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// A fresh tree already holds the document node, the `<html>` document
/// element and `<body>`.
///
/// Removed elements are only detached. Their slots stay allocated so an
/// [`ElementId`] is never reused, and the arena grows with every element
/// ever created.
#[derive(Debug)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `ElementId`.
    nodes: Vec<Node>,
    html: ElementId,
    body: ElementId,
    /// [CSSOM View § 6](https://drafts.csswg.org/cssom-view/#dom-element-clientwidth)
    /// `document.documentElement.clientWidth` / `clientHeight`.
    viewport: Size,
    resize: Signal<Size>,
}

impl DomTree {
    /// Create a document with `<html>` and `<body>` sized to `viewport`.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let mut tree = Self {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
            }],
            html: ElementId::ROOT,
            body: ElementId::ROOT,
            viewport,
            resize: Signal::new(),
        };

        tree.html = tree.create_element("html");
        tree.append_child(ElementId::ROOT, tree.html);
        tree.body = tree.create_element("body");
        tree.append_child(tree.html, tree.body);
        tree.set_margin(tree.body, EdgeSizes::uniform(DEFAULT_BODY_MARGIN));
        tree.sync_viewport_boxes();
        tree
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> ElementId {
        ElementId::ROOT
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    #[must_use]
    pub const fn document_element(&self) -> ElementId {
        self.html
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    #[must_use]
    pub const fn body(&self) -> ElementId {
        self.body
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes ever allocated, connected or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// [§ 4.5 `createElement`](https://dom.spec.whatwg.org/#dom-document-createelement)
    ///
    /// The new element is not yet attached to the tree.
    pub fn create_element(&mut self, tag_name: &str) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            node_type: NodeType::Element(ElementData {
                tag_name: tag_name.to_string(),
                ..ElementData::default()
            }),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`. A child that already
    /// has a parent is moved, as `appendChild` does.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() || parent == child {
            return;
        }
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// [§ 4.2.4 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Removes `child` from `parent`; does nothing if `child` is not a child of
    /// `parent`.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) {
        if self.parent(child) == Some(parent) {
            self.detach(child);
        }
    }

    /// Remove `id` from whatever parent it has.
    pub fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.nodes[parent.0].children.retain(|&c| c != id);
        self.nodes[id.0].parent = None;
    }

    /// Remove every child of `id`, keeping the children themselves alive.
    pub fn empty(&mut self, id: ElementId) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// [§ 4.4 `parentElement`](https://dom.spec.whatwg.org/#dom-node-parentelement)
    ///
    /// "The parentElement getter steps are to return this's parent element."
    /// The document node is not an element, so `<html>` has none.
    #[must_use]
    pub fn parent_element(&self, id: ElementId) -> Option<ElementId> {
        self.parent(id).filter(|&p| self.as_element(p).is_some())
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: ElementId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// [§ 4.4 `isConnected`](https://dom.spec.whatwg.org/#dom-node-isconnected)
    ///
    /// Whether `id`'s root is the document node.
    #[must_use]
    pub fn is_connected(&self, id: ElementId) -> bool {
        id == ElementId::ROOT || self.ancestors(id).any(|a| a == ElementId::ROOT)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: ElementId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Document => None,
        })
    }

    /// Mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id.0).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Document => None,
        })
    }

    /// Whether the element carries class `name`.
    #[must_use]
    pub fn has_class(&self, id: ElementId, name: &str) -> bool {
        self.as_element(id).is_some_and(|e| e.has_class(name))
    }

    /// Replace the element's whole class list.
    pub fn set_class_list(&mut self, id: ElementId, classes: Vec<String>) {
        if let Some(element) = self.as_element_mut(id) {
            element.class_list = classes;
        }
    }

    /// The element's inline style.
    #[must_use]
    pub fn style(&self, id: ElementId) -> Option<&InlineStyle> {
        self.as_element(id).map(|e| &e.style)
    }

    /// Mutable access to the element's inline style.
    pub fn style_mut(&mut self, id: ElementId) -> Option<&mut InlineStyle> {
        self.as_element_mut(id).map(|e| &mut e.style)
    }

    /// Record the border box the host measured for `id`.
    pub fn set_border_box(&mut self, id: ElementId, rect: Rect) {
        if let Some(element) = self.as_element_mut(id) {
            element.metrics.border_box = rect;
        }
    }

    /// Record the computed padding of `id`.
    pub fn set_padding(&mut self, id: ElementId, padding: EdgeSizes) {
        if let Some(element) = self.as_element_mut(id) {
            element.metrics.padding = padding;
        }
    }

    /// Record the computed margin of `id`.
    pub fn set_margin(&mut self, id: ElementId, margin: EdgeSizes) {
        if let Some(element) = self.as_element_mut(id) {
            element.metrics.margin = margin;
        }
        if id == self.body {
            self.sync_viewport_boxes();
        }
    }

    /// Computed padding; zero for non-elements.
    #[must_use]
    pub fn padding(&self, id: ElementId) -> EdgeSizes {
        self.as_element(id).map(|e| e.metrics.padding).unwrap_or_default()
    }

    /// Computed margin; zero for non-elements.
    #[must_use]
    pub fn margin(&self, id: ElementId) -> EdgeSizes {
        self.as_element(id).map(|e| e.metrics.margin).unwrap_or_default()
    }

    /// [CSSOM View § 6.1 `getBoundingClientRect`](https://drafts.csswg.org/cssom-view/#dom-element-getboundingclientrect)
    ///
    /// Disconnected elements have no layout box and report an all-zero rect.
    /// Otherwise pixel `width`/`height` inline styles override the measured
    /// size, and pixel `left`/`top` place the box relative to its parent's
    /// rect.
    #[must_use]
    pub fn bounding_client_rect(&self, id: ElementId) -> Rect {
        let Some(element) = self.as_element(id) else {
            return Rect::default();
        };
        if !self.is_connected(id) {
            return Rect::default();
        }

        let measured = element.metrics.border_box;
        let style = &element.style;
        let length = |value: Option<&str>| value.and_then(parse_px);

        let origin = |offset: Option<f64>, fallback: f64, axis: fn(&Rect) -> f64| {
            offset.map_or(fallback, |o| {
                let base = self
                    .parent_element(id)
                    .map_or(0.0, |p| axis(&self.bounding_client_rect(p)));
                base + o
            })
        };

        Rect {
            x: origin(length(style.left.as_deref()), measured.x, |r| r.x),
            y: origin(length(style.top.as_deref()), measured.y, |r| r.y),
            width: length(style.width.as_deref()).unwrap_or(measured.width),
            height: length(style.height.as_deref()).unwrap_or(measured.height),
        }
    }

    /// `documentElement.clientWidth` x `documentElement.clientHeight`.
    #[must_use]
    pub const fn client_size(&self) -> Size {
        self.viewport
    }

    /// Resize the viewport and fire the window `resize` event.
    pub fn resize_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.sync_viewport_boxes();
        self.resize.emit(&viewport);
    }

    /// Listen for window `resize` events. The listener stays registered until
    /// the returned connection is dropped.
    pub fn on_resize(&self, handler: impl FnMut(&Size) + 'static) -> Connection {
        self.resize.connect(handler)
    }

    /// Number of live resize listeners.
    #[must_use]
    pub fn resize_listener_count(&self) -> usize {
        self.resize.connection_count()
    }

    /// Keep the measured boxes of `<html>` and `<body>` in step with the
    /// viewport.
    fn sync_viewport_boxes(&mut self) {
        let viewport = self.viewport;
        let margin = self.margin(self.body);
        let html = self.html;
        let body = self.body;
        self.set_border_box(html, Rect::new(0.0, 0.0, viewport.width, viewport.height));
        self.set_border_box(
            body,
            Rect::new(
                margin.left,
                margin.top,
                viewport.width - margin.horizontal(),
                viewport.height - margin.vertical(),
            ),
        );
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT)
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<ElementId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
