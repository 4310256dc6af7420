//! Panel models.

use std::fmt;

use crate::sizing::{Arrangement, SizingMode};

/// Document-assigned identifier of a panel model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub u64);

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The declared state of one visual panel.
///
/// A model is read-only to the layout core. Fields that drive change events
/// (`sizing_mode`, `children`) can only be changed through
/// [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq)]
pub struct PanelModel {
    pub(crate) id: ModelId,
    kind: String,
    pub(crate) width: Option<f64>,
    pub(crate) height: Option<f64>,
    disabled: bool,
    pub(crate) sizing_mode: SizingMode,
    arrangement: Arrangement,
    css_classes: Vec<String>,
    deferred_render: bool,
    pub(crate) children: Vec<ModelId>,
}

impl PanelModel {
    /// A fixed-size panel of the given kind with nothing declared.
    ///
    /// `kind` names the panel type (`"Plot"`, `"Row"`, ...) and shows up in
    /// view names.
    #[must_use]
    pub fn new(kind: &str) -> Self {
        Self {
            id: ModelId(0),
            kind: kind.to_string(),
            width: None,
            height: None,
            disabled: false,
            sizing_mode: SizingMode::Fixed,
            arrangement: Arrangement::Overlay,
            css_classes: Vec::new(),
            deferred_render: false,
            children: Vec::new(),
        }
    }

    /// Declare width and height.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Declare only a width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Declare only a height.
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the sizing mode.
    #[must_use]
    pub fn with_sizing_mode(mut self, mode: SizingMode) -> Self {
        self.sizing_mode = mode;
        self
    }

    /// Set the child arrangement.
    #[must_use]
    pub fn with_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.arrangement = arrangement;
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Add user CSS classes.
    #[must_use]
    pub fn with_css_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.css_classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Mark the panel as finishing its render asynchronously, after layout.
    #[must_use]
    pub fn with_deferred_render(mut self, deferred: bool) -> Self {
        self.deferred_render = deferred;
        self
    }

    /// Declare the ordered children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<ModelId>) -> Self {
        self.children = children;
        self
    }

    /// The model's document id.
    #[must_use]
    pub const fn id(&self) -> ModelId {
        self.id
    }

    /// The panel type name.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Declared width.
    #[must_use]
    pub const fn width(&self) -> Option<f64> {
        self.width
    }

    /// Declared height.
    #[must_use]
    pub const fn height(&self) -> Option<f64> {
        self.height
    }

    /// Whether the panel is disabled.
    #[must_use]
    pub const fn disabled(&self) -> bool {
        self.disabled
    }

    /// Current sizing mode.
    #[must_use]
    pub const fn sizing_mode(&self) -> SizingMode {
        self.sizing_mode
    }

    /// How children are placed.
    #[must_use]
    pub const fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    /// User CSS classes, in declaration order.
    #[must_use]
    pub fn css_classes(&self) -> &[String] {
        &self.css_classes
    }

    /// Whether finishing is reported by the host after layout.
    #[must_use]
    pub const fn deferred_render(&self) -> bool {
        self.deferred_render
    }

    /// Declared children, in order. This order is the visual order.
    #[must_use]
    pub fn layoutable_children(&self) -> &[ModelId] {
        &self.children
    }

    /// `width / height` of the declared dimensions.
    ///
    /// `None` unless both are declared and the height is non-zero.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if h != 0.0 => Some(w / h),
            _ => None,
        }
    }
}
