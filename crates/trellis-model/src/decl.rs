//! Serde-loadable panel tree declarations.
//!
//! ```json
//! {
//!   "kind": "Column",
//!   "sizing_mode": "stretch_both",
//!   "arrangement": "column",
//!   "children": [
//!     { "kind": "Plot", "width": 600, "height": 300, "sizing_mode": "scale_width" },
//!     { "kind": "Slider", "height": 40, "sizing_mode": "stretch_width" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::panel::PanelModel;
use crate::sizing::{Arrangement, SizingMode};

/// One panel and, recursively, its children. Every field is optional in the
/// serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelDecl {
    /// Panel type name.
    pub kind: String,
    /// Declared width.
    pub width: Option<f64>,
    /// Declared height.
    pub height: Option<f64>,
    /// Sizing mode.
    pub sizing_mode: SizingMode,
    /// Child arrangement.
    pub arrangement: Arrangement,
    /// Disabled flag.
    pub disabled: bool,
    /// User CSS classes.
    pub css_classes: Vec<String>,
    /// Whether the panel finishes rendering after layout.
    pub deferred_render: bool,
    /// Children in visual order.
    pub children: Vec<PanelDecl>,
}

impl Default for PanelDecl {
    fn default() -> Self {
        Self {
            kind: "Panel".to_string(),
            width: None,
            height: None,
            sizing_mode: SizingMode::default(),
            arrangement: Arrangement::default(),
            disabled: false,
            css_classes: Vec::new(),
            deferred_render: false,
            children: Vec::new(),
        }
    }
}

impl PanelDecl {
    /// The model for this panel alone, without children.
    #[must_use]
    pub fn to_model(&self) -> PanelModel {
        let mut model = PanelModel::new(&self.kind)
            .with_sizing_mode(self.sizing_mode)
            .with_arrangement(self.arrangement)
            .with_disabled(self.disabled)
            .with_css_classes(self.css_classes.iter().cloned())
            .with_deferred_render(self.deferred_render);
        if let Some(width) = self.width {
            model = model.with_width(width);
        }
        if let Some(height) = self.height {
            model = model.with_height(height);
        }
        model
    }
}
