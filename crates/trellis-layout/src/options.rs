//! Layout configuration.

use serde::{Deserialize, Serialize};

/// Knobs that tie the layout core to a particular host page.
///
/// Every field has a default, so a partial JSON object deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Class of wrapper elements the space prober looks through.
    pub wrapper_class: String,
    /// Tag name of the element created for each view.
    pub element_tag: String,
    /// Prefix of the classes views put on their own elements.
    pub class_prefix: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            wrapper_class: "trellis-root".to_string(),
            element_tag: "div".to_string(),
            class_prefix: "trellis".to_string(),
        }
    }
}

impl LayoutOptions {
    /// Class every view element carries.
    #[must_use]
    pub fn layout_class(&self) -> String {
        format!("{}-layout", self.class_prefix)
    }

    /// Class added to elements of disabled panels.
    #[must_use]
    pub fn disabled_class(&self) -> String {
        format!("{}-disabled", self.class_prefix)
    }
}
