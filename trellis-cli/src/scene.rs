//! Scene files: a viewport plus one declared panel tree.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use trellis_common::Size;
use trellis_dom::DEFAULT_VIEWPORT;
use trellis_layout::LayoutOptions;
use trellis_model::PanelDecl;

/// A page to lay out.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Initial viewport.
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    /// Margin of `<body>` on every side; the host default when absent.
    #[serde(default)]
    pub body_margin: Option<f64>,
    /// Layout knobs.
    #[serde(default)]
    pub options: LayoutOptions,
    /// The root panel.
    pub root: PanelDecl,
}

const fn default_viewport() -> Size {
    DEFAULT_VIEWPORT
}

impl Scene {
    /// Read and parse a JSON scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene '{}'", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid scene '{}'", path.display()))
    }

    /// Parse a JSON scene.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Parse a `WIDTHxHEIGHT` viewport such as `1024x768`.
pub fn parse_viewport(value: &str) -> Result<Size, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let dimension = |s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| format!("'{s}' is not a positive number"))
    };
    Ok(Size::new(dimension(width)?, dimension(height)?))
}
