//! Sizing modes and child arrangements.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// How a panel derives its width and height.
///
/// Displayed and parsed as the snake_case name (`"scale_both"`), which is
/// also the serde representation.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    /// Use the declared width and height as-is.
    #[default]
    Fixed,
    /// Fill the available width; keep the declared height.
    StretchWidth,
    /// Fill the available height; keep the declared width.
    StretchHeight,
    /// Fill the available space in both dimensions.
    StretchBoth,
    /// Fill the available width and derive height from the aspect ratio.
    ScaleWidth,
    /// Fill the available height and derive width from the aspect ratio.
    ScaleHeight,
    /// Fit inside the available space, preserving the aspect ratio.
    ScaleBoth,
}

impl SizingMode {
    /// Whether the width comes from available space rather than the model.
    #[must_use]
    pub const fn stretches_width(self) -> bool {
        matches!(self, Self::StretchWidth | Self::StretchBoth)
    }

    /// Whether the height comes from available space rather than the model.
    #[must_use]
    pub const fn stretches_height(self) -> bool {
        matches!(self, Self::StretchHeight | Self::StretchBoth)
    }

    /// Whether the size is derived through the aspect ratio.
    #[must_use]
    pub const fn is_scaling(self) -> bool {
        matches!(self, Self::ScaleWidth | Self::ScaleHeight | Self::ScaleBoth)
    }
}

/// How a container places its children inside its own box.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    /// Every child starts at the container's origin.
    #[default]
    Overlay,
    /// Children run left to right in declared order.
    Row,
    /// Children run top to bottom in declared order.
    Column,
}
