//! Size negotiation: turning available space and a sizing mode into a size.

use thiserror::Error;
use trellis_common::Size;
use trellis_common::warning::warn_once;
use trellis_model::{PanelModel, SizingMode};

use crate::error::LayoutError;
use crate::space::AvailableSpace;

/// Why an aspect fit could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SizingError {
    /// Neither dimension of the available space is known.
    #[error("no available space")]
    Detached,
    /// The aspect ratio is missing or not a positive finite number.
    #[error("no usable aspect ratio")]
    MissingAspectRatio,
}

/// Largest size with aspect ratio `aspect_ratio` (width / height) that fits
/// the known dimensions of `available`.
///
/// With both dimensions known, the width-driven candidate `(w, w / ar)` and
/// the height-driven candidate `(h * ar, h)` are compared and the narrower one
/// wins; on a tie the width-driven candidate is kept.
///
/// # Errors
///
/// [`SizingError::Detached`] when both dimensions are unknown, and
/// [`SizingError::MissingAspectRatio`] when `aspect_ratio` is not positive and
/// finite.
pub fn fit_aspect(available: AvailableSpace, aspect_ratio: f64) -> Result<Size, SizingError> {
    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return Err(SizingError::MissingAspectRatio);
    }

    let by_width = |w: f64| Size::new(w, w / aspect_ratio);
    let by_height = |h: f64| Size::new(h * aspect_ratio, h);

    match (available.width, available.height) {
        (None, None) => Err(SizingError::Detached),
        (Some(w), None) => Ok(by_width(w)),
        (None, Some(h)) => Ok(by_height(h)),
        (Some(w), Some(h)) => {
            let first = by_width(w);
            let second = by_height(h);
            Ok(if first.width <= second.width { first } else { second })
        }
    }
}

/// Size of the view named `view` showing `model`, given the space its
/// ancestors grant it.
///
/// | mode | width | height |
/// |---|---|---|
/// | fixed | declared | declared |
/// | stretch | available, else declared | available, else declared |
/// | scale | aspect fit | aspect fit |
///
/// `scale_width` fits on the available width alone when it is known and on
/// the height otherwise; `scale_height` is the mirror image. A missing
/// declared value on a non-scaling axis resolves to zero with a warning.
///
/// # Errors
///
/// [`LayoutError::Detached`] or [`LayoutError::MissingAspectRatio`] from the
/// aspect fit of a scaling mode.
pub fn resolve_size(
    model: &PanelModel,
    available: AvailableSpace,
    view: &str,
) -> Result<Size, LayoutError> {
    let mode = model.sizing_mode();

    if mode.is_scaling() {
        let aspect_ratio = model
            .aspect_ratio()
            .ok_or_else(|| LayoutError::sizing(view, SizingError::MissingAspectRatio))?;
        let constrained = match mode {
            SizingMode::ScaleWidth => single_axis(available, available.width.is_some()),
            SizingMode::ScaleHeight => single_axis(available, available.height.is_none()),
            _ => available,
        };
        return fit_aspect(constrained, aspect_ratio).map_err(|e| LayoutError::sizing(view, e));
    }

    let width = if mode.stretches_width() {
        available.width.or(model.width())
    } else {
        model.width()
    };
    let height = if mode.stretches_height() {
        available.height.or(model.height())
    } else {
        model.height()
    };

    Ok(Size::new(
        or_zero(width, view, "width", mode),
        or_zero(height, view, "height", mode),
    ))
}

/// Keep only the width (`by_width`) or only the height of `available`.
const fn single_axis(available: AvailableSpace, by_width: bool) -> AvailableSpace {
    if by_width {
        AvailableSpace {
            height: None,
            ..available
        }
    } else {
        AvailableSpace {
            width: None,
            ..available
        }
    }
}

fn or_zero(value: Option<f64>, view: &str, axis: &str, mode: SizingMode) -> f64 {
    value.unwrap_or_else(|| {
        let _ = warn_once(
            "sizing",
            &format!("{view} has no {axis} in {mode} mode, using 0"),
        );
        0.0
    })
}
