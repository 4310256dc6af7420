//! Available-space probing against the host page.

use trellis_dom::ElementId;
use trellis_model::Arrangement;

use crate::host::RenderHost;
use crate::options::LayoutOptions;

/// Space a view may occupy. `None` means unknown in that dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AvailableSpace {
    /// Usable width, always positive when known.
    pub width: Option<f64>,
    /// Usable height, always positive when known.
    pub height: Option<f64>,
}

impl AvailableSpace {
    /// Nothing is known: the element is detached.
    pub const UNKNOWN: Self = Self {
        width: None,
        height: None,
    };

    /// Build from raw extents, treating non-positive ones as unknown.
    #[must_use]
    pub fn from_extents(width: f64, height: f64) -> Self {
        let positive = |v: f64| (v > 0.0).then_some(v);
        Self {
            width: positive(width),
            height: positive(height),
        }
    }

    /// Whether neither dimension is known.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }

    /// What is left after `consumed` pixels went to earlier siblings along
    /// the arrangement's main axis.
    #[must_use]
    pub fn remaining(self, arrangement: Arrangement, consumed: f64) -> Self {
        let shrink = |v: Option<f64>| v.map(|v| v - consumed).filter(|v| *v > 0.0);
        match arrangement {
            Arrangement::Overlay => self,
            Arrangement::Row => Self {
                width: shrink(self.width),
                ..self
            },
            Arrangement::Column => Self {
                height: shrink(self.height),
                ..self
            },
        }
    }
}

/// Find the space the page grants `element`.
///
/// Walks up the parent chain, skipping wrapper elements that carry
/// `options.wrapper_class`:
///
/// 1. Reaching `<body>` yields the viewport's client size minus the body's
///    margins.
/// 2. Otherwise the first ancestor whose content box (border box minus
///    padding) has a positive width or height yields that content box.
/// 3. Running out of ancestors means the element is detached:
///    [`AvailableSpace::UNKNOWN`].
#[must_use]
pub fn available_space(
    host: &dyn RenderHost,
    element: ElementId,
    options: &LayoutOptions,
) -> AvailableSpace {
    let mut measuring = element;

    while let Some(parent) = host.parent_element(measuring) {
        measuring = parent;

        if host.has_class(measuring, &options.wrapper_class) {
            continue;
        }

        if measuring == host.body() {
            let margin = host.margin(measuring);
            let client = host.client_size();
            return AvailableSpace::from_extents(
                client.width - margin.horizontal(),
                client.height - margin.vertical(),
            );
        }

        let interior = host
            .bounding_client_rect(measuring)
            .inset(&host.padding(measuring));
        if interior.width > 0.0 || interior.height > 0.0 {
            return AvailableSpace::from_extents(interior.width, interior.height);
        }
    }

    AvailableSpace::UNKNOWN
}
