//! Layout error types.

use thiserror::Error;
use trellis_model::{ModelError, ModelId};

use crate::sizing::SizingError;
use crate::view::ViewId;

/// Errors raised while building or laying out a view tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// No available space in either dimension where a fit was needed.
    #[error("{view}: no available space, element is detached")]
    Detached {
        /// Name of the view being sized.
        view: String,
    },

    /// Aspect fit requested for a model without both declared dimensions.
    #[error("{view}: aspect fit needs a declared width and height")]
    MissingAspectRatio {
        /// Name of the view being sized.
        view: String,
    },

    /// A declared child model is not in the document.
    #[error("{parent}: declared child model {child} has no view")]
    MissingChildView {
        /// Name of the parent view.
        parent: String,
        /// The model that could not be resolved.
        child: ModelId,
    },

    /// A child model is declared more than once by the same parent.
    #[error("{parent}: child model {child} declared twice")]
    DuplicateChild {
        /// Name of the parent view.
        parent: String,
        /// The repeated model.
        child: ModelId,
    },

    /// A child model is also the parent or one of its ancestors.
    #[error("{parent}: child model {child} is its own ancestor")]
    CyclicChild {
        /// Name of the parent view.
        parent: String,
        /// The model that closes the cycle.
        child: ModelId,
    },

    /// A child model already has a view under another parent in the same
    /// tree.
    #[error("{parent}: child model {child} is already laid out by {owner}")]
    SharedChild {
        /// Name of the parent view.
        parent: String,
        /// The shared model.
        child: ModelId,
        /// Name of the view already showing it.
        owner: String,
    },

    /// The view was removed or never existed.
    #[error("unknown view {0}")]
    UnknownView(ViewId),

    /// The model layer rejected a lookup.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl LayoutError {
    /// Attach the view name to a negotiator failure.
    #[must_use]
    pub fn sizing(view: &str, error: SizingError) -> Self {
        let view = view.to_string();
        match error {
            SizingError::Detached => Self::Detached { view },
            SizingError::MissingAspectRatio => Self::MissingAspectRatio { view },
        }
    }

    /// Whether the failure only means the view is not attached to a sized
    /// ancestor yet.
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        matches!(self, Self::Detached { .. })
    }
}
