//! The hosting document: model arena, change events and the idle channel.

use thiserror::Error;
use trellis_common::{Connection, Signal};

use crate::decl::PanelDecl;
use crate::panel::{ModelId, PanelModel};
use crate::sizing::SizingMode;

/// Errors raised by document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// No model with this id was ever added to the document.
    #[error("unknown model {0}")]
    UnknownModel(ModelId),
}

/// A model's sizing mode changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingModeChanged {
    /// The model whose mode changed.
    pub model: ModelId,
    /// Mode before the change.
    pub old: SizingMode,
    /// Mode after the change.
    pub new: SizingMode,
}

/// A model's declared children were replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildrenChanged {
    /// The model whose children changed.
    pub model: ModelId,
}

/// Owner of every panel model in one page, and the event bus views listen on.
#[derive(Debug, Default)]
pub struct Document {
    /// Indexed by `ModelId`.
    models: Vec<PanelModel>,
    roots: Vec<ModelId>,
    sizing_mode_changed: Signal<SizingModeChanged>,
    children_changed: Signal<ChildrenChanged>,
    idle: Signal<ModelId>,
}

impl Document {
    /// An empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `model` and assign its id.
    pub fn add(&mut self, mut model: PanelModel) -> ModelId {
        let id = ModelId(self.models.len() as u64);
        model.id = id;
        self.models.push(model);
        id
    }

    /// Realize a nested declaration into models, children first. Returns the
    /// id of the top-level panel.
    pub fn insert_tree(&mut self, decl: &PanelDecl) -> ModelId {
        let children = decl
            .children
            .iter()
            .map(|child| self.insert_tree(child))
            .collect();
        self.add(decl.to_model().with_children(children))
    }

    /// Register `id` as the top of a panel tree.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownModel`] if `id` is not in the document.
    pub fn add_root(&mut self, id: ModelId) -> Result<(), ModelError> {
        let _ = self.model(id)?;
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
        Ok(())
    }

    /// Registered roots, in registration order.
    #[must_use]
    pub fn roots(&self) -> &[ModelId] {
        &self.roots
    }

    /// Get a model by id.
    #[must_use]
    pub fn get(&self, id: ModelId) -> Option<&PanelModel> {
        usize::try_from(id.0).ok().and_then(|i| self.models.get(i))
    }

    /// Get a model by id, as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownModel`] if `id` is not in the document.
    pub fn model(&self, id: ModelId) -> Result<&PanelModel, ModelError> {
        self.get(id).ok_or(ModelError::UnknownModel(id))
    }

    fn model_mut(&mut self, id: ModelId) -> Result<&mut PanelModel, ModelError> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.models.get_mut(i))
            .ok_or(ModelError::UnknownModel(id))
    }

    /// Number of models in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the document holds no models.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Change a model's sizing mode. Emits [`SizingModeChanged`] and returns
    /// `true` only if the mode actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownModel`] if `id` is not in the document.
    pub fn set_sizing_mode(&mut self, id: ModelId, mode: SizingMode) -> Result<bool, ModelError> {
        let model = self.model_mut(id)?;
        let old = model.sizing_mode;
        if old == mode {
            return Ok(false);
        }
        model.sizing_mode = mode;
        log::debug!(target: "trellis::model", "model {id}: sizing mode {old} -> {mode}");
        self.sizing_mode_changed.emit(&SizingModeChanged {
            model: id,
            old,
            new: mode,
        });
        Ok(true)
    }

    /// Replace a model's declared children. Emits [`ChildrenChanged`] and
    /// returns `true` only if the list actually changed.
    ///
    /// Children are not checked against the document here; a dangling child
    /// surfaces when a view tries to build it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownModel`] if `id` is not in the document.
    pub fn set_children(&mut self, id: ModelId, children: Vec<ModelId>) -> Result<bool, ModelError> {
        let model = self.model_mut(id)?;
        if model.children == children {
            return Ok(false);
        }
        model.children = children;
        self.children_changed.emit(&ChildrenChanged { model: id });
        Ok(true)
    }

    /// Change a model's declared size. Takes effect on the next layout pass.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownModel`] if `id` is not in the document.
    pub fn set_size(
        &mut self,
        id: ModelId,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<(), ModelError> {
        let model = self.model_mut(id)?;
        model.width = width;
        model.height = height;
        Ok(())
    }

    /// Observe sizing mode changes of every model.
    pub fn on_sizing_mode_change(
        &self,
        handler: impl FnMut(&SizingModeChanged) + 'static,
    ) -> Connection {
        self.sizing_mode_changed.connect(handler)
    }

    /// Observe child list changes of every model.
    pub fn on_children_change(&self, handler: impl FnMut(&ChildrenChanged) + 'static) -> Connection {
        self.children_changed.connect(handler)
    }

    /// Observe idle notifications. The payload is the root model of the tree
    /// that went idle.
    pub fn on_idle(&self, handler: impl FnMut(&ModelId) + 'static) -> Connection {
        self.idle.connect(handler)
    }

    /// Receive an idle notification for the tree rooted at `root`.
    pub fn notify_idle(&self, root: ModelId) {
        log::info!(target: "trellis::model", "document idle: root model {root}");
        self.idle.emit(&root);
    }
}
