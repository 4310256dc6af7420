//! The view arena: construction, child management, teardown and the trigger
//! queue.
//!
//! A [`LayoutTree`] owns every view it builds. Views refer to each other by
//! [`ViewId`] and to their models by [`ModelId`]; the document and the host
//! page are borrowed per call through a [`LayoutContext`].
//!
//! # Triggers
//!
//! Views subscribe to the document's change events and roots to the host's
//! resize event. Signal handlers never touch the tree directly. They push a
//! [`Trigger`] onto a shared queue that [`LayoutTree::process_pending`]
//! drains, one synchronous pass per trigger.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use trellis_common::Size;
use trellis_dom::ElementId;
use trellis_model::ModelId;

use crate::context::LayoutContext;
use crate::error::LayoutError;
use crate::geometry::Variable;
use crate::options::LayoutOptions;
use crate::view::{LayoutView, ViewId};

/// Deferred work queued by an event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Run a layout pass for the tree containing this view.
    Layout(ViewId),
    /// Rebuild this view's children, then lay out.
    Rebuild(ViewId),
}

type TriggerQueue = Rc<RefCell<VecDeque<Trigger>>>;

fn enqueue(queue: &TriggerQueue, trigger: Trigger) {
    let mut queue = queue.borrow_mut();
    if !queue.contains(&trigger) {
        queue.push_back(trigger);
    }
}

/// Arena of layout views, possibly holding several independent roots.
///
/// Slots are never reused: a removed view leaves an empty slot and every
/// view built later gets a fresh [`ViewId`], so a stale id can never name a
/// different view. The arena therefore grows with every view ever built,
/// and [`len`](Self::len), [`roots`](Self::roots) and
/// [`view_for_model`](Self::view_for_model) scan all of it.
#[derive(Debug, Default)]
pub struct LayoutTree {
    /// Indexed by `ViewId`. Removed views leave `None` behind.
    views: Vec<Option<LayoutView>>,
    options: LayoutOptions,
    pending: TriggerQueue,
}

impl LayoutTree {
    /// An empty tree.
    #[must_use]
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            views: Vec::new(),
            options,
            pending: Rc::default(),
        }
    }

    /// The options views are built with.
    #[must_use]
    pub const fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// A live view.
    #[must_use]
    pub fn get(&self, id: ViewId) -> Option<&LayoutView> {
        self.views.get(id.0).and_then(Option::as_ref)
    }

    /// A live view.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownView`] if `id` was removed or never built.
    pub fn view(&self, id: ViewId) -> Result<&LayoutView, LayoutError> {
        self.get(id).ok_or(LayoutError::UnknownView(id))
    }

    pub(crate) fn view_mut(&mut self, id: ViewId) -> Result<&mut LayoutView, LayoutError> {
        self.views
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(LayoutError::UnknownView(id))
    }

    /// Number of live views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.iter().flatten().count()
    }

    /// Whether no view is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live root views, in mount order.
    pub fn roots(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views
            .iter()
            .flatten()
            .filter(|view| view.is_root())
            .map(LayoutView::id)
    }

    /// The live view laying out `model`, if any.
    #[must_use]
    pub fn view_for_model(&self, model: ModelId) -> Option<ViewId> {
        self.views
            .iter()
            .flatten()
            .find(|view| view.model == model)
            .map(LayoutView::id)
    }

    /// Walk parent links up to the root of `id`'s tree.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownView`] if `id` is not live.
    pub fn root_of(&self, id: ViewId) -> Result<ViewId, LayoutError> {
        let mut current = self.view(id)?;
        while let Some(parent) = current.parent {
            current = self.view(parent)?;
        }
        Ok(current.id)
    }

    /// Every geometry cell of every live view, one flat set for a solver.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> + '_ {
        self.views
            .iter()
            .flatten()
            .flat_map(|view| view.geometry.variables())
    }

    /// Number of queued triggers.
    #[must_use]
    pub fn pending_triggers(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Build the view tree for `model`, attach it under `container` (the
    /// page body when `None`), subscribe the root to viewport resizes and
    /// run the initial layout pass.
    ///
    /// # Errors
    ///
    /// Any construction or layout failure. The partially built tree is torn
    /// down before the error is returned.
    pub fn mount(
        &mut self,
        model: ModelId,
        container: Option<ElementId>,
        cx: &mut LayoutContext<'_>,
    ) -> Result<ViewId, LayoutError> {
        let root = self.build_view(model, None, cx)?;
        let (name, el) = {
            let view = self.view(root)?;
            (view.name.clone(), view.el)
        };

        let container = container.unwrap_or_else(|| cx.host.body());
        cx.host.append_child(container, el);

        let queue = Rc::clone(&self.pending);
        let connection = cx
            .host
            .on_resize(Box::new(move |_: &Size| enqueue(&queue, Trigger::Layout(root))));
        self.view_mut(root)?.resize = Some(connection);

        log::debug!(target: "trellis::layout", "mounted {name} as root {root}");

        if let Err(error) = self.layout(root, cx) {
            self.remove(root, cx);
            return Err(error);
        }
        Ok(root)
    }

    /// Construct the view for `model` and, recursively, its children.
    ///
    /// The new view's element is created detached; the caller appends it.
    pub(crate) fn build_view(
        &mut self,
        model_id: ModelId,
        parent: Option<ViewId>,
        cx: &mut LayoutContext<'_>,
    ) -> Result<ViewId, LayoutError> {
        let model = cx.document.model(model_id)?;
        let el = cx.host.create_element(&self.options.element_tag);
        let id = ViewId(self.views.len());
        let mut view = LayoutView::new(id, model_id, model.kind(), el, parent);

        let queue = Rc::clone(&self.pending);
        view.subscriptions
            .push(cx.document.on_sizing_mode_change(move |event| {
                if event.model == model_id {
                    enqueue(&queue, Trigger::Layout(id));
                }
            }));
        let queue = Rc::clone(&self.pending);
        view.subscriptions
            .push(cx.document.on_children_change(move |event| {
                if event.model == model_id {
                    enqueue(&queue, Trigger::Rebuild(id));
                }
            }));

        log::debug!(target: "trellis::layout", "built {} {id}", view.name);
        self.views.push(Some(view));

        let rendered = self.render(id, cx);
        let built = rendered.and_then(|()| self.build_child_views(id, cx));
        if let Err(error) = built {
            self.remove(id, cx);
            return Err(error);
        }
        Ok(id)
    }

    /// Bring `id`'s child views in line with its model's declared children.
    ///
    /// Existing child views whose model is still declared are kept (same
    /// [`ViewId`]), missing ones are built, and views whose model is no
    /// longer declared are torn down. The element's children are then
    /// replaced by the child elements in declared order and every child is
    /// re-rendered.
    ///
    /// # Errors
    ///
    /// [`LayoutError::MissingChildView`] if a declared child is not in the
    /// document, [`LayoutError::DuplicateChild`] if one is declared twice,
    /// [`LayoutError::CyclicChild`] if one is `id`'s own model or an
    /// ancestor's, and [`LayoutError::SharedChild`] if one already has a view
    /// under another parent of the same tree. All are detected before
    /// anything changes.
    pub fn build_child_views(
        &mut self,
        id: ViewId,
        cx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        let view = self.view(id)?;
        let (name, el) = (view.name.clone(), view.el);
        let declared = cx.document.model(view.model)?.layoutable_children().to_vec();

        let lineage = self.lineage_models(id)?;
        let root = self.root_of(id)?;
        let mut seen = HashSet::new();
        for &child in &declared {
            if cx.document.get(child).is_none() {
                return Err(LayoutError::MissingChildView {
                    parent: name,
                    child,
                });
            }
            if !seen.insert(child) {
                return Err(LayoutError::DuplicateChild {
                    parent: name,
                    child,
                });
            }
            if lineage.contains(&child) {
                return Err(LayoutError::CyclicChild {
                    parent: name,
                    child,
                });
            }
            if let Some(owner) = self.owner_elsewhere(child, id, root) {
                return Err(LayoutError::SharedChild {
                    parent: name,
                    child,
                    owner: owner.name.clone(),
                });
            }
        }

        let mut existing: HashMap<ModelId, ViewId> = view
            .children
            .iter()
            .filter_map(|&child| self.get(child).map(|v| (v.model, child)))
            .collect();

        let mut children = Vec::with_capacity(declared.len());
        let mut created = Vec::new();
        for &model in &declared {
            if let Some(child) = existing.remove(&model) {
                children.push(child);
                continue;
            }
            match self.build_view(model, Some(id), cx) {
                Ok(child) => {
                    created.push(child);
                    children.push(child);
                }
                Err(error) => {
                    for child in created {
                        self.remove(child, cx);
                    }
                    return Err(error);
                }
            }
        }

        for stale in existing.into_values() {
            self.remove(stale, cx);
        }

        cx.host.empty(el);
        for &child in &children {
            let child_el = self.view(child)?.el;
            cx.host.append_child(el, child_el);
        }
        self.view_mut(id)?.children.clone_from(&children);

        for &child in &children {
            self.render(child, cx)?;
        }

        log::debug!(
            target: "trellis::layout",
            "{name}: {} child views ({} new)",
            children.len(),
            created.len()
        );
        Ok(())
    }

    /// Models of `id` and every ancestor of it.
    fn lineage_models(&self, id: ViewId) -> Result<HashSet<ModelId>, LayoutError> {
        let mut models = HashSet::new();
        let mut current = Some(id);
        while let Some(next) = current {
            let view = self.view(next)?;
            let _ = models.insert(view.model);
            current = view.parent;
        }
        Ok(models)
    }

    /// A live view of `model` in `root`'s tree that is not a child of
    /// `parent`.
    fn owner_elsewhere(
        &self,
        model: ModelId,
        parent: ViewId,
        root: ViewId,
    ) -> Option<&LayoutView> {
        self.views.iter().flatten().find(|view| {
            view.model == model
                && view.parent != Some(parent)
                && self.root_of(view.id).is_ok_and(|r| r == root)
        })
    }

    /// Rebuild `id`'s children, then lay out its tree.
    ///
    /// # Errors
    ///
    /// See [`LayoutTree::build_child_views`] and [`LayoutTree::layout`].
    pub fn rebuild_child_views(
        &mut self,
        id: ViewId,
        cx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        self.build_child_views(id, cx)?;
        self.layout(id, cx)
    }

    /// Tear down `id` and its whole subtree.
    ///
    /// Children go first. Each view then drops its subscriptions (and, for a
    /// root, its resize listener), detaches its element and frees its slot.
    /// Removing a view that is already gone does nothing.
    pub fn remove(&mut self, id: ViewId, cx: &mut LayoutContext<'_>) {
        let Ok(view) = self.view_mut(id) else {
            return;
        };
        let children = std::mem::take(&mut view.children);
        for child in children {
            self.remove(child, cx);
        }

        let Some(view) = self.views.get_mut(id.0).and_then(Option::take) else {
            return;
        };
        if let Some(parent) = view.parent.and_then(|p| self.views.get_mut(p.0)?.as_mut()) {
            parent.children.retain(|&child| child != id);
        }
        cx.host.remove_element(view.el);

        log::debug!(target: "trellis::layout", "removed {} {id}", view.name);
    }

    /// Reset `id`'s element classes from its model.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownView`] or a model lookup failure.
    pub fn render(&self, id: ViewId, cx: &mut LayoutContext<'_>) -> Result<(), LayoutError> {
        let view = self.view(id)?;
        let model = cx.document.model(view.model)?;

        let mut classes = vec![self.options.layout_class()];
        if model.disabled() {
            classes.push(self.options.disabled_class());
        }
        classes.extend(model.css_classes().iter().cloned());

        cx.host.set_class_list(view.el, classes);
        Ok(())
    }

    /// Run every queued trigger, in order, including triggers queued while
    /// draining. Triggers for views removed in the meantime are skipped.
    ///
    /// Returns the number of triggers executed.
    ///
    /// # Errors
    ///
    /// The first failing pass. Triggers behind it stay queued.
    pub fn process_pending(&mut self, cx: &mut LayoutContext<'_>) -> Result<usize, LayoutError> {
        let mut executed = 0;
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(trigger) = next else {
                return Ok(executed);
            };

            match trigger {
                Trigger::Layout(id) | Trigger::Rebuild(id) if self.get(id).is_none() => {
                    log::debug!(target: "trellis::layout", "skipping {trigger:?}: view is gone");
                    continue;
                }
                Trigger::Layout(id) => self.layout(id, cx)?,
                Trigger::Rebuild(id) => self.rebuild_child_views(id, cx)?,
            }
            executed += 1;
        }
    }
}
