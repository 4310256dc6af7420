//! Shared fixtures for layout tests.

#![allow(dead_code)]

use trellis_common::Size;
use trellis_dom::DomTree;
use trellis_layout::{LayoutContext, LayoutOptions, LayoutTree, ViewId};
use trellis_model::{Document, ModelId, PanelModel};

/// A document, a page and a view tree, borrowed apart per operation.
pub struct Harness {
    pub doc: Document,
    pub dom: DomTree,
    pub tree: LayoutTree,
}

impl Harness {
    /// Empty document on a page of the given viewport.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            doc: Document::new(),
            dom: DomTree::new(Size::new(width, height)),
            tree: LayoutTree::new(LayoutOptions::default()),
        }
    }

    /// Add a model to the document.
    pub fn add(&mut self, model: PanelModel) -> ModelId {
        self.doc.add(model)
    }

    /// The view tree plus a context over the document and page.
    pub fn parts(&mut self) -> (&mut LayoutTree, LayoutContext<'_>) {
        (&mut self.tree, LayoutContext::new(&self.doc, &mut self.dom))
    }

    /// Mount `model` under `<body>`.
    pub fn mount(&mut self, model: ModelId) -> ViewId {
        let (tree, mut cx) = self.parts();
        tree.mount(model, None, &mut cx).unwrap()
    }

    /// Drain queued triggers.
    pub fn process(&mut self) -> usize {
        let (tree, mut cx) = self.parts();
        tree.process_pending(&mut cx).unwrap()
    }

    /// The view laying out `model`.
    pub fn view_of(&self, model: ModelId) -> ViewId {
        self.tree.view_for_model(model).unwrap()
    }

    /// Models of `view`'s children, in order.
    pub fn child_models(&self, view: ViewId) -> Vec<ModelId> {
        self.tree
            .view(view)
            .unwrap()
            .children()
            .iter()
            .map(|&child| self.tree.view(child).unwrap().model())
            .collect()
    }
}

/// Every ordering of `items`.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut all = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let first = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first.clone());
            all.push(tail);
        }
    }
    all
}
