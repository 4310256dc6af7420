//! Subtree completion and the one-shot idle notification.

use crate::context::LayoutContext;
use crate::error::LayoutError;
use crate::tree::LayoutTree;
use crate::view::ViewId;

impl LayoutTree {
    /// Whether `id` and every view below it finished rendering.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownView`] if `id` or a registered child is not live.
    pub fn has_finished(&self, id: ViewId) -> Result<bool, LayoutError> {
        let view = self.view(id)?;
        if !view.finished {
            return Ok(false);
        }
        for &child in &view.children {
            if !self.has_finished(child)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Tell the document the tree containing `id` is idle, the first time
    /// the whole tree has finished. Non-root views delegate to their root;
    /// later calls after the notification are no-ops.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownView`] if `id` is not live.
    pub fn notify_finished(&mut self, id: ViewId, cx: &LayoutContext<'_>) -> Result<(), LayoutError> {
        let root = self.root_of(id)?;
        if self.view(root)?.idle_notified || !self.has_finished(root)? {
            return Ok(());
        }

        let view = self.view_mut(root)?;
        view.idle_notified = true;
        let model = view.model;
        log::debug!(target: "trellis::layout", "{} finished, notifying idle", view.name);
        cx.document.notify_idle(model);
        Ok(())
    }

    /// Complete the deferred render of `id` and re-check the idle state.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownView`] if `id` is not live.
    pub fn finish_render(&mut self, id: ViewId, cx: &LayoutContext<'_>) -> Result<(), LayoutError> {
        self.set_finished(id, true)?;
        self.notify_finished(id, cx)
    }

    /// Set `id`'s own finished flag.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownView`] if `id` is not live.
    pub fn set_finished(&mut self, id: ViewId, finished: bool) -> Result<(), LayoutError> {
        self.view_mut(id)?.finished = finished;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use trellis_common::Size;
    use trellis_dom::DomTree;
    use trellis_model::{Document, PanelModel};

    use super::*;
    use crate::options::LayoutOptions;

    #[test]
    fn test_idle_waits_for_every_child() {
        let mut doc = Document::new();
        let a = doc.add(PanelModel::new("A").with_size(10.0, 10.0));
        let b = doc.add(PanelModel::new("B").with_size(10.0, 10.0).with_deferred_render(true));
        let root = doc.add(PanelModel::new("Row").with_children(vec![a, b]));
        let mut dom = DomTree::new(Size::new(800.0, 600.0));

        let idle = Rc::new(Cell::new(0));
        let sink = Rc::clone(&idle);
        let _connection = doc.on_idle(move |_| sink.set(sink.get() + 1));

        let mut tree = LayoutTree::new(LayoutOptions::default());
        let mut cx = LayoutContext::new(&doc, &mut dom);
        let root_view = tree.mount(root, None, &mut cx).unwrap();
        let deferred = tree.view_for_model(b).unwrap();

        assert!(!tree.has_finished(root_view).unwrap());
        assert_eq!(idle.get(), 0);

        tree.finish_render(deferred, &cx).unwrap();
        assert!(tree.has_finished(root_view).unwrap());
        assert_eq!(idle.get(), 1);

        tree.notify_finished(deferred, &cx).unwrap();
        assert_eq!(idle.get(), 1);
    }
}
