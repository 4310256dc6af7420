//! The layout pass.
//!
//! A pass always runs from the root of a tree. The root is sized from the
//! space the page grants it and placed at the origin of its container; every
//! descendant is then sized top-down against its parent's freshly styled
//! content box and positioned by the parent's [`Arrangement`].

use trellis_common::{Rect, Size};
use trellis_dom::{InlineStyle, px};
use trellis_model::Arrangement;

use crate::context::LayoutContext;
use crate::error::LayoutError;
use crate::geometry::Quantity;
use crate::sizing::{SizingError, fit_aspect, resolve_size};
use crate::space::available_space;
use crate::tree::LayoutTree;
use crate::view::ViewId;

/// CSS `position` a view's element is styled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// The root: a containing block for its descendants, in normal flow.
    Relative,
    /// Every other view: placed by its parent.
    Absolute,
}

impl Position {
    const fn as_css(self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Absolute => "absolute",
        }
    }
}

impl LayoutTree {
    /// Lay out the tree containing `id`. Non-root views delegate to their
    /// root, so the whole tree is always laid out at once.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownView`], or a sizing failure of any view in the
    /// tree. Views laid out before the failure keep their new geometry.
    pub fn layout(&mut self, id: ViewId, cx: &mut LayoutContext<'_>) -> Result<(), LayoutError> {
        let root = self.root_of(id)?;
        if root != id {
            log::trace!(target: "trellis::layout", "{id} delegates layout to root {root}");
        }
        self.do_layout(root, cx)
    }

    fn do_layout(&mut self, root: ViewId, cx: &mut LayoutContext<'_>) -> Result<(), LayoutError> {
        let view = self.view(root)?;
        let (name, el, model) = (view.name.clone(), view.el, view.model);
        log::debug!(target: "trellis::layout", "layout pass for {name}");

        // STEP 1: Size the root from the space its container grants it.
        let space = available_space(&*cx.host, el, self.options());
        let size = resolve_size(cx.document.model(model)?, space, &name)?;

        // STEP 2: Place it at the origin of its container.
        self.place(root, Rect::new(0.0, 0.0, size.width, size.height), Position::Relative, cx)?;
        #[cfg(feature = "layout-trace")]
        eprintln!("[TRELLIS PASS] depth=0 {name} {}x{}", size.width, size.height);

        // STEP 3: Descendants, top-down.
        self.layout_children(root, cx, 1)?;
        self.after_layout(root, cx)?;

        // STEP 4: Idle check for the whole tree.
        self.notify_finished(root, cx)
    }

    fn layout_children(
        &mut self,
        parent: ViewId,
        cx: &mut LayoutContext<'_>,
        depth: usize,
    ) -> Result<(), LayoutError> {
        let view = self.view(parent)?;
        let children = view.children.clone();
        let arrangement = cx.document.model(view.model)?.arrangement();

        // Room already taken along the main axis by earlier siblings.
        let mut offset = 0.0;
        for child in children {
            let view = self.view(child)?;
            let (name, el, model) = (view.name.clone(), view.el, view.model);

            let space = available_space(&*cx.host, el, self.options()).remaining(arrangement, offset);
            let size = resolve_size(cx.document.model(model)?, space, &name)?;

            let (x, y) = match arrangement {
                Arrangement::Overlay => (0.0, 0.0),
                Arrangement::Row => (offset, 0.0),
                Arrangement::Column => (0.0, offset),
            };
            offset += match arrangement {
                Arrangement::Overlay => 0.0,
                Arrangement::Row => size.width,
                Arrangement::Column => size.height,
            };

            self.place(child, Rect::new(x, y, size.width, size.height), Position::Absolute, cx)?;
            log::trace!(
                target: "trellis::layout",
                "{name} (depth {depth}): {}x{} at ({x}, {y})",
                size.width,
                size.height
            );
            #[cfg(feature = "layout-trace")]
            eprintln!(
                "[TRELLIS PASS] depth={depth} {:indent$}{name} {}x{} at ({x}, {y})",
                "",
                size.width,
                size.height,
                indent = depth * 2
            );

            self.layout_children(child, cx, depth + 1)?;
            self.after_layout(child, cx)?;
        }
        Ok(())
    }

    /// Write `rect` into the view's geometry cells and onto its element.
    fn place(
        &mut self,
        id: ViewId,
        rect: Rect,
        position: Position,
        cx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        self.view_mut(id)?.geometry.set_rect(rect);
        self.update_geometry(id, position, cx)
    }

    /// Style the view's element from its geometry cells.
    fn update_geometry(
        &self,
        id: ViewId,
        position: Position,
        cx: &mut LayoutContext<'_>,
    ) -> Result<(), LayoutError> {
        let view = self.view(id)?;
        let cell = |q: Quantity| Some(px(view.geometry.value(q)));

        cx.host.set_style(
            view.el,
            InlineStyle {
                position: Some(position.as_css().to_string()),
                left: cell(Quantity::Left),
                top: cell(Quantity::Top),
                width: cell(Quantity::Width),
                height: cell(Quantity::Height),
            },
        );
        Ok(())
    }

    /// Mark a freshly laid out view finished, unless its model renders
    /// asynchronously and will call [`LayoutTree::finish_render`] itself.
    fn after_layout(&mut self, id: ViewId, cx: &LayoutContext<'_>) -> Result<(), LayoutError> {
        let deferred = cx.document.model(self.view(id)?.model)?.deferred_render();
        if !deferred {
            self.view_mut(id)?.finished = true;
        }
        Ok(())
    }

    /// The largest size with the view's declared aspect ratio that fits the
    /// space currently available to it.
    ///
    /// # Errors
    ///
    /// [`LayoutError::MissingAspectRatio`] when the model lacks a declared
    /// width or height, [`LayoutError::Detached`] when no space is known.
    pub fn get_width_height(
        &self,
        id: ViewId,
        cx: &LayoutContext<'_>,
    ) -> Result<Size, LayoutError> {
        let view = self.view(id)?;
        let aspect_ratio = cx
            .document
            .model(view.model)?
            .aspect_ratio()
            .ok_or_else(|| LayoutError::sizing(&view.name, SizingError::MissingAspectRatio))?;

        let space = available_space(&*cx.host, view.el, self.options());
        fit_aspect(space, aspect_ratio).map_err(|e| LayoutError::sizing(&view.name, e))
    }
}
