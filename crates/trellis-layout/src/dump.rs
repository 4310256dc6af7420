//! Debug listing of laid out geometry.

use std::collections::VecDeque;

use crate::error::LayoutError;
use crate::geometry::LayoutBBox;
use crate::tree::LayoutTree;
use crate::view::ViewId;

impl LayoutTree {
    /// Name and geometry of `id` and every view below it, breadth first.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownView`] if `id` or a registered child is not live.
    pub fn dump_layout(&self, id: ViewId) -> Result<Vec<(String, LayoutBBox)>, LayoutError> {
        let mut rows = Vec::new();
        let mut queue = VecDeque::from([id]);

        while let Some(next) = queue.pop_front() {
            let view = self.view(next)?;
            rows.push((view.name.clone(), view.layout_bbox()));
            queue.extend(view.children.iter().copied());
        }
        Ok(rows)
    }
}
