//! Borrowed state a layout operation works against.

use trellis_model::Document;

use crate::host::RenderHost;

/// The document the views read their models from, and the host page their
/// elements live in.
///
/// Both are borrowed for the duration of one operation only, so the host is
/// free to mutate the document between passes.
pub struct LayoutContext<'a> {
    /// Model source.
    pub document: &'a Document,
    /// Element tree and measurements.
    pub host: &'a mut dyn RenderHost,
}

impl<'a> LayoutContext<'a> {
    /// Bundle a document and a host.
    #[must_use]
    pub const fn new(document: &'a Document, host: &'a mut dyn RenderHost) -> Self {
        Self { document, host }
    }
}
