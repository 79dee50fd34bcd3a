/// Cached handles to the Web APIs used while materializing output trees.
///
/// Looking up `window.document` for every node of a large tree is wasteful, so
/// the document is fetched once and threaded through
/// [`VirtualNode::to_node`](crate::tree::VirtualNode::to_node).
#[derive(Clone)]
pub struct WebContext {
    /// The window.document cache
    pub document: web_sys::Document,
}

impl WebContext {
    /// Creates a new [`WebContext`] wrapping the provided
    /// [`web_sys::Document`].
    #[must_use]
    pub const fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// Builds a context from the global `window`, or `None` outside a
    /// browser.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document))
    }
}
