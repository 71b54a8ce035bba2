//! Collaborator traits for the host page.
//!
//! The engine resolves selectors, walks siblings, mutates elements and loads
//! resources exclusively through these traits. How the host implements them
//! (a native DOM binding, an in-memory tree, a test double) is not the
//! engine's concern.

use crate::error::{DomError, LoadError};

/// Opaque handle to a live element owned by the host document.
///
/// Handles are references into the host, never copies of element state.
/// A handle stays valid for the lifetime of the host even if the element is
/// later detached from the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a handle from an arena index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in 32 bits.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("node index overflow"))
    }

    /// Arena index this handle refers to.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Resolve selectors and traverse elements.
pub trait ElementLookup {
    /// Resolve a selector against the whole document, in document order.
    ///
    /// Invalid selectors resolve to nothing.
    fn select(&self, selector: &str) -> Vec<NodeId>;

    /// Check whether an element matches a selector.
    fn matches(&self, node: NodeId, selector: &str) -> bool;

    /// Parent element, if any.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Immediately following element sibling (text is skipped).
    fn next_element(&self, node: NodeId) -> Option<NodeId>;

    /// Immediately preceding element sibling (text is skipped).
    fn previous_element(&self, node: NodeId) -> Option<NodeId>;

    /// Immediate next sibling, kept only if it matches `filter`.
    ///
    /// The filter narrows the immediate sibling; it does not scan further.
    fn next_sibling(&self, node: NodeId, filter: Option<&str>) -> Option<NodeId> {
        self.next_element(node)
            .filter(|&sibling| filter.is_none_or(|sel| self.matches(sibling, sel)))
    }

    /// Immediate previous sibling, kept only if it matches `filter`.
    fn previous_sibling(&self, node: NodeId, filter: Option<&str>) -> Option<NodeId> {
        self.previous_element(node)
            .filter(|&sibling| filter.is_none_or(|sel| self.matches(sibling, sel)))
    }
}

/// Element mutations and page-level operations used by actions.
pub trait Dom: ElementLookup {
    fn is_visible(&self, node: NodeId) -> bool;

    fn set_visible(&mut self, node: NodeId, visible: bool);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Set an inline style property.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Replace the content of an element with parsed markup.
    fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<(), DomError>;

    /// Navigate the page to a new location.
    fn navigate(&mut self, destination: &str);

    /// Text of every script block with the given content type, in document order.
    fn script_blocks(&self, content_type: &str) -> Vec<String>;
}

/// Resource loading for the `load` action and optional modules.
pub trait Resources {
    /// Fetch the content at `url`.
    fn fetch(&mut self, url: &str) -> Result<String, LoadError>;

    /// Add an external script to the page.
    fn inject_script(&mut self, url: &str);

    /// Add an external stylesheet to the page.
    fn inject_stylesheet(&mut self, url: &str);
}

/// Everything the engine needs from a page.
pub trait Host: Dom + Resources {}

impl<T: Dom + Resources + ?Sized> Host for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPage;

    #[test]
    fn test_node_id_round_trip() {
        assert_eq!(NodeId::new(42).index(), 42);
    }

    #[test]
    fn test_next_sibling_unfiltered() {
        let page = MockPage::new().with("h2#title").with("p#body");
        let title = page.id("title");

        assert_eq!(page.next_sibling(title, None), Some(page.id("body")));
    }

    #[test]
    fn test_next_sibling_filter_does_not_scan_past_immediate_sibling() {
        let page = MockPage::new()
            .with("h2#title")
            .with("div#spacer")
            .with("p#body");
        let title = page.id("title");

        assert_eq!(page.next_sibling(title, Some("p")), None);
        assert_eq!(page.next_sibling(title, Some("div")), Some(page.id("spacer")));
    }

    #[test]
    fn test_previous_sibling_at_start() {
        let page = MockPage::new().with("p#first").with("p#second");

        assert_eq!(page.previous_sibling(page.id("first"), None), None);
        assert_eq!(
            page.previous_sibling(page.id("second"), Some("p")),
            Some(page.id("first"))
        );
    }
}
