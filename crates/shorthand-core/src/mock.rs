//! Mock page implementation for testing.
//!
//! Provides [`MockPage`], an in-memory [`Host`](crate::Host) with flat element
//! records and compound-only selectors (`tag#id.class`, comma lists).

use std::collections::HashMap;

use crate::dom::{Dom, ElementLookup, NodeId, Resources};
use crate::error::{DomError, LoadError};

/// Element record of a [`MockPage`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MockElement {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub visible: bool,
    pub styles: Vec<(String, String)>,
    pub html: String,
    pub parent: Option<NodeId>,
}

impl MockElement {
    /// Inline style value, if set.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }
}

/// Mock page for testing.
///
/// # Example
///
/// ```
/// use shorthand_core::mock::MockPage;
///
/// let page = MockPage::new()
///     .with("ul#menu")
///     .with_child("menu", "li.item")
///     .with_resource("/panel.html", "<p>Loaded</p>");
/// ```
#[derive(Debug, Default)]
pub struct MockPage {
    elements: Vec<MockElement>,
    resources: HashMap<String, String>,
    scripts: Vec<(String, String)>,
    /// Last navigation destination.
    pub location: Option<String>,
    /// URLs fetched, in order.
    pub fetched: Vec<String>,
    pub injected_scripts: Vec<String>,
    pub injected_stylesheets: Vec<String>,
}

impl MockPage {
    /// Create an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level element described as `tag#id.class.class`.
    #[must_use]
    pub fn with(mut self, spec: &str) -> Self {
        self.push(spec, None);
        self
    }

    /// Append a child element under the element with the given id.
    ///
    /// # Panics
    ///
    /// Panics if no element has `parent_id`.
    #[must_use]
    pub fn with_child(mut self, parent_id: &str, spec: &str) -> Self {
        let parent = self.id(parent_id);
        self.push(spec, Some(parent));
        self
    }

    /// Register content returned by [`Resources::fetch`] for `url`.
    #[must_use]
    pub fn with_resource(mut self, url: &str, content: &str) -> Self {
        self.resources.insert(url.to_owned(), content.to_owned());
        self
    }

    /// Add a script block.
    #[must_use]
    pub fn with_script(mut self, content_type: &str, text: &str) -> Self {
        self.scripts.push((content_type.to_owned(), text.to_owned()));
        self
    }

    /// Handle of the element with the given id.
    ///
    /// # Panics
    ///
    /// Panics if no element has that id.
    #[must_use]
    pub fn id(&self, id: &str) -> NodeId {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(NodeId::new)
            .unwrap_or_else(|| panic!("no element with id {id}"))
    }

    /// Element record behind a handle.
    #[must_use]
    pub fn element(&self, node: NodeId) -> &MockElement {
        &self.elements[node.index()]
    }

    fn element_mut(&mut self, node: NodeId) -> &mut MockElement {
        &mut self.elements[node.index()]
    }

    fn push(&mut self, spec: &str, parent: Option<NodeId>) -> NodeId {
        let compound = Compound::parse(spec);
        self.elements.push(MockElement {
            tag: compound.tag.unwrap_or("div").to_owned(),
            id: compound.id.map(str::to_owned),
            classes: compound.classes.iter().map(|&c| c.to_owned()).collect(),
            visible: true,
            parent,
            ..MockElement::default()
        });
        NodeId::new(self.elements.len() - 1)
    }

    fn siblings(&self, node: NodeId) -> Vec<NodeId> {
        let parent = self.element(node).parent;
        (0..self.elements.len())
            .map(NodeId::new)
            .filter(|&n| self.element(n).parent == parent)
            .collect()
    }
}

/// Compound selector: `tag#id.class.class` (each part optional, `*` for any tag).
struct Compound<'a> {
    tag: Option<&'a str>,
    id: Option<&'a str>,
    classes: Vec<&'a str>,
}

impl<'a> Compound<'a> {
    fn parse(spec: &'a str) -> Self {
        let mut compound = Compound {
            tag: None,
            id: None,
            classes: Vec::new(),
        };
        let first = spec.find(['#', '.']).unwrap_or(spec.len());
        let tag = &spec[..first];
        if !tag.is_empty() && tag != "*" {
            compound.tag = Some(tag);
        }

        let mut rest = &spec[first..];
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            match marker {
                '#' => compound.id = Some(&body[..end]),
                _ => compound.classes.push(&body[..end]),
            }
            rest = &body[end..];
        }
        compound
    }

    fn matches(&self, element: &MockElement) -> bool {
        self.tag.is_none_or(|tag| element.tag == tag)
            && self.id.is_none_or(|id| element.id.as_deref() == Some(id))
            && self.classes.iter().all(|c| element.classes.iter().any(|e| e == c))
    }
}

fn matches_selector(element: &MockElement, selector: &str) -> bool {
    selector.split(',').map(str::trim).any(|part| {
        !part.is_empty() && !part.contains(char::is_whitespace) && Compound::parse(part).matches(element)
    })
}

impl ElementLookup for MockPage {
    fn select(&self, selector: &str) -> Vec<NodeId> {
        (0..self.elements.len())
            .map(NodeId::new)
            .filter(|&n| matches_selector(self.element(n), selector))
            .collect()
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        matches_selector(self.element(node), selector)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).parent
    }

    fn next_element(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.siblings(node);
        let pos = siblings.iter().position(|&n| n == node)?;
        siblings.get(pos + 1).copied()
    }

    fn previous_element(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.siblings(node);
        let pos = siblings.iter().position(|&n| n == node)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }
}

impl Dom for MockPage {
    fn is_visible(&self, node: NodeId) -> bool {
        self.element(node).visible
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        self.element_mut(node).visible = visible;
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.element_mut(node).classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.element_mut(node).classes.retain(|c| c != class);
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let styles = &mut self.element_mut(node).styles;
        styles.retain(|(name, _)| name != property);
        styles.push((property.to_owned(), value.to_owned()));
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<(), DomError> {
        html.clone_into(&mut self.element_mut(node).html);
        Ok(())
    }

    fn navigate(&mut self, destination: &str) {
        self.location = Some(destination.to_owned());
    }

    fn script_blocks(&self, content_type: &str) -> Vec<String> {
        self.scripts
            .iter()
            .filter(|(ty, _)| ty == content_type)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

impl Resources for MockPage {
    fn fetch(&mut self, url: &str) -> Result<String, LoadError> {
        self.fetched.push(url.to_owned());
        self.resources
            .get(url)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(url.to_owned()))
    }

    fn inject_script(&mut self, url: &str) {
        self.injected_scripts.push(url.to_owned());
    }

    fn inject_stylesheet(&mut self, url: &str) {
        self.injected_stylesheets.push(url.to_owned());
    }
}
