//! HTML document tree backed by `scraper`.

use std::collections::HashMap;

use ego_tree::{NodeId as TreeId, NodeRef};
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, QualName, ns};
use scraper::node::Element;
use scraper::{ElementRef, Html, Node, Selector};
use shorthand_core::NodeId;

use crate::attributes::Attributes;

/// A parsed HTML document with stable node handles.
///
/// Parsing follows the HTML standard (`html5ever`): entities are decoded,
/// implied end tags are inserted and `<html>`, `<head>` and `<body>` are
/// always present. Nodes are never freed: replacing content detaches the old
/// children but keeps them addressable, so [`NodeId`]s handed out earlier
/// stay valid.
pub struct Document {
    html: Html,
    /// Tree node for each handle; handle `n` is the `n`th node created.
    nodes: Vec<TreeId>,
    handles: HashMap<TreeId, NodeId>,
}

impl Document {
    /// Parse a complete document.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let mut document = Self {
            html: Html::parse_document(html),
            nodes: Vec::new(),
            handles: HashMap::new(),
        };
        document.register_new_nodes();
        document
    }

    /// The document node. It is not an element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    fn register_new_nodes(&mut self) {
        let fresh: Vec<TreeId> = self
            .html
            .tree
            .nodes()
            .skip(self.nodes.len())
            .map(|node| node.id())
            .collect();
        for id in fresh {
            self.handles.insert(id, NodeId::new(self.nodes.len()));
            self.nodes.push(id);
        }
    }

    fn handle(&self, id: TreeId) -> Option<NodeId> {
        self.handles.get(&id).copied()
    }

    fn tree_id(&self, id: NodeId) -> Option<TreeId> {
        self.nodes.get(id.index()).copied()
    }

    fn node(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.html.tree.get(self.tree_id(id)?)
    }

    /// `id` as an element, if it is one.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.node(id).and_then(ElementRef::wrap)
    }

    /// Tag name of `id`, if it is an element.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.value().name())
    }

    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.value().attr(&name.to_ascii_lowercase())
    }

    /// Editable copy of the attributes of `id`.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> Option<Attributes> {
        self.element(id).map(|element| Attributes::of(element.value()))
    }

    /// Edit the attributes of element `id`. Does nothing for other nodes.
    pub fn update(&mut self, id: NodeId, edit: impl FnOnce(&mut Attributes)) {
        let Some(element) = self.element(id) else {
            return;
        };
        let name = element.value().name.clone();
        let mut attrs = Attributes::of(element.value());
        edit(&mut attrs);

        // Element caches its id and classes, so edits replace the whole value.
        let rebuilt = Element::new(name, to_html5ever(&attrs));
        if let Some(mut node) = self.tree_id(id).and_then(|t| self.html.tree.get_mut(t)) {
            *node.value() = Node::Element(rebuilt);
        }
    }

    /// Elements matching `selector`, in document order.
    #[must_use]
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .filter(|&node| ElementRef::wrap(node).is_some_and(|e| selector.matches(&e)))
            .filter_map(|node| self.handle(node.id()))
            .collect()
    }

    /// Whether element `id` matches `selector`.
    #[must_use]
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.element(id).is_some_and(|e| selector.matches(&e))
    }

    /// Elements below `id`, in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        node.descendants()
            .skip(1)
            .filter(|n| n.value().is_element())
            .filter_map(|n| self.handle(n.id()))
            .collect()
    }

    /// First element with the given tag name, in document order.
    #[must_use]
    pub fn find_tag(&self, tag: &str) -> Option<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .find(|n| {
                n.value()
                    .as_element()
                    .is_some_and(|e| e.name().eq_ignore_ascii_case(tag))
            })
            .and_then(|n| self.handle(n.id()))
    }

    /// Parent element of `id` (the document node is not an element).
    #[must_use]
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?
            .parent()
            .filter(|parent| parent.value().is_element())
            .and_then(|parent| self.handle(parent.id()))
    }

    /// Element children of `id`.
    #[must_use]
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).map_or_else(Vec::new, |node| {
            node.children()
                .filter(|child| child.value().is_element())
                .filter_map(|child| self.handle(child.id()))
                .collect()
        })
    }

    /// Next element sibling of `id`; text and comments are skipped.
    #[must_use]
    pub fn next_element(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?
            .next_siblings()
            .find(|sibling| sibling.value().is_element())
            .and_then(|sibling| self.handle(sibling.id()))
    }

    #[must_use]
    pub fn previous_element(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?
            .prev_siblings()
            .find(|sibling| sibling.value().is_element())
            .and_then(|sibling| self.handle(sibling.id()))
    }

    /// Concatenated text below `id`.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.node(id).map_or_else(String::new, |node| {
            node.descendants()
                .filter_map(|n| n.value().as_text())
                .map(|text| &**text)
                .collect()
        })
    }

    /// Serialized children of element `id`.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        self.element(id)
            .map(|element| element.inner_html())
            .unwrap_or_default()
    }

    /// Serialized element `id`, tag included.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        self.element(id)
            .map(|element| element.html())
            .unwrap_or_default()
    }

    /// Serialize the whole document.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.html.html()
    }

    /// Replace the children of `id` with nodes parsed from `html`.
    ///
    /// The markup is parsed as a fragment in a `<body>` context. The old
    /// children are detached, not freed.
    pub fn replace_children(&mut self, id: NodeId, html: &str) {
        let Some(target) = self.tree_id(id) else {
            return;
        };
        let old: Vec<TreeId> = self
            .html
            .tree
            .get(target)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default();
        for child in old {
            if let Some(mut node) = self.html.tree.get_mut(child) {
                node.detach();
            }
        }
        self.append_html(id, html);
    }

    /// Parse `html` as a fragment and append its nodes to `id`.
    pub fn append_html(&mut self, id: NodeId, html: &str) {
        let Some(target) = self.tree_id(id) else {
            return;
        };
        let fragment = Html::parse_fragment(html);
        let fragment_root = self.html.tree.extend_tree(fragment.tree).id();

        // The fragment's nodes sit under a synthetic `<html>` element.
        let parsed: Vec<TreeId> = self
            .html
            .tree
            .get(fragment_root)
            .and_then(|root| root.children().find(|child| child.value().is_element()))
            .map(|wrapper| wrapper.children().map(|child| child.id()).collect())
            .unwrap_or_default();
        for child in parsed {
            if let Some(mut parent) = self.html.tree.get_mut(target) {
                parent.append_id(child);
            }
        }
        self.register_new_nodes();
    }

    /// Append a new, empty element to `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &Attributes,
    ) -> Option<NodeId> {
        let target = self.tree_id(parent)?;
        let name = QualName::new(None, ns!(html), LocalName::from(tag));
        let element = Element::new(name, to_html5ever(attrs));
        let id = self
            .html
            .tree
            .get_mut(target)?
            .append(Node::Element(element))
            .id();
        self.register_new_nodes();
        self.handle(id)
    }

    /// Whether `id` is still reachable from the document root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let root = self.html.tree.root().id();
        self.node(id)
            .is_some_and(|node| node.id() == root || node.ancestors().any(|a| a.id() == root))
    }
}

fn to_html5ever(attrs: &Attributes) -> Vec<Attribute> {
    attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: StrTendril::from(value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn first(doc: &Document, selector: &str) -> NodeId {
        let selector = Selector::parse(selector).unwrap();
        doc.select(&selector)[0]
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = Document::parse("<div><p>a</p><ul><li>1</li></ul></div><span></span>");
        let body = doc.find_tag("body").unwrap();

        let tags: Vec<&str> = doc
            .descendants(body)
            .into_iter()
            .filter_map(|id| doc.tag(id))
            .collect();

        assert_eq!(tags, vec!["div", "p", "ul", "li", "span"]);
    }

    #[test]
    fn test_element_siblings_skip_text() {
        let doc = Document::parse("<ul>\n  <li id=\"a\">1</li>\n  <li id=\"b\">2</li>\n</ul>");
        let items = doc.element_children(doc.find_tag("ul").unwrap());

        assert_eq!(doc.next_element(items[0]), Some(items[1]));
        assert_eq!(doc.previous_element(items[1]), Some(items[0]));
        assert_eq!(doc.previous_element(items[0]), None);
        assert_eq!(doc.next_element(items[1]), None);
    }

    #[test]
    fn test_implied_end_tags_make_siblings() {
        let doc =
            Document::parse("<ul><li id=q>Q<li id=ans>A</ul><div><p id=p1>1<p id=p2>2</div>");
        let q = first(&doc, "#q");
        let ans = first(&doc, "#ans");
        let p1 = first(&doc, "#p1");
        let p2 = first(&doc, "#p2");

        assert_eq!(doc.next_element(q), Some(ans));
        assert_eq!(doc.parent_element(ans), doc.find_tag("ul"));
        assert_eq!(doc.next_element(p1), Some(p2));
        assert_eq!(doc.text_content(q), "Q");
    }

    #[test]
    fn test_bare_ampersand_and_entities() {
        let doc = Document::parse("<button id=\"a\">Tom & Jerry &amp; &eacute;</button>");
        let a = first(&doc, "#a");

        assert_eq!(doc.text_content(a), "Tom & Jerry & é");
        assert_eq!(doc.attr(a, "ID"), Some("a"));
    }

    #[test]
    fn test_parent_element_stops_at_html() {
        let doc = Document::parse("<div><p>x</p></div>");
        let html = doc.find_tag("html").unwrap();
        let div = doc.find_tag("div").unwrap();
        let p = doc.find_tag("p").unwrap();

        assert_eq!(doc.parent_element(p), Some(div));
        assert_eq!(doc.parent_element(html), None);
        assert_eq!(doc.parent_element(doc.root()), None);
    }

    #[test]
    fn test_update_rebuilds_element_for_selectors() {
        let mut doc = Document::parse("<p id=\"a\" class=\"tip\">x</p>");
        let a = first(&doc, "#a");
        let active = Selector::parse(".active").unwrap();
        assert!(!doc.matches(a, &active));

        doc.update(a, |attrs| {
            attrs.add_class("active");
            attrs.set_style("display", "none");
        });

        assert!(doc.matches(a, &active));
        assert_eq!(doc.select(&active), vec![a]);
        assert_eq!(
            doc.outer_html(a),
            r#"<p class="tip active" id="a" style="display: none;">x</p>"#
        );
    }

    #[test]
    fn test_replace_children_detaches_old_nodes() {
        let mut doc = Document::parse("<div id=\"panel\"><p>old</p></div>");
        let panel = doc.find_tag("div").unwrap();
        let old = doc.find_tag("p").unwrap();

        doc.replace_children(panel, "<p>new & <b>bold</b><p>more");

        assert!(!doc.is_attached(old));
        assert!(doc.is_attached(panel));
        assert_eq!(doc.text_content(panel), "new & boldmore");
        assert_eq!(doc.element_children(panel).len(), 2);
        assert_eq!(doc.tag(old), Some("p"));
        assert_eq!(doc.inner_html(panel), "<p>new &amp; <b>bold</b></p><p>more</p>");
        assert!(!doc.select(&Selector::parse("p").unwrap()).contains(&old));
    }

    #[test]
    fn test_unquoted_attributes() {
        let doc = Document::parse("<input id=name type=text value=Ada disabled>");
        let input = first(&doc, "#name");

        assert_eq!(doc.attr(input, "type"), Some("text"));
        assert_eq!(doc.attr(input, "value"), Some("Ada"));
        assert_eq!(doc.attr(input, "disabled"), Some(""));
    }

    #[test]
    fn test_text_content() {
        let doc = Document::parse("<p>Hello <b>bold</b> world</p>");

        assert_eq!(doc.text_content(doc.root()), "Hello bold world");
    }
}
