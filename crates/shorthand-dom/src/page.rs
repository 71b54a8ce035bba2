//! [`Page`]: a parsed document acting as the engine's host.

use scraper::Selector;
use shorthand_core::{Dom, DomError, ElementLookup, LoadError, NodeId, Resources};
use tracing::debug;

use crate::attributes::Attributes;
use crate::document::Document;
use crate::loader::{Loader, MemoryLoader};

/// An in-memory page with a resource loader.
///
/// Visibility is the inline `display` style: hiding sets `display: none`,
/// showing removes the property and any `hidden` attribute. Navigation only
/// records the destination.
pub struct Page {
    document: Document,
    loader: Box<dyn Loader>,
    location: Option<String>,
}

impl Page {
    /// Wrap a document. Loads fail with "not found" until a loader is set.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            loader: Box::new(MemoryLoader::new()),
            location: None,
        }
    }

    /// Parse markup into a page. Malformed markup is recovered, never rejected.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self::new(Document::parse(html))
    }

    /// Use `loader` for `load` actions.
    #[must_use]
    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Destination of the last navigation, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// First element matching `selector`.
    pub fn first(&self, selector: &str) -> Option<NodeId> {
        self.select(selector).into_iter().next()
    }

    /// Serialize the current state of the page.
    pub fn to_html(&self) -> String {
        self.document.to_html()
    }

    /// Append a new element to `<head>`, or to the document if it has none.
    fn append_to_head(&mut self, tag: &str, attrs: &Attributes) {
        let parent = self
            .document
            .find_tag("head")
            .unwrap_or_else(|| self.document.root());
        self.document.append_element(parent, tag, attrs);
    }
}

impl ElementLookup for Page {
    /// Invalid selectors match nothing.
    fn select(&self, selector: &str) -> Vec<NodeId> {
        Selector::parse(selector)
            .map(|s| self.document.select(&s))
            .unwrap_or_default()
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        Selector::parse(selector).is_ok_and(|s| self.document.matches(node, &s))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.document.parent_element(node)
    }

    fn next_element(&self, node: NodeId) -> Option<NodeId> {
        self.document.next_element(node)
    }

    fn previous_element(&self, node: NodeId) -> Option<NodeId> {
        self.document.previous_element(node)
    }
}

impl Dom for Page {
    fn is_visible(&self, node: NodeId) -> bool {
        self.document.attributes(node).is_some_and(|attrs| {
            attrs.get("hidden").is_none()
                && attrs
                    .style("display")
                    .is_none_or(|display| !display.eq_ignore_ascii_case("none"))
        })
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        self.document.update(node, |attrs| {
            if visible {
                attrs.remove_style("display");
                attrs.remove("hidden");
            } else {
                attrs.set_style("display", "none");
            }
        });
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.document
            .attributes(node)
            .is_some_and(|attrs| attrs.has_class(class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        self.document.update(node, |attrs| attrs.add_class(class));
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.document.update(node, |attrs| attrs.remove_class(class));
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.document
            .update(node, |attrs| attrs.set_style(property, value));
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) -> Result<(), DomError> {
        if self.document.element(node).is_none() {
            return Err(DomError::NotAnElement(node.index()));
        }
        self.document.replace_children(node, html);
        Ok(())
    }

    fn navigate(&mut self, destination: &str) {
        self.location = Some(destination.to_owned());
    }

    fn script_blocks(&self, content_type: &str) -> Vec<String> {
        self.select("script")
            .into_iter()
            .filter(|&id| {
                self.document
                    .attr(id, "type")
                    .is_some_and(|ty| ty.trim().eq_ignore_ascii_case(content_type))
            })
            .map(|id| self.document.text_content(id))
            .collect()
    }
}

impl Resources for Page {
    fn fetch(&mut self, url: &str) -> Result<String, LoadError> {
        self.loader.load(url)
    }

    fn inject_script(&mut self, url: &str) {
        debug!(url, "injecting script");
        let mut attrs = Attributes::default();
        attrs.set("src", url);
        self.append_to_head("script", &attrs);
    }

    fn inject_stylesheet(&mut self, url: &str) {
        debug!(url, "injecting stylesheet");
        let mut attrs = Attributes::default();
        attrs.set("rel", "stylesheet");
        attrs.set("href", url);
        self.append_to_head("link", &attrs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HTML: &str = r#"<html><head><title>Demo</title></head><body>
<button id="go" class="btn">Go</button>
<div id="panel" hidden="">Old</div>
<script type="text/ShortHand">
#go should show #panel on click
</script>
<script type="text/javascript">var x = 1;</script>
<script type="TEXT/SHORTHAND">#go should hide self on load</script>
</body></html>"#;

    fn page() -> Page {
        Page::parse(HTML)
    }

    #[test]
    fn test_visibility() {
        let mut page = page();
        let go = page.first("#go").unwrap();
        let panel = page.first("#panel").unwrap();

        assert!(page.is_visible(go));
        assert!(!page.is_visible(panel));

        page.set_visible(panel, true);
        page.set_visible(go, false);

        assert!(page.is_visible(panel));
        assert!(!page.is_visible(go));
        assert_eq!(
            page.document().outer_html(go),
            r#"<button class="btn" id="go" style="display: none;">Go</button>"#
        );
    }

    #[test]
    fn test_class_mutations() {
        let mut page = page();
        let go = page.first("#go").unwrap();

        page.add_class(go, "active");
        page.add_class(go, "active");
        assert_eq!(page.document().attr(go, "class"), Some("btn active"));

        page.remove_class(go, "btn");
        assert_eq!(page.document().attr(go, "class"), Some("active"));
        assert!(page.has_class(go, "active"));
        assert!(!page.has_class(go, "btn"));
    }

    #[test]
    fn test_script_blocks_by_type() {
        let page = page();

        assert_eq!(
            page.script_blocks("text/ShortHand"),
            vec![
                "\n#go should show #panel on click\n".to_owned(),
                "#go should hide self on load".to_owned()
            ]
        );
        assert!(page.script_blocks("text/ProtoScript").is_empty());
    }

    #[test]
    fn test_set_inner_html_on_document_node_fails() {
        let mut page = page();
        let root = page.document().root();

        assert!(matches!(
            page.set_inner_html(root, "<p>x</p>"),
            Err(DomError::NotAnElement(_))
        ));
    }

    #[test]
    fn test_inject_assets_into_head() {
        let mut page = page();

        page.inject_stylesheet("motion.css");
        page.inject_script("extra.js");

        let head = page.first("head").unwrap();
        assert_eq!(
            page.document().inner_html(head),
            r#"<title>Demo</title><link href="motion.css" rel="stylesheet"><script src="extra.js"></script>"#
        );
    }

    #[test]
    fn test_fetch_uses_loader() {
        let mut page = page().with_loader(MemoryLoader::new().with("/a.html", "<b>A</b>"));

        assert_eq!(page.fetch("/a.html").unwrap(), "<b>A</b>");
        assert!(matches!(page.fetch("/b.html"), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_sibling_filter() {
        let page = page();
        let go = page.first("#go").unwrap();
        let panel = page.first("#panel").unwrap();

        assert_eq!(page.next_sibling(go, None), Some(panel));
        assert_eq!(page.next_sibling(go, Some("div")), Some(panel));
        assert_eq!(page.next_sibling(go, Some("p")), None);
        assert_eq!(page.previous_sibling(go, None), None);
    }

    #[test]
    fn test_bare_ampersand_in_text() {
        let page = Page::parse(r#"<button id="a">Tom & Jerry</button>"#);
        let a = page.first("#a").unwrap();

        assert_eq!(page.document().text_content(a), "Tom & Jerry");
        assert!(page.to_html().contains("Tom &amp; Jerry"));
    }

    #[test]
    fn test_sibling_filter_across_implied_end_tags() {
        let page = Page::parse("<div><p id=q>Q<p id=ans>A<span id=s>S</span></div>");
        let q = page.first("#q").unwrap();
        let ans = page.first("#ans").unwrap();

        assert_eq!(page.next_sibling(q, Some("p")), Some(ans));
        assert_eq!(page.previous_sibling(ans, Some("p")), Some(q));
        assert_eq!(page.parent(page.first("#s").unwrap()), Some(ans));
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let page = page();
        let go = page.first("#go").unwrap();

        assert!(page.select("'active'").is_empty());
        assert!(!page.matches(go, "[["));
        assert!(page.matches(go, "button.btn"));
    }
}
