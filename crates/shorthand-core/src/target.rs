//! Relative target resolution.

use crate::dom::{ElementLookup, NodeId};

/// Turn a target token into concrete elements.
///
/// `origin` is the dispatch origin (the element that fired, or the whole bound
/// set for immediate directives) and `args` is the full argument list of the
/// action invocation the token came from.
///
/// - `self` / `itself`: the first origin element only.
/// - `next` / `previous`: the immediate sibling of that element, filtered by
///   the argument written right after the keyword, if any.
/// - anything else: a selector resolved against the whole document.
///
/// # Example
///
/// ```
/// use shorthand_core::{ElementLookup, NodeId, find_target};
///
/// /// A flat row of sibling elements, selected by tag name.
/// struct Row(Vec<&'static str>);
///
/// impl ElementLookup for Row {
///     fn select(&self, selector: &str) -> Vec<NodeId> {
///         (0..self.0.len())
///             .filter(|&i| self.0[i] == selector)
///             .map(NodeId::new)
///             .collect()
///     }
///     fn matches(&self, node: NodeId, selector: &str) -> bool {
///         self.0[node.index()] == selector
///     }
///     fn parent(&self, _node: NodeId) -> Option<NodeId> {
///         None
///     }
///     fn next_element(&self, node: NodeId) -> Option<NodeId> {
///         (node.index() + 1 < self.0.len()).then(|| NodeId::new(node.index() + 1))
///     }
///     fn previous_element(&self, node: NodeId) -> Option<NodeId> {
///         node.index().checked_sub(1).map(NodeId::new)
///     }
/// }
///
/// let row = Row(vec!["h3", "p", "div", "p"]);
/// let h3 = NodeId::new(0);
///
/// assert_eq!(find_target(&row, &[h3], "next", &["next", "p"]), vec![NodeId::new(1)]);
/// assert!(find_target(&row, &[h3], "next", &["next", "div"]).is_empty());
/// assert_eq!(find_target(&row, &[h3], "p", &["p"]), vec![NodeId::new(1), NodeId::new(3)]);
/// ```
pub fn find_target<L>(lookup: &L, origin: &[NodeId], token: &str, args: &[&str]) -> Vec<NodeId>
where
    L: ElementLookup + ?Sized,
{
    let first = origin.first().copied();
    let filter = || {
        args.iter()
            .position(|&arg| arg == token)
            .and_then(|idx| args.get(idx + 1))
            .copied()
    };

    match token {
        "self" | "itself" => first.into_iter().collect(),
        "next" => first
            .and_then(|node| lookup.next_sibling(node, filter()))
            .into_iter()
            .collect(),
        "previous" => first
            .and_then(|node| lookup.previous_sibling(node, filter()))
            .into_iter()
            .collect(),
        selector => lookup.select(selector),
    }
}
