//! Binding resolved directives to their triggers.

use tracing::debug;

use crate::directive::{Directive, Trigger};
use crate::dispatch::Dispatcher;
use crate::dom::NodeId;

/// A directive waiting for `event` on `node`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Binding {
    pub(crate) node: NodeId,
    pub(crate) event: String,
    pub(crate) directive: usize,
}

/// Bind `directives`, numbered from `first_index` in the engine's list.
///
/// `load` and predicate directives run right away with their whole bound set
/// as origin. Event directives get one binding per bound element, and each of
/// those elements is given a pointer cursor.
pub(crate) fn observe(
    directives: &[Directive],
    first_index: usize,
    bindings: &mut Vec<Binding>,
    dispatcher: &mut Dispatcher<'_>,
) {
    for (offset, directive) in directives.iter().enumerate() {
        match &directive.trigger {
            Trigger::Load | Trigger::Predicate => {
                debug!(directive = %directive.raw, "running immediately");
                dispatcher.dispatch(directive, &directive.bound);
            }
            Trigger::Event(event) => {
                for &node in &directive.bound {
                    dispatcher.host.set_style(node, "cursor", "pointer");
                    bindings.push(Binding {
                        node,
                        event: event.clone(),
                        directive: first_index + offset,
                    });
                }
                debug!(
                    directive = %directive.raw,
                    %event,
                    elements = directive.bound.len(),
                    "bound directive"
                );
            }
        }
    }
}
