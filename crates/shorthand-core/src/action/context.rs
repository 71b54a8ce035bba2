//! Dispatch context handed to action handlers.

use crate::directive::Directive;
use crate::dom::{Host, NodeId};
use crate::error::ActionError;
use crate::target::find_target;

/// Effect run once when any of `events` next fires on `node`.
pub(crate) struct OnceListener {
    pub(crate) node: NodeId,
    pub(crate) events: Vec<String>,
    pub(crate) effect: Box<dyn FnOnce(&mut dyn Host)>,
}

/// Context for one action invocation.
///
/// Created by the dispatcher for each chained action; it lives only for the
/// duration of the call.
pub struct ActionContext<'a> {
    origin: &'a [NodeId],
    directive: &'a Directive,
    host: &'a mut dyn Host,
    once: &'a mut Vec<OnceListener>,
}

impl<'a> ActionContext<'a> {
    pub(crate) fn new(
        origin: &'a [NodeId],
        directive: &'a Directive,
        host: &'a mut dyn Host,
        once: &'a mut Vec<OnceListener>,
    ) -> Self {
        Self {
            origin,
            directive,
            host,
            once,
        }
    }

    /// Elements the dispatch originates from.
    ///
    /// The single element that received the event, or the whole bound set
    /// for directives that run immediately.
    pub fn origin(&self) -> &[NodeId] {
        self.origin
    }

    /// Directive being dispatched.
    pub fn directive(&self) -> &Directive {
        self.directive
    }

    /// Options clause of a predicate directive.
    pub fn options(&self) -> Option<&str> {
        self.directive.options.as_deref()
    }

    /// Mutable access to the page.
    pub fn host(&mut self) -> &mut dyn Host {
        &mut *self.host
    }

    /// Resolve a target token relative to this dispatch.
    ///
    /// See [`find_target`] for the keyword rules.
    pub fn find_target(&self, token: &str, args: &[&str]) -> Vec<NodeId> {
        find_target(&*self.host, self.origin, token, args)
    }

    /// Resolve the target written at `position` in `args`.
    ///
    /// An omitted target means the origin element, as if `self` was written.
    pub fn target(&self, args: &[&str], position: usize) -> Vec<NodeId> {
        let token = args.get(position).copied().unwrap_or("self");
        self.find_target(token, args)
    }

    /// Run `effect` the next time one of `events` fires on `node`, then
    /// forget it for all of them.
    pub fn once<F>(&mut self, node: NodeId, events: &[&str], effect: F)
    where
        F: FnOnce(&mut dyn Host) + 'static,
    {
        self.once.push(OnceListener {
            node,
            events: events.iter().map(|&e| e.to_owned()).collect(),
            effect: Box::new(effect),
        });
    }
}

/// Positional argument, or a [`ActionError::MissingArgument`] naming its role.
pub fn argument<'s>(
    args: &[&'s str],
    position: usize,
    name: &'static str,
) -> Result<&'s str, ActionError> {
    args.get(position)
        .copied()
        .ok_or(ActionError::MissingArgument { name, position })
}

/// Remove quote characters from an argument (`'active'` becomes `active`).
pub fn strip_quotes(arg: &str) -> String {
    arg.replace(['\'', '"'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("'active'"), "active");
        assert_eq!(strip_quotes("\"/next.html\""), "/next.html");
        assert_eq!(strip_quotes("plain"), "plain");
    }

    #[test]
    fn test_argument() {
        let args = ["'big'", "self"];
        assert_eq!(argument(&args, 1, "target").unwrap(), "self");
        assert!(matches!(
            argument(&args, 2, "target"),
            Err(ActionError::MissingArgument {
                name: "target",
                position: 2
            })
        ));
    }
}
