//! Running the action chain of a directive.

use tracing::debug;

use crate::action::{ActionContext, ActionRegistry, OnceListener};
use crate::diagnostic::{Diagnostic, report};
use crate::directive::Directive;
use crate::dom::{Host, NodeId};

/// Borrowed engine state needed to run actions.
pub(crate) struct Dispatcher<'a> {
    pub(crate) registry: &'a ActionRegistry,
    pub(crate) conjunction: &'a str,
    pub(crate) host: &'a mut dyn Host,
    pub(crate) once: &'a mut Vec<OnceListener>,
    pub(crate) diagnostics: &'a mut Vec<Diagnostic>,
}

impl Dispatcher<'_> {
    /// Run every action of `directive` left to right with `origin` as context.
    ///
    /// Unknown names and failing handlers are reported and skipped; the rest
    /// of the chain still runs. Returns the number of actions that succeeded.
    pub(crate) fn dispatch(&mut self, directive: &Directive, origin: &[NodeId]) -> usize {
        let mut succeeded = 0;

        for expression in directive.action.split(self.conjunction) {
            let mut tokens = expression.split_whitespace();
            let Some(name) = tokens.next() else {
                report(
                    self.diagnostics,
                    Diagnostic::BlankAction {
                        line: directive.raw.clone(),
                    },
                );
                continue;
            };
            let args: Vec<&str> = tokens.collect();

            let Some(action) = self.registry.get(name) else {
                report(
                    self.diagnostics,
                    Diagnostic::UnknownAction {
                        name: name.to_owned(),
                        line: directive.raw.clone(),
                    },
                );
                continue;
            };

            debug!(action = name, ?args, origin = origin.len(), "running action");
            let mut ctx = ActionContext::new(origin, directive, &mut *self.host, &mut *self.once);
            match action.run(&mut ctx, &args) {
                Ok(()) => succeeded += 1,
                Err(err) => report(
                    self.diagnostics,
                    Diagnostic::ActionFailed {
                        name: name.to_owned(),
                        line: directive.raw.clone(),
                        message: err.to_string(),
                    },
                ),
            }
        }

        succeeded
    }
}
