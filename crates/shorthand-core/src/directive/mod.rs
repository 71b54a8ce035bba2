//! Directive parsing: tokenizing lines and resolving them against the page.
//!
//! A directive line follows one of two forms:
//!
//! - event form: `<selector> should <action>[ and <action>]* on <interaction>`
//! - predicate form: `<selector> should be <action>[ with <options>]`
//!
//! [`tokenize`] splits a line into its segments without looking at the
//! document. [`resolve`] then matches the selector once against the page;
//! a directive exists only if that match was non-empty.

mod resolver;
mod source;
mod tokenizer;

pub use resolver::resolve;
pub use source::source_lines;
pub use tokenizer::{Rejection, Tokens, TriggerText, tokenize};

use crate::dom::NodeId;

/// What makes a directive run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Bound to an interaction event on each matched element.
    Event(String),
    /// Runs once, immediately at bind time (`on load`).
    Load,
    /// Predicate form (`should be ...`): runs once, immediately, as a
    /// declarative state setter.
    Predicate,
}

/// One parsed statement, bound to the elements its selector matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    /// Source line, trimmed.
    pub raw: String,
    /// Subject selector as authored.
    pub selector: String,
    /// Action clause, possibly several actions joined by the conjunction.
    pub action: String,
    /// When the actions run.
    pub trigger: Trigger,
    /// Trailing options clause of the predicate form.
    pub options: Option<String>,
    /// Elements matched by `selector` at resolution time, never empty.
    pub bound: Vec<NodeId>,
}

impl Directive {
    /// Interaction name as written, with `load` for the immediate sentinel.
    ///
    /// `None` for the predicate form.
    #[must_use]
    pub fn interaction(&self) -> Option<&str> {
        match &self.trigger {
            Trigger::Event(event) => Some(event),
            Trigger::Load => Some("load"),
            Trigger::Predicate => None,
        }
    }

    /// Whether the directive waits for an interaction event.
    #[must_use]
    pub fn is_event_bound(&self) -> bool {
        matches!(self.trigger, Trigger::Event(_))
    }
}
