//! Natural-language interaction directives for web pages.
//!
//! Authors write one statement per line inside a `<script type="text/ShortHand">`
//! block:
//!
//! ```text
//! #menu-toggle should toggle #menu on click
//! .card should addclass 'active' self and show next p on mouseenter
//! #banner should hide self on load
//! #sidebar should be draggable with axis x
//! ```
//!
//! Each line is tokenized into a selector, an action clause and a trigger,
//! resolved once against the live document, and bound by the [`Engine`].
//! When the trigger fires, the action clause is split on `and` and every
//! action is looked up in the [`ActionRegistry`] and run in order.
//!
//! # Architecture
//!
//! The crate never touches a real DOM. Everything it needs from the page is
//! expressed by the collaborator traits in [`dom`]:
//!
//! - [`ElementLookup`]: selector resolution and sibling traversal
//! - [`Dom`]: the mutations built-in actions perform
//! - [`Resources`]: fetching content and injecting scripts or stylesheets
//!
//! Malformed lines, selectors matching nothing, unknown actions and failing
//! handlers never abort processing. They are recorded as [`Diagnostic`]s,
//! logged through `tracing`, and skipped.
//!
//! # Example
//!
//! A line splits into its parts without any page:
//!
//! ```
//! use shorthand_core::directive::{TriggerText, tokenize};
//! use shorthand_core::{ActionRegistry, Grammar};
//!
//! let tokens = tokenize("#close should hide #dialog on click", &Grammar::default()).unwrap();
//! assert_eq!(tokens.selector, "#close");
//! assert_eq!(tokens.action, "hide #dialog");
//! assert_eq!(tokens.trigger, TriggerText::Interaction("click"));
//!
//! assert!(ActionRegistry::with_builtins().contains("hide"));
//! ```
//!
//! Binding and firing need a host; `shorthand-dom` provides one for parsed
//! HTML, and the `mock` feature provides `mock::MockPage` for tests.

pub mod action;
pub mod directive;
mod diagnostic;
mod dispatch;
pub mod dom;
mod engine;
mod error;
mod grammar;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod modules;
mod observer;
mod target;

pub use action::{Action, ActionContext, ActionRegistry};
pub use diagnostic::Diagnostic;
pub use directive::{Directive, Trigger};
pub use dom::{Dom, ElementLookup, Host, NodeId, Resources};
pub use engine::{DEFAULT_SCRIPT_TYPES, Engine};
pub use error::{ActionError, DomError, LoadError};
pub use grammar::Grammar;
pub use target::find_target;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
