//! Named actions and their registry.
//!
//! An action is anything implementing [`Action`]; plain functions and closures
//! with the signature `(&mut ActionContext, &[&str]) -> Result<(), ActionError>`
//! qualify through a blanket implementation. The registry maps names to
//! actions; it is seeded with the built-ins and open to registration at any
//! time, with the last registration under a name winning.
//!
//! # Example
//!
//! ```
//! use shorthand_core::{ActionContext, ActionError, ActionRegistry, Dom};
//!
//! let mut registry = ActionRegistry::with_builtins();
//! registry.register_fn("enlarge", |ctx: &mut ActionContext<'_>, args: &[&str]| {
//!     for node in ctx.target(args, 0) {
//!         ctx.host().set_style(node, "font-size", "10em");
//!     }
//!     Ok::<(), ActionError>(())
//! });
//!
//! assert!(registry.contains("enlarge"));
//! assert!(registry.contains("hide"));
//! ```

pub mod builtin;
mod context;
mod registry;

pub use context::{ActionContext, argument, strip_quotes};
pub(crate) use context::OnceListener;
pub use registry::ActionRegistry;

use crate::error::ActionError;

/// Handler for a named action.
///
/// `args` are the whitespace-separated tokens written after the action name;
/// the context carries the origin elements, the owning directive and the host.
pub trait Action {
    fn run(&self, ctx: &mut ActionContext<'_>, args: &[&str]) -> Result<(), ActionError>;
}

impl<F> Action for F
where
    F: Fn(&mut ActionContext<'_>, &[&str]) -> Result<(), ActionError>,
{
    fn run(&self, ctx: &mut ActionContext<'_>, args: &[&str]) -> Result<(), ActionError> {
        self(ctx, args)
    }
}
