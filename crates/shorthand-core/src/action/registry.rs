//! Name to action mapping.

use std::collections::HashMap;
use std::fmt;

use super::{Action, ActionContext, builtin};
use crate::error::ActionError;

/// Mapping from action name to handler.
///
/// Names are matched case-sensitively. Registering a name that already exists
/// replaces the previous handler; there is no removal.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Box<dyn Action>>,
}

impl ActionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the built-in actions.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::install(&mut registry);
        registry
    }

    /// Register an action under `name`, returning the handler it replaced.
    pub fn register<A>(&mut self, name: impl Into<String>, action: A) -> Option<Box<dyn Action>>
    where
        A: Action + 'static,
    {
        self.actions.insert(name.into(), Box::new(action))
    }

    /// Register a function or closure under `name`.
    ///
    /// Same as [`register`](Self::register), with a signature that lets
    /// closure argument types be inferred.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> Option<Box<dyn Action>>
    where
        F: Fn(&mut ActionContext<'_>, &[&str]) -> Result<(), ActionError> + 'static,
    {
        self.register(name, f)
    }

    /// Look up an action by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Action> {
        self.actions.get(name).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noop(_ctx: &mut ActionContext<'_>, _args: &[&str]) -> Result<(), ActionError> {
        Ok(())
    }

    #[test]
    fn test_builtins_seeded() {
        let registry = ActionRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec![
                "addclass",
                "goto",
                "hide",
                "load",
                "removeclass",
                "show",
                "toggle",
                "toggleclass"
            ]
        );
    }

    #[test]
    fn test_register_new_name() {
        let mut registry = ActionRegistry::new();
        assert!(registry.is_empty());

        assert!(registry.register_fn("noop", noop).is_none());
        assert!(registry.contains("noop"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = ActionRegistry::with_builtins();
        let before = registry.len();

        let replaced = registry.register_fn("hide", noop);

        assert!(replaced.is_some());
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let registry = ActionRegistry::with_builtins();
        assert!(registry.get("hide").is_some());
        assert!(registry.get("Hide").is_none());
        assert!(registry.get("addClass").is_none());
    }

    #[test]
    fn test_debug_lists_names() {
        let mut registry = ActionRegistry::new();
        registry.register_fn("noop", noop);
        assert_eq!(format!("{registry:?}"), r#"ActionRegistry { actions: ["noop"] }"#);
    }
}
