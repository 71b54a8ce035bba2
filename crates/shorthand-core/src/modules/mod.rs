//! Optional feature modules.
//!
//! A module bundles actions with the page assets they depend on. Enabling one
//! through [`Engine::enable_module`](crate::Engine::enable_module) registers
//! its actions and injects its assets into the page.

mod animate;

pub use animate::Animate;

use crate::action::ActionRegistry;
use crate::dom::Resources;

/// Names accepted by [`by_name`].
pub const AVAILABLE: &[&str] = &["animate"];

/// An optional bundle of actions and assets.
pub trait Module {
    /// Name used in configuration.
    fn name(&self) -> &str;

    /// Register actions and inject assets.
    fn install(&self, registry: &mut ActionRegistry, resources: &mut dyn Resources);
}

/// Look up a module by its configuration name.
#[must_use]
pub fn by_name(name: &str) -> Option<Box<dyn Module>> {
    match name {
        "animate" => Some(Box::new(Animate::default())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_available_module_resolves() {
        for &name in AVAILABLE {
            let module = by_name(name).unwrap();
            assert_eq!(module.name(), name);
        }
    }

    #[test]
    fn test_unknown_module() {
        assert!(by_name("sparkle").is_none());
    }
}
