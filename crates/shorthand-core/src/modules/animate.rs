//! CSS transition helpers.

use tracing::debug;

use super::Module;
use crate::action::{ActionContext, ActionRegistry, argument, strip_quotes};
use crate::dom::Resources;
use crate::error::ActionError;

/// Stylesheet injected when the module is enabled.
pub const DEFAULT_STYLESHEET: &str = "shorthand-animate.css";

/// Events after which an animation class is removed.
pub const END_EVENTS: &[&str] = &["animationend", "transitionend"];

/// Adds the `animate className target` action.
///
/// The action adds `className` to each target and removes it again the first
/// time the target reports `animationend` or `transitionend`.
#[derive(Clone, Debug)]
pub struct Animate {
    stylesheet: String,
}

impl Animate {
    /// Inject `stylesheet` instead of [`DEFAULT_STYLESHEET`].
    #[must_use]
    pub fn with_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.stylesheet = stylesheet.into();
        self
    }
}

impl Default for Animate {
    fn default() -> Self {
        Self {
            stylesheet: DEFAULT_STYLESHEET.to_owned(),
        }
    }
}

impl Module for Animate {
    fn name(&self) -> &str {
        "animate"
    }

    fn install(&self, registry: &mut ActionRegistry, resources: &mut dyn Resources) {
        resources.inject_stylesheet(&self.stylesheet);
        registry.register_fn("animate", animate);
    }
}

fn animate(ctx: &mut ActionContext<'_>, args: &[&str]) -> Result<(), ActionError> {
    let class = strip_quotes(argument(args, 0, "className")?);
    for node in ctx.target(args, 1) {
        ctx.host().add_class(node, &class);
        debug!(%class, "animation started");
        let class = class.clone();
        ctx.once(node, END_EVENTS, move |host| host.remove_class(node, &class));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Engine;
    use crate::dom::Dom;
    use crate::mock::MockPage;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_install_injects_stylesheet() {
        let engine = Engine::new(MockPage::new()).with_module(&Animate::default());

        assert!(engine.registry().contains("animate"));
        assert_eq!(
            engine.host().injected_stylesheets,
            vec![DEFAULT_STYLESHEET.to_owned()]
        );
    }

    #[test]
    fn test_custom_stylesheet() {
        let module = Animate::default().with_stylesheet("/css/motion.css");
        let engine = Engine::new(MockPage::new()).with_module(&module);

        assert_eq!(engine.host().injected_stylesheets, vec!["/css/motion.css"]);
    }

    #[test]
    fn test_class_removed_after_transition_once() {
        let mut engine = Engine::new(MockPage::new().with("button#go").with("div#box"))
            .with_module(&Animate::default());
        engine.parse_source("#go should animate 'pulse' #box on click");

        let go = engine.host().id("go");
        let target = engine.host().id("box");
        engine.fire(go, "click");
        assert!(engine.host().element(target).classes.contains(&"pulse".to_owned()));

        engine.fire(target, "transitionend");
        assert!(!engine.host().element(target).classes.contains(&"pulse".to_owned()));

        engine.host_mut().add_class(target, "pulse");
        engine.fire(target, "animationend");
        assert!(engine.host().element(target).classes.contains(&"pulse".to_owned()));
    }
}
