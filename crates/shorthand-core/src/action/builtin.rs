//! Built-in actions.
//!
//! | name | arguments |
//! |---|---|
//! | `hide`, `show`, `toggle` | target |
//! | `addclass`, `removeclass`, `toggleclass` | className target |
//! | `goto` | destination |
//! | `load` | url insertion target |
//!
//! Quote characters are stripped from class names, destinations and URLs.

use tracing::{debug, info};

use super::{ActionContext, ActionRegistry, argument, strip_quotes};
use crate::error::ActionError;

/// Register every built-in action.
pub fn install(registry: &mut ActionRegistry) {
    registry.register_fn("hide", hide);
    registry.register_fn("show", show);
    registry.register_fn("toggle", toggle);
    registry.register_fn("addclass", addclass);
    registry.register_fn("removeclass", removeclass);
    registry.register_fn("toggleclass", toggleclass);
    registry.register_fn("goto", goto);
    registry.register_fn("load", load);
}

pub fn hide(ctx: &mut ActionContext<'_>, args: &[&str]) -> Result<(), ActionError> {
    for node in ctx.target(args, 0) {
        ctx.host().set_visible(node, false);
    }
    Ok(())
}

pub fn show(ctx: &mut ActionContext<'_>, args: &[&str]) -> Result<(), ActionError> {
    for node in ctx.target(args, 0) {
        ctx.host().set_visible(node, true);
    }
    Ok(())
}

/// Flip visibility of each target independently.
pub fn toggle(ctx: &mut ActionContext<'_>, args: &[&str]) -> Result<(), ActionError> {
    for node in ctx.target(args, 0) {
        let visible = ctx.host().is_visible(node);
        ctx.host().set_visible(node, !visible);
    }
    Ok(())
}

pub fn addclass(ctx: &mut ActionContext<'_>, args: &[&str]) -> Result<(), ActionError> {
    let class = strip_quotes(argument(args, 0, "className")?);
    for node in ctx.target(args, 1) {
        ctx.host().add_class(node, &class);
    }
    Ok(())
}

pub fn removeclass(ctx: &mut ActionContext<'_>, args: &[&str]) -> Result<(), ActionError> {
    let class = strip_quotes(argument(args, 0, "className")?);
    for node in ctx.target(args, 1) {
        ctx.host().remove_class(node, &class);
    }
    Ok(())
}

pub fn toggleclass(ctx: &mut ActionContext<'_>, args: &[&str]) -> Result<(), ActionError> {
    let class = strip_quotes(argument(args, 0, "className")?);
    for node in ctx.target(args, 1) {
        let host = ctx.host();
        if host.has_class(node, &class) {
            host.remove_class(node, &class);
        } else {
            host.add_class(node, &class);
        }
    }
    Ok(())
}

pub fn goto(ctx: &mut ActionContext<'_>, args: &[&str]) -> Result<(), ActionError> {
    let destination = strip_quotes(argument(args, 0, "destination")?);
    info!(%destination, "navigating");
    ctx.host().navigate(&destination);
    Ok(())
}

/// Fetch `url` and replace the content of each target with it.
///
/// The insertion word (`into`) is required by position but not interpreted.
/// Directives inside the loaded content are not parsed.
pub fn load(ctx: &mut ActionContext<'_>, args: &[&str]) -> Result<(), ActionError> {
    let url = strip_quotes(argument(args, 0, "url")?);
    let insertion = argument(args, 1, "insertion")?;
    let targets = ctx.target(args, 2);
    debug!(%url, insertion, targets = targets.len(), "loading content");

    let content = ctx.host().fetch(&url)?;
    for node in targets {
        ctx.host().set_inner_html(node, &content)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::Engine;
    use crate::mock::MockPage;
    use pretty_assertions::assert_eq;

    fn classes(engine: &Engine<MockPage>, id: &str) -> Vec<String> {
        engine.host().element(engine.host().id(id)).classes.clone()
    }

    #[test]
    fn test_toggle_flips_each_target_independently() {
        let mut engine = Engine::new(MockPage::new().with("p#a.para").with("p#b.para"));
        engine.parse_source("#a should hide self on load");

        engine.parse_source(".para should toggle .para on load");

        assert!(engine.host().element(engine.host().id("a")).visible);
        assert!(!engine.host().element(engine.host().id("b")).visible);
    }

    #[test]
    fn test_show_after_hide() {
        let mut engine = Engine::new(MockPage::new().with("button#a").with("p#b"));
        engine.parse_source("#a should hide #b and show #b on click");

        let a = engine.host().id("a");
        engine.fire(a, "click");

        assert!(engine.host().element(engine.host().id("b")).visible);
    }

    #[test]
    fn test_class_actions_strip_quotes() {
        let mut engine = Engine::new(MockPage::new().with("div#card"));

        engine.parse_source("#card should addclass 'active' self and addclass \"seen\" self on load");
        assert_eq!(classes(&engine, "card"), vec!["active", "seen"]);

        engine.parse_source("#card should removeclass 'active' self on load");
        assert_eq!(classes(&engine, "card"), vec!["seen"]);

        engine.parse_source("#card should toggleclass 'seen' self and toggleclass 'open' self on load");
        assert_eq!(classes(&engine, "card"), vec!["open"]);
    }

    #[test]
    fn test_class_action_without_target_uses_origin() {
        let mut engine = Engine::new(MockPage::new().with("div#card"));

        engine.parse_source("#card should addclass 'active' on load");

        assert_eq!(classes(&engine, "card"), vec!["active"]);
        assert!(engine.diagnostics().is_empty());
    }

    #[test]
    fn test_class_action_without_class_fails() {
        let mut engine = Engine::new(MockPage::new().with("div#card"));

        engine.parse_source("#card should addclass on load");

        assert!(classes(&engine, "card").is_empty());
        assert!(engine.diagnostics()[0].to_string().contains("missing className"));
    }

    #[test]
    fn test_goto_navigates() {
        let mut engine = Engine::new(MockPage::new().with("a#home"));
        engine.parse_source("#home should goto '/index.html' on click");

        let home = engine.host().id("home");
        engine.fire(home, "click");

        assert_eq!(engine.host().location.as_deref(), Some("/index.html"));
    }

    #[test]
    fn test_load_replaces_content() {
        let page = MockPage::new()
            .with("button#more")
            .with("div#panel")
            .with_resource("/panel.html", "<p>Loaded</p>");
        let mut engine = Engine::new(page);
        engine.parse_source("#more should load '/panel.html' into #panel on click");

        let more = engine.host().id("more");
        engine.fire(more, "click");

        assert_eq!(engine.host().element(engine.host().id("panel")).html, "<p>Loaded</p>");
        assert_eq!(engine.host().fetched, vec!["/panel.html"]);
        assert!(engine.diagnostics().is_empty());
    }

    #[test]
    fn test_load_requires_insertion_word() {
        let page = MockPage::new()
            .with("div#panel")
            .with_resource("/panel.html", "<p>Loaded</p>");
        let mut engine = Engine::new(page);

        engine.parse_source("#panel should load '/panel.html' on load");

        assert!(engine.host().fetched.is_empty());
        assert!(engine.diagnostics()[0].to_string().contains("missing insertion"));
    }
}
