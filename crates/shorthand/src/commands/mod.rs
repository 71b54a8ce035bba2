//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod run;

pub(crate) use check::CheckArgs;
pub(crate) use run::RunArgs;

use std::path::Path;

use shorthand_config::Config;
use shorthand_core::{Diagnostic, Directive, Engine, Trigger, modules};
use shorthand_dom::{DefaultLoader, Page};
use tracing::debug;

use crate::error::CliError;
use crate::output::Output;

/// Parse the page at `path` and set up an engine for it from `config`.
///
/// Modules are enabled before any directive is parsed, so their actions are
/// available to directives that run at bind time.
pub(crate) fn open_page(config: &Config, path: &Path) -> Result<Engine<Page>, CliError> {
    let html = std::fs::read_to_string(path)?;

    let mut loader = DefaultLoader::new(&config.page_resolved.base_dir);
    if config.loader.allow_http {
        loader = loader.with_http(config.loader.timeout());
    }
    let page = Page::parse(&html).with_loader(loader);
    debug!(path = %path.display(), "parsed page");

    let mut engine = Engine::new(page)
        .with_grammar(config.grammar.to_grammar())
        .with_script_types(&config.page_resolved.script_types);
    for name in &config.modules.enabled {
        let module = modules::by_name(name)
            .ok_or_else(|| CliError::Validation(format!("unknown module '{name}'")))?;
        engine.enable_module(module.as_ref());
    }
    Ok(engine)
}

/// One-line summary of a bound directive.
pub(crate) fn describe(directive: &Directive) -> String {
    let trigger = match &directive.trigger {
        Trigger::Event(event) => format!("on {event}"),
        Trigger::Load => "on load".to_owned(),
        Trigger::Predicate => "predicate".to_owned(),
    };
    let count = directive.bound.len();
    let elements = if count == 1 { "element" } else { "elements" };
    let mut line = format!(
        "{} -> {} [{trigger}] ({count} {elements})",
        directive.selector, directive.action
    );
    if let Some(options) = &directive.options {
        line.push_str(&format!(" with {options}"));
    }
    line
}

pub(crate) fn print_diagnostics(output: &Output, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        output.warning(&format!("warning: {diagnostic}"));
    }
}
