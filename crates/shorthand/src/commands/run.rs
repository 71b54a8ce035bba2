//! `shorthand run` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use shorthand_config::{CliSettings, Config};

use super::{open_page, print_diagnostics};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the run command.
#[derive(Args)]
pub(crate) struct RunArgs {
    /// Path to the HTML page.
    page: PathBuf,

    /// Event to fire, as `<selector>@<event>` (repeatable, fired in order).
    #[arg(short, long = "fire", value_name = "SELECTOR@EVENT")]
    fire: Vec<String>,

    /// Write the resulting HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RunArgs {
    /// Execute the run command.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be read or parsed, an event
    /// argument is malformed, or the output cannot be written.
    pub(crate) fn execute(
        self,
        config_path: Option<&Path>,
        settings: &CliSettings,
    ) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(config_path, Some(settings))?;

        let events = self
            .fire
            .iter()
            .map(|spec| parse_event(spec))
            .collect::<Result<Vec<_>, _>>()?;

        let mut engine = open_page(&config, &self.page)?;
        let count = engine.parse_scripts();
        output.info(&format!("{count} directive(s) bound"));

        for (selector, event) in events {
            let Some(node) = engine.host().first(selector) else {
                output.warning(&format!("warning: no element matches {selector}"));
                continue;
            };
            let dispatched = engine.fire(node, event);
            output.detail(&format!(
                "{selector}@{event}: {dispatched} directive(s) dispatched"
            ));
        }

        print_diagnostics(&output, engine.diagnostics());
        if let Some(location) = engine.host().location() {
            output.highlight(&format!("Navigated to {location}"));
        }

        let html = engine.host().to_html();
        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => output.result(&html),
        }
        Ok(())
    }
}

/// Split a `<selector>@<event>` argument at its last `@`.
fn parse_event(spec: &str) -> Result<(&str, &str), CliError> {
    spec.rsplit_once('@')
        .map(|(selector, event)| (selector.trim(), event.trim()))
        .filter(|(selector, event)| !selector.is_empty() && !event.is_empty())
        .ok_or_else(|| {
            CliError::Validation(format!(
                "invalid event '{spec}', expected <selector>@<event>"
            ))
        })
}
