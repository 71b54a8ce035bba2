//! `shorthand check` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use shorthand_config::{CliSettings, Config};
use shorthand_core::Engine;
use shorthand_dom::Page;

use super::{describe, open_page, print_diagnostics};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to the HTML page.
    page: PathBuf,

    /// Extra directive lines to check against the page, after its own.
    #[arg(short, long)]
    inline: Vec<String>,

    /// Fail when any diagnostic is reported.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be read or parsed, or with
    /// `--strict` if any diagnostic was reported.
    pub(crate) fn execute(
        self,
        config_path: Option<&Path>,
        settings: &CliSettings,
    ) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(config_path, Some(settings))?;

        let mut engine = open_page(&config, &self.page)?;
        let mut count = engine.parse_scripts();
        for source in &self.inline {
            count += engine.parse_source(source);
        }

        output.highlight(&self.page.display().to_string());
        for (index, directive) in engine.directives().iter().enumerate() {
            output.info(&format!("  {}", describe(directive)));
            if let Some(line) = listener_line(&engine, index) {
                output.detail(&format!("    {line}"));
            }
        }

        let diagnostics = engine.diagnostics();
        print_diagnostics(&output, diagnostics);

        if diagnostics.is_empty() {
            output.success(&format!("{count} directive(s) bound, no problems found"));
            return Ok(());
        }

        output.info(&format!(
            "{count} directive(s) bound, {} diagnostic(s)",
            diagnostics.len()
        ));
        if self.strict {
            return Err(CliError::Validation(format!(
                "{} diagnostic(s) reported",
                diagnostics.len()
            )));
        }
        Ok(())
    }
}

/// Listener count of the directive at `index`, if it listens at all.
fn listener_line(engine: &Engine<Page>, index: usize) -> Option<String> {
    let listeners = engine.listeners_of(index).len();
    (listeners > 0).then(|| format!("{listeners} listener(s)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_listener_line_counts_own_bindings() {
        let mut engine = Engine::new(Page::parse(
            r#"<button id="a">A</button><button id="b">B</button>"#,
        ));
        engine.parse_source(
            "#a should hide #b on click\n#a should show #b on dblclick\nbutton should addclass 'x' self on click\n#b should hide on load",
        );

        let lines: Vec<Option<String>> = (0..engine.directives().len())
            .map(|index| listener_line(&engine, index))
            .collect();

        assert_eq!(
            lines,
            vec![
                Some("1 listener(s)".to_owned()),
                Some("1 listener(s)".to_owned()),
                Some("2 listener(s)".to_owned()),
                None,
            ]
        );
    }
}
