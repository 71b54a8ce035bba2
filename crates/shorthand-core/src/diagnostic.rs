//! Developer-facing diagnostics.

use std::fmt;

use tracing::warn;

/// A recoverable problem found while parsing, binding or dispatching.
///
/// Diagnostics are logged with `tracing::warn!` when recorded and kept on the
/// engine for later inspection. None of them stop processing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The line has no verb phrase (`should`).
    MissingVerb { line: String },
    /// Nothing before the verb phrase.
    EmptySelector { line: String },
    /// Nothing after the verb phrase (or between verb and preposition).
    EmptyAction { line: String },
    /// A preposition with nothing after it.
    EmptyInteraction { line: String },
    /// The selector matched no element; the directive is ignored.
    NoMatch { line: String },
    /// A chained action expression is blank (e.g. `hide self and`).
    BlankAction { line: String },
    /// No action is registered under this name.
    UnknownAction { name: String, line: String },
    /// A handler returned an error.
    ActionFailed {
        name: String,
        line: String,
        message: String,
    },
}

impl Diagnostic {
    /// Raw directive line this diagnostic refers to.
    #[must_use]
    pub fn line(&self) -> &str {
        match self {
            Self::MissingVerb { line }
            | Self::EmptySelector { line }
            | Self::EmptyAction { line }
            | Self::EmptyInteraction { line }
            | Self::NoMatch { line }
            | Self::BlankAction { line }
            | Self::UnknownAction { line, .. }
            | Self::ActionFailed { line, .. } => line,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVerb { line } => {
                write!(f, "no verb phrase found, directive ignored: \"{line}\"")
            }
            Self::EmptySelector { line } => {
                write!(f, "empty selector, directive ignored: \"{line}\"")
            }
            Self::EmptyAction { line } => write!(f, "empty action, directive ignored: \"{line}\""),
            Self::EmptyInteraction { line } => {
                write!(f, "empty interaction, directive ignored: \"{line}\"")
            }
            Self::NoMatch { line } => write!(
                f,
                "no valid target found, a directive will be ignored: \"{line}\""
            ),
            Self::BlankAction { line } => write!(f, "blank chained action in \"{line}\""),
            Self::UnknownAction { name, line } => {
                write!(f, "no action found for \"{name}\" in \"{line}\"")
            }
            Self::ActionFailed {
                name,
                line,
                message,
            } => write!(f, "action \"{name}\" failed in \"{line}\": {message}"),
        }
    }
}

/// Log a diagnostic and keep it.
pub(crate) fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    warn!("{diagnostic}");
    diagnostics.push(diagnostic);
}
