//! Error types.
//!
//! None of these ever escape the engine: action failures are converted into
//! [`Diagnostic`](crate::Diagnostic)s by the dispatcher.

/// Error loading a resource.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoadError {
    /// Nothing exists at the given location.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The location uses a scheme the loader refuses.
    #[error("loading {url} is not allowed")]
    Forbidden {
        /// Requested URL.
        url: String,
    },

    /// Reading a local resource failed.
    #[error("I/O error loading {url}")]
    Io {
        /// Requested URL.
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote server answered with an error status.
    #[error("HTTP {status} loading {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Request could not be completed (network error, timeout, etc).
    #[error("request for {url} failed")]
    Request {
        /// Requested URL.
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Error mutating the host document.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DomError {
    /// Handle does not refer to an element.
    #[error("node {0} is not an element")]
    NotAnElement(usize),
}

/// Error raised by an action handler.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ActionError {
    /// A positional argument the action needs was not written.
    #[error("missing {name} argument (position {position})")]
    MissingArgument {
        /// Argument role (e.g., "target", "className").
        name: &'static str,
        /// Zero-based position in the argument list.
        position: usize,
    },

    /// Loading a resource failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Mutating the document failed.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// Handler-specific failure.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_message() {
        let err = ActionError::MissingArgument {
            name: "target",
            position: 0,
        };
        assert_eq!(err.to_string(), "missing target argument (position 0)");
    }

    #[test]
    fn test_load_error_is_transparent() {
        let err = ActionError::from(LoadError::Status {
            url: "/missing.html".to_owned(),
            status: 404,
        });
        assert_eq!(err.to_string(), "HTTP 404 loading /missing.html");
    }
}
