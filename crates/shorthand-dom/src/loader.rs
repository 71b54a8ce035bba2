//! Resource loaders backing `load` actions.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use shorthand_core::LoadError;
use tracing::debug;
use ureq::Agent;

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of content for `load` actions.
pub trait Loader {
    /// Fetch the content at `url` as text.
    fn load(&self, url: &str) -> Result<String, LoadError>;
}

/// Loads relative and `file://` URLs from a base directory.
///
/// Query strings and fragments are ignored. A leading `/` is relative to the
/// base directory, and paths climbing out of it are refused.
#[derive(Clone, Debug)]
pub struct FsLoader {
    base_dir: PathBuf,
}

impl FsLoader {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Filesystem path for `url`, or `None` if it leaves the base directory.
    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        let path = path.split(['?', '#']).next().unwrap_or_default();

        let mut resolved = self.base_dir.clone();
        let mut depth = 0usize;
        for component in Path::new(path.trim_start_matches('/')).components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    depth += 1;
                }
                Component::ParentDir => {
                    depth = depth.checked_sub(1)?;
                    resolved.pop();
                }
                Component::CurDir => {}
                Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(resolved)
    }
}

impl Loader for FsLoader {
    fn load(&self, url: &str) -> Result<String, LoadError> {
        let path = self.resolve(url).ok_or_else(|| LoadError::Forbidden {
            url: url.to_owned(),
        })?;
        debug!(path = %path.display(), "reading file");

        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                LoadError::NotFound(url.to_owned())
            } else {
                LoadError::Io {
                    url: url.to_owned(),
                    source,
                }
            }
        })
    }
}

/// Loads `http://` and `https://` URLs.
#[derive(Clone)]
pub struct HttpLoader {
    agent: Agent,
}

impl HttpLoader {
    /// Create a loader whose requests give up after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: create_agent(timeout),
        }
    }
}

impl Default for HttpLoader {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

impl Loader for HttpLoader {
    fn load(&self, url: &str) -> Result<String, LoadError> {
        debug!(url, "fetching");
        let response = self.agent.get(url).call().map_err(|e| LoadError::Request {
            url: url.to_owned(),
            source: Box::new(e),
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(LoadError::Status {
                url: url.to_owned(),
                status,
            });
        }

        let mut body = response.into_body();
        body.read_to_string().map_err(|e| LoadError::Request {
            url: url.to_owned(),
            source: Box::new(e),
        })
    }
}

/// Routes URLs to the filesystem or HTTP by scheme.
///
/// `http://` and `https://` go to the HTTP loader when remote loading is
/// allowed and are refused otherwise; every other URL is read from disk.
pub struct DefaultLoader {
    fs: FsLoader,
    http: Option<HttpLoader>,
}

impl DefaultLoader {
    /// Filesystem-only loader rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs: FsLoader::new(base_dir),
            http: None,
        }
    }

    /// Allow remote URLs, with the given request timeout.
    #[must_use]
    pub fn with_http(mut self, timeout: Duration) -> Self {
        self.http = Some(HttpLoader::new(timeout));
        self
    }
}

fn is_remote(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl Loader for DefaultLoader {
    fn load(&self, url: &str) -> Result<String, LoadError> {
        if !is_remote(url) {
            return self.fs.load(url);
        }
        match &self.http {
            Some(http) => http.load(url),
            None => Err(LoadError::Forbidden {
                url: url.to_owned(),
            }),
        }
    }
}

/// Serves content from a fixed map of URLs.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    resources: HashMap<String, String>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, url: impl Into<String>, content: impl Into<String>) -> Self {
        self.resources.insert(url.into(), content.into());
        self
    }
}

impl Loader for MemoryLoader {
    fn load(&self, url: &str) -> Result<String, LoadError> {
        self.resources
            .get(url)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(url.to_owned()))
    }
}
