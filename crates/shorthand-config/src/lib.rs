//! Configuration management for shorthand.
//!
//! Parses `shorthand.toml` files with serde and provides auto-discovery of
//! the config file in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Path Expansion
//!
//! `page.base_dir` is expanded the way a shell expands a path:
//!
//! - a leading `~` - the home directory
//! - `$VAR` or `${VAR}` - the value of VAR, errors if unset
//! - `${VAR:-default}` - VAR if set and non-empty, otherwise the default

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use shorthand_core::{DEFAULT_SCRIPT_TYPES, Grammar};

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the base directory for `load` URLs.
    pub base_dir: Option<PathBuf>,
    /// Override whether remote URLs may be fetched.
    pub allow_http: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "shorthand.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Separator phrases of the directive grammar.
    pub grammar: GrammarConfig,
    /// Page handling (paths are relative strings from TOML).
    page: PageConfigRaw,
    /// Resource loading for `load` actions.
    pub loader: LoaderConfig,
    /// Optional modules.
    pub modules: ModulesConfig,

    /// Resolved page configuration (set after loading).
    #[serde(skip)]
    pub page_resolved: PageConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Grammar phrases as written in `[grammar]`.
///
/// Phrases are used verbatim, so the surrounding spaces of `verb = " should "`
/// are significant.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GrammarConfig {
    pub verb: String,
    pub preposition: String,
    pub auxiliary: String,
    pub options: String,
    pub conjunction: String,
    pub comment: String,
    pub load_sentinel: String,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        let grammar = Grammar::default();
        Self {
            verb: grammar.verb,
            preposition: grammar.preposition,
            auxiliary: grammar.auxiliary,
            options: grammar.options,
            conjunction: grammar.conjunction,
            comment: grammar.comment,
            load_sentinel: grammar.load_sentinel,
        }
    }
}

impl GrammarConfig {
    /// Grammar for the engine.
    #[must_use]
    pub fn to_grammar(&self) -> Grammar {
        Grammar {
            verb: self.verb.clone(),
            preposition: self.preposition.clone(),
            auxiliary: self.auxiliary.clone(),
            options: self.options.clone(),
            conjunction: self.conjunction.clone(),
            comment: self.comment.clone(),
            load_sentinel: self.load_sentinel.clone(),
        }
    }
}

/// Raw page configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PageConfigRaw {
    script_types: Option<Vec<String>>,
    base_dir: Option<String>,
}

/// Resolved page configuration with absolute paths.
#[derive(Debug, Default)]
pub struct PageConfig {
    /// Content types of directive script blocks.
    pub script_types: Vec<String>,
    /// Base directory for relative `load` URLs.
    pub base_dir: PathBuf,
}

/// Resource loader configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Fetch `http://` and `https://` URLs.
    pub allow_http: bool,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            allow_http: true,
            timeout_secs: 30,
        }
    }
}

impl LoaderConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Optional module configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    /// Names of modules to enable, in order.
    pub enabled: Vec<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`page.base_dir`").
        field: String,
        /// Error message (e.g., "${`SITE_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `shorthand.toml` in the current directory and
    /// its parents, falling back to defaults.
    ///
    /// CLI settings are applied after loading and path resolution, so CLI
    /// arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if parsing,
    /// expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_dir) = &settings.base_dir {
            self.page_resolved.base_dir.clone_from(base_dir);
        }
        if let Some(allow_http) = settings.allow_http {
            self.loader.allow_http = allow_http;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            grammar: GrammarConfig::default(),
            page: PageConfigRaw::default(),
            loader: LoaderConfig::default(),
            modules: ModulesConfig::default(),
            page_resolved: PageConfig {
                script_types: default_script_types(),
                base_dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_grammar()?;
        self.validate_page()?;
        self.validate_loader()?;
        self.validate_modules()?;
        Ok(())
    }

    fn validate_grammar(&self) -> Result<(), ConfigError> {
        for (name, phrase) in self.grammar.to_grammar().phrases() {
            require_non_empty(phrase, &format!("grammar.{name}"))?;
        }
        Ok(())
    }

    fn validate_page(&self) -> Result<(), ConfigError> {
        let types = &self.page_resolved.script_types;
        if types.is_empty() {
            return Err(ConfigError::Validation(
                "page.script_types must list at least one content type".to_owned(),
            ));
        }
        for ty in types {
            require_non_empty(ty, "page.script_types")?;
        }
        Ok(())
    }

    fn validate_loader(&self) -> Result<(), ConfigError> {
        if self.loader.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "loader.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_modules(&self) -> Result<(), ConfigError> {
        let available = shorthand_core::modules::AVAILABLE;
        for name in &self.modules.enabled {
            if !available.contains(&name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "modules.enabled: unknown module '{name}' (available: {})",
                    available.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Expand `~` and environment variables in `page.base_dir`.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(base_dir) = self.page.base_dir.take() {
            self.page.base_dir = Some(expand_path(&base_dir, "page.base_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.page_resolved = PageConfig {
            script_types: self
                .page
                .script_types
                .clone()
                .unwrap_or_else(default_script_types),
            base_dir: config_dir.join(self.page.base_dir.as_deref().unwrap_or(".")),
        };
    }
}

/// Shell-style expansion of a configured path. Unset variables without a
/// default are reported against `field`.
fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::full_with_context(
        value,
        || std::env::var("HOME").ok(),
        |var| std::env::var(var).map(Some),
    )
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.var_name),
    })
}

fn default_script_types() -> Vec<String> {
    DEFAULT_SCRIPT_TYPES.iter().map(|&ty| ty.to_owned()).collect()
}
