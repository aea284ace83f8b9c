//! Configuration management for the Substack client.
//!
//! Parses `substack.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [api]
//! base_url = "https://substack.com/api/v1"
//! timeout_secs = 30
//!
//! [api.headers]
//! Cookie = "substack.sid=${SUBSTACK_SID}"
//!
//! [notes]
//! tab_id = "for-you"
//! surface = "feed"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` (error if unset) and `${VAR:-default}`.
//!
//! Expanded fields:
//! - `api.base_url`
//! - every value under `api.headers`
//! - `notes.tab_id`
//! - `notes.surface`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override API base URL.
    pub base_url: Option<String>,
    /// Override request timeout.
    pub timeout_secs: Option<u64>,
    /// Override feed tab for published notes.
    pub tab_id: Option<String>,
    /// Override posting surface for published notes.
    pub surface: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "substack.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API connection configuration.
    pub api: ApiConfig,
    /// Note publishing configuration.
    pub notes: NotesConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// API connection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API base URL.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Static headers sent with every request.
    pub headers: BTreeMap<String, String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://substack.com/api/v1".to_owned(),
            timeout_secs: 30,
            headers: BTreeMap::new(),
        }
    }
}

/// Note publishing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Feed tab notes are posted to.
    pub tab_id: String,
    /// Surface notes are posted from.
    pub surface: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            tab_id: "for-you".to_owned(),
            surface: "feed".to_owned(),
        }
    }
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
        /// Config field path (e.g., "`api.headers.Cookie`").
        field: String,
        /// Error message (e.g., "${`SUBSTACK_SID`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `substack.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, then the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final configuration is invalid.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.api.base_url.clone_from(base_url);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.api.timeout_secs = timeout_secs;
        }
        if let Some(tab_id) = &settings.tab_id {
            self.notes.tab_id.clone_from(tab_id);
        }
        if let Some(surface) = &settings.surface {
            self.notes.surface.clone_from(surface);
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_api()?;
        require_non_empty(&self.notes.tab_id, "notes.tab_id")?;
        require_non_empty(&self.notes.surface, "notes.surface")?;
        Ok(())
    }

    fn validate_api(&self) -> Result<(), ConfigError> {
        const MAX_TIMEOUT_SECS: u64 = 600;

        require_non_empty(&self.api.base_url, "api.base_url")?;
        require_http_url(&self.api.base_url, "api.base_url")?;

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if self.api.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "api.timeout_secs cannot exceed {MAX_TIMEOUT_SECS}"
            )));
        }

        for name in self.api.headers.keys() {
            require_non_empty(name.trim(), "api.headers key")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.api.base_url = expand::expand_env(&self.api.base_url, "api.base_url")?;
        for (name, value) in &mut self.api.headers {
            *value = expand::expand_env(value, &format!("api.headers.{name}"))?;
        }

        self.notes.tab_id = expand::expand_env(&self.notes.tab_id, "notes.tab_id")?;
        self.notes.surface = expand::expand_env(&self.notes.surface, "notes.surface")?;

        Ok(())
    }
}
