//! Layered application configuration.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use twinverse_error::ConfigError;
use twinverse_models::GeminiConfig;

/// File read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "twinverse.toml";

const ENV_PREFIX: &str = "TWINVERSE";

/// Top-level configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file,
/// `TWINVERSE__SECTION__KEY` environment variables. `GEMINI_API_KEY` and
/// `DATABASE_URL` are honoured when the prefixed variables are absent.
///
/// # Examples
///
/// ```
/// use twinverse::AppConfig;
///
/// let config = AppConfig::from_toml_str(r#"
///     [gemini]
///     api_key = "test-key"
///     max_attempts = 3
/// "#).expect("valid config");
///
/// assert_eq!(*config.gemini().max_attempts(), 3);
/// assert_eq!(*config.database().max_connections(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct AppConfig {
    /// Gemini client settings
    gemini: GeminiConfig,
    /// PostgreSQL settings
    #[serde(default)]
    database: DatabaseConfig,
    /// Tracing settings
    #[serde(default)]
    logging: LoggingConfig,
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct DatabaseConfig {
    /// Connection URL; stores fall back to memory when unset
    #[serde(default)]
    url: Option<String>,
    /// Pool size
    #[serde(default = "default_max_connections")]
    max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    filter: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_filter() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from `path` (or [`DEFAULT_CONFIG_FILE`] if present)
    /// and the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an explicitly named file is missing or
    /// any source fails to parse.
    #[tracing::instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::new(&path.to_string_lossy(), FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let builder = base_builder()?.add_source(file).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
        let builder = plain_env_fallback(builder, "gemini.api_key", "GEMINI_API_KEY")?;
        let builder = plain_env_fallback(builder, "database.url", "DATABASE_URL")?;

        let config = finish(builder)?;
        debug!(
            model = %config.gemini.model(),
            database = config.database.url.is_some(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration from TOML text only.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text does not parse.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        finish(base_builder()?.add_source(File::from_str(content, FileFormat::Toml)))
    }

    /// Fails unless a non-blank Gemini API key is configured.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the variables that can supply it.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        let key = self.gemini.api_key().trim();
        if key.is_empty() {
            return Err(ConfigError::new(
                "Gemini API key missing: set GEMINI_API_KEY or gemini.api_key",
            ));
        }
        Ok(key)
    }
}

fn base_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("gemini.api_key", "")
        .map_err(|e| ConfigError::new(format!("Invalid default: {}", e)))
}

/// Applies `var` to `key` unless the prefixed variable for `key` is set.
fn plain_env_fallback(
    builder: ConfigBuilder<DefaultState>,
    key: &str,
    var: &str,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let prefixed = format!("{}__{}", ENV_PREFIX, key.replace('.', "__").to_uppercase());
    if std::env::var_os(&prefixed).is_some() {
        return Ok(builder);
    }
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => builder
            .set_override(key, value)
            .map_err(|e| ConfigError::new(format!("Invalid {}: {}", var, e))),
        _ => Ok(builder),
    }
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = builder
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to read configuration: {}", e)))?
        .try_deserialize()
        .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
    if *config.gemini.max_attempts() == 0 {
        return Err(ConfigError::new("gemini.max_attempts must be at least 1"));
    }
    Ok(config)
}
