//! Configuration module for the finance API.
//!
//! Loads `config.yaml`, interpolates environment variables and validates the
//! result.
//!
//! # Usage
//!
//! ```rust,ignore
//! use finance_api::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod application;
mod cache;
mod localization;
mod observability;
mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use application::ApplicationConfig;
pub use cache::CacheConfig;
pub use localization::LocalizationConfig;
pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};
pub use server::ServerConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Currency, user group, paging and seed settings.
    #[serde(default)]
    pub application: ApplicationConfig,
    /// Translation tables.
    #[serde(default)]
    pub localization: LocalizationConfig,
    /// Response caching.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables without a default become empty.
#[allow(clippy::expect_used)] // constant pattern
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must not be 0".to_string(),
        ));
    }

    let app = &config.application;
    if app.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "application.page_size must be positive".to_string(),
        ));
    }
    if !is_currency_code(&app.native_currency) {
        return Err(ConfigError::ValidationError(format!(
            "application.native_currency '{}' is not a 3-letter ISO code",
            app.native_currency
        )));
    }
    for (code, rate) in &app.fallback_rates {
        if !is_currency_code(code) {
            return Err(ConfigError::ValidationError(format!(
                "application.fallback_rates key '{code}' is not a 3-letter ISO code"
            )));
        }
        if rate.is_sign_negative() || rate.is_zero() {
            return Err(ConfigError::ValidationError(format!(
                "application.fallback_rates.{code} must be positive"
            )));
        }
    }

    let l10n = &config.localization;
    if l10n.locales.is_empty() {
        return Err(ConfigError::ValidationError(
            "localization.locales must not be empty".to_string(),
        ));
    }
    if !l10n.locales.contains(&l10n.fallback_locale) {
        return Err(ConfigError::ValidationError(format!(
            "localization.fallback_locale '{}' must be one of: {:?}",
            l10n.fallback_locale, l10n.locales
        )));
    }
    if !l10n.locales.contains(&l10n.default_locale) {
        return Err(ConfigError::ValidationError(format!(
            "localization.default_locale '{}' must be one of: {:?}",
            l10n.default_locale, l10n.locales
        )));
    }

    Ok(())
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}
