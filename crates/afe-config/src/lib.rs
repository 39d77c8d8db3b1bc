// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading, validation, and merging for AFE tooling.
//!
//! [`AfeConfig`] selects the error domain used by an
//! [`ErrorFactory`](afe_error::ErrorFactory) and the log level of the CLI.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use afe_error::{DEFAULT_DOMAIN, ErrorFactory};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory-level issues that do not prevent operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No domain configured; the catalog default is used.
    DefaultDomain,
    /// The domain does not look like a reverse-DNS identifier.
    UnusualDomain {
        /// Configured domain.
        domain: String,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::DefaultDomain => {
                write!(f, "no domain configured, using '{DEFAULT_DOMAIN}'")
            }
            ConfigWarning::UnusualDomain { domain } => {
                write!(f, "domain '{domain}' is not in reverse-DNS form")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct AfeConfig {
    /// Error domain override (e.g. `"com.example.net.error"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Log level override (e.g. `"debug"`, `"info"`, `"warn"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for AfeConfig {
    fn default() -> Self {
        Self {
            domain: None,
            log_level: Some("info".into()),
        }
    }
}

impl AfeConfig {
    /// Domain in effect: the override, or [`DEFAULT_DOMAIN`].
    pub fn effective_domain(&self) -> &str {
        self.domain.as_deref().unwrap_or(DEFAULT_DOMAIN)
    }

    /// Error factory bound to [`effective_domain`](Self::effective_domain).
    pub fn error_factory(&self) -> ErrorFactory {
        ErrorFactory::with_optional_domain(self.domain.as_deref())
    }
}

/// Recognised log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load an [`AfeConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`AfeConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<AfeConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => AfeConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML string into an [`AfeConfig`].
pub fn parse_toml(content: &str) -> Result<AfeConfig, ConfigError> {
    toml::from_str::<AfeConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `AFE_DOMAIN`
/// - `AFE_LOG_LEVEL`
pub fn apply_env_overrides(config: &mut AfeConfig) {
    if let Ok(val) = std::env::var("AFE_DOMAIN") {
        config.domain = Some(val);
    }
    if let Ok(val) = std::env::var("AFE_LOG_LEVEL") {
        config.log_level = Some(val);
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed configuration, returning advisory warnings.
///
/// An empty domain or an unknown log level is a hard
/// [`ConfigError::ValidationError`].
pub fn validate_config(config: &AfeConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if let Some(ref level) = config.log_level
        && !VALID_LOG_LEVELS.contains(&level.as_str())
    {
        errors.push(format!("invalid log_level '{level}'"));
    }

    match config.domain.as_deref() {
        None => warnings.push(ConfigWarning::DefaultDomain),
        Some(d) if d.trim().is_empty() => errors.push("domain must not be empty".into()),
        Some(d) if !is_reverse_dns(d) => warnings.push(ConfigWarning::UnusualDomain {
            domain: d.to_string(),
        }),
        Some(_) => {}
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

fn is_reverse_dns(domain: &str) -> bool {
    let mut labels = 0;
    for label in domain.split('.') {
        if label.is_empty()
            || !label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return false;
        }
        labels += 1;
    }
    labels >= 2
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations. Values in `overlay` take precedence over `base`.
pub fn merge_configs(base: AfeConfig, overlay: AfeConfig) -> AfeConfig {
    AfeConfig {
        domain: overlay.domain.or(base.domain),
        log_level: overlay.log_level.or(base.log_level),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
