//! Package configuration and credential resolution.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$FREESEND_CONFIG` (environment variable)
//! 2. `~/.config/freesend/config.toml` (Linux/macOS)
//!    `%APPDATA%\freesend\config.toml` (Windows)
//! 3. Built-in defaults (everything unset)
//!
//! Credentials resolve through an explicit first-match-wins chain at mailer
//! construction time:
//!
//! | Setting | Order |
//! |---------|-------|
//! | api key | mailer override → config `api_key` → `FREESEND_API_KEY` |
//! | endpoint | mailer override → config `endpoint` → `FREESEND_ENDPOINT` → [`DEFAULT_ENDPOINT`] |
//!
//! A missing api key after all fallbacks is a configuration error raised
//! immediately, never deferred to send time.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FreesendError, Result};

/// Fixed production endpoint used when nothing overrides it.
pub const DEFAULT_ENDPOINT: &str = "https://api.freesend.app/v1/send";

/// Environment variable supplying the api key.
pub const API_KEY_ENV: &str = "FREESEND_API_KEY";

/// Environment variable supplying the endpoint.
pub const ENDPOINT_ENV: &str = "FREESEND_ENDPOINT";

/// Package-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default api key for all mailers.
    pub api_key: Option<String>,
    /// Default endpoint for all mailers.
    pub endpoint: Option<String>,
}

/// Per-mailer overrides, highest precedence in the chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MailerSettings {
    /// Api key for this mailer only.
    pub key: Option<String>,
    /// Endpoint for this mailer only.
    pub endpoint: Option<String>,
}

/// Fully resolved, validated credentials for one transport.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub endpoint: String,
}

impl Config {
    /// Load configuration, searching standard locations.
    ///
    /// Returns the default configuration if no file is found or on parse
    /// error. A bad file is reported with a warning, not a failure — the env
    /// var fallbacks may still make the setup usable.
    pub fn load() -> Self {
        if let Some(path) = config_file_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<Self>(&contents) {
                        Ok(cfg) => {
                            tracing::info!(path = %path.display(), "Loaded config");
                            return cfg;
                        }
                        Err(e) => {
                            tracing::warn!(
                                path = %path.display(),
                                error = %e,
                                "Failed to parse config, using defaults"
                            );
                        }
                    },
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to read config file, using defaults"
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Resolve credentials for one mailer, applying the full fallback chain.
    ///
    /// Fails with [`FreesendError::Config`] when the api key is empty after
    /// all sources.
    pub fn resolve(&self, settings: &MailerSettings) -> Result<Credentials> {
        let api_key = first_present([
            settings.key.clone(),
            self.api_key.clone(),
            std::env::var(API_KEY_ENV).ok(),
        ])
        .ok_or_else(|| {
            FreesendError::config(format!(
                "api key is not set: configure the mailer's key, the package \
                 api_key, or the {API_KEY_ENV} environment variable"
            ))
        })?;

        let endpoint = first_present([
            settings.endpoint.clone(),
            self.endpoint.clone(),
            std::env::var(ENDPOINT_ENV).ok(),
        ])
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Credentials { api_key, endpoint })
    }
}

/// First source with a non-blank value wins.
fn first_present<const N: usize>(sources: [Option<String>; N]) -> Option<String> {
    sources
        .into_iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("FREESEND_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("freesend").join("config.toml"))
}
