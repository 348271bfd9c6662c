//! Resolver settings and validation.
//!
//! These are pure domain types with no infrastructure dependencies. Values
//! come from the environment (optionally via a `.env` file loaded by the
//! adapter).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Startup timeout applied when neither the selection nor the catalog set one.
pub const DEFAULT_STARTUP_TIMEOUT_MS: u64 = 30_000;

/// Upper bound accepted for any configured startup timeout (10 minutes).
///
/// Enforced on the global default, on catalog servers and on selection
/// overrides when they are written.
pub const MAX_STARTUP_TIMEOUT_MS: u64 = 600_000;

/// Environment variable overriding the global default startup timeout.
pub const STARTUP_TIMEOUT_ENV: &str = "AGENTUI_DEFAULT_STARTUP_TIMEOUT_MS";

/// Errors from settings validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// A value could not be parsed.
    #[error("Invalid value for {key}: {value}")]
    Unparseable { key: String, value: String },

    /// A value is outside its accepted range.
    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: String,
        value: u64,
        min: u64,
        max: u64,
    },
}

/// Global defaults used by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Fallback startup timeout in milliseconds.
    pub default_startup_timeout_ms: u64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            default_startup_timeout_ms: DEFAULT_STARTUP_TIMEOUT_MS,
        }
    }
}

impl ResolverSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an injectable lookup (for testing).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        if let Some(raw) = lookup(STARTUP_TIMEOUT_ENV) {
            let value = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| SettingsError::Unparseable {
                    key: STARTUP_TIMEOUT_ENV.to_string(),
                    value: raw.clone(),
                })?;
            settings.default_startup_timeout_ms = value;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Check every value is within range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.default_startup_timeout_ms == 0
            || self.default_startup_timeout_ms > MAX_STARTUP_TIMEOUT_MS
        {
            return Err(SettingsError::OutOfRange {
                key: STARTUP_TIMEOUT_ENV.to_string(),
                value: self.default_startup_timeout_ms,
                min: 1,
                max: MAX_STARTUP_TIMEOUT_MS,
            });
        }
        Ok(())
    }
}
