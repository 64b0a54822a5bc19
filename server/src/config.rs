//! Environment-driven server configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (when present) through `dotenvy`, then builds one
//! [`ServerConfig`] from the process environment. Every section reads its
//! variables through an [`EnvReader`], so tests can feed a map instead of
//! mutating the real environment.
//!
//! Unset and blank variables take their defaults. Malformed numbers also
//! fall back, except `PORT` and `DATABASE_URL`, which fail startup.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use crate::rate_limit::RateLimitConfig;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_TTL_HOURS: i64 = 720;
const DEFAULT_AI_MAX_TOKENS: u32 = 1500;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

// =============================================================================
// READER
// =============================================================================

/// Typed access to string settings keyed by variable name.
pub struct EnvReader<F> {
    lookup: F,
}

fn process_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl EnvReader<fn(&str) -> Option<String>> {
    /// Reader over the process environment.
    #[must_use]
    pub fn process() -> Self {
        Self { lookup: process_var }
    }
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Trimmed value, `None` when unset or blank.
    pub fn text(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    /// Parsed value, `default` when unset or unparsable.
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> T {
        self.text(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Whole seconds as a [`Duration`].
    pub fn secs_or(&self, key: &str, default_secs: u64) -> Duration {
        Duration::from_secs(self.parse_or(key, default_secs))
    }

    /// `1/true/yes/on` or `0/false/no/off`, case-insensitive.
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.text(key)?.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
impl EnvReader<Box<dyn Fn(&str) -> Option<String>>> {
    /// Reader over fixed pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Self { lookup: Box::new(move |key: &str| map.get(key).cloned()) }
    }
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Connection pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_DB_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    /// Lifetime of a newly issued session.
    pub session_ttl_hours: i64,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Allowed CORS origin; `None` allows any origin.
    pub cors_allow_origin: Option<String>,
    /// Completion budget for a single AI call.
    pub ai_max_tokens: u32,
    pub pool: PoolSettings,
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Build the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_reader`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(&EnvReader::process())
    }

    /// Build the configuration from `env`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Missing`] when `DATABASE_URL` is unset and
    /// [`ConfigError::Invalid`] when `PORT` is set but not a port number.
    pub fn from_reader<F>(env: &EnvReader<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = env.text("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match env.text("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            port,
            session_ttl_hours: env.parse_or("SESSION_TTL_HOURS", DEFAULT_SESSION_TTL_HOURS).max(1),
            cookie_secure: env.flag("COOKIE_SECURE").unwrap_or(false),
            cors_allow_origin: env.text("CORS_ALLOW_ORIGIN").filter(|v| v != "*"),
            ai_max_tokens: env.parse_or("AI_MAX_TOKENS", DEFAULT_AI_MAX_TOKENS),
            pool: PoolSettings {
                max_connections: env.parse_or("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS).max(1),
                acquire_timeout: env.secs_or("DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_DB_ACQUIRE_TIMEOUT_SECS),
            },
            rate_limit: RateLimitConfig::from_reader(env),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            port: DEFAULT_PORT,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            cookie_secure: false,
            cors_allow_origin: None,
            ai_max_tokens: DEFAULT_AI_MAX_TOKENS,
            pool: PoolSettings::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
