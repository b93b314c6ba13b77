//! Configuration Module
//!
//! Loads facade and server settings from environment variables and performs
//! the textual checks (`default_ttl`, `object_mode`) before options reach the
//! facade.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::Options;
use crate::engine::Engine;
use crate::error::ConfigError;

/// Facade and server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Namespace of the facade
    pub namespace: String,
    /// Default TTL for entries set without one
    pub default_ttl: Duration,
    /// Store values as JSON documents
    pub object_mode: bool,
    /// HTTP server port
    pub server_port: u16,
    /// Interval between expired-entry sweeps
    pub sweep_interval: Duration,
}

impl Config {
    /// Creates a Config from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_NAMESPACE` - Facade namespace (default: expeditious)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 60000)
    /// - `OBJECT_MODE` - `true` or `false` (default: false)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Creates a Config from any variable lookup; unset variables take their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            namespace: lookup("CACHE_NAMESPACE").unwrap_or(defaults.namespace),
            default_ttl: match lookup("DEFAULT_TTL_MS") {
                Some(raw) => parse_default_ttl(&raw)?,
                None => defaults.default_ttl,
            },
            object_mode: match lookup("OBJECT_MODE") {
                Some(raw) => parse_object_mode(&raw)?,
                None => defaults.object_mode,
            },
            server_port: match lookup("SERVER_PORT") {
                Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidSetting {
                    field: "server_port",
                    value: raw,
                })?,
                None => defaults.server_port,
            },
            sweep_interval: match lookup("SWEEP_INTERVAL") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs)
                    .ok_or(ConfigError::InvalidSetting {
                        field: "sweep_interval",
                        value: raw,
                    })?,
                None => defaults.sweep_interval,
            },
        })
    }

    /// Facade options for this configuration over `engine`.
    pub fn options(&self, engine: Arc<dyn Engine>) -> Options {
        Options::new(self.namespace.clone(), self.default_ttl).engine(engine)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: "expeditious".to_string(),
            default_ttl: Duration::from_millis(60_000),
            object_mode: false,
            server_port: 3000,
            sweep_interval: Duration::from_secs(1),
        }
    }
}

/// Parses a default TTL given in milliseconds. Rejects text that is not a
/// number, NaN, infinities and values that are not positive.
pub fn parse_default_ttl(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDefaultTtl(raw.to_string());

    let millis: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !millis.is_finite() || millis <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(millis / 1000.0).map_err(|_| invalid())
}

/// Parses the object mode flag; only `true` and `false` are booleans.
pub fn parse_object_mode(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidObjectMode(raw.to_string())),
    }
}
