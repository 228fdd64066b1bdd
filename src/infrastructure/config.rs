//! Layered runtime configuration.
//!
//! Values come from built-in defaults, then an optional `followup.toml` in
//! the working directory, then `FOLLOWUP__*` environment variables with `__`
//! separating nested keys (for example `FOLLOWUP__STORE__BACKEND=postgres`).

use chrono::FixedOffset;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

const CONFIG_FILE: &str = "followup";
const ENV_PREFIX: &str = "FOLLOWUP";

/// Complete service configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// Task store settings.
    pub store: StoreSettings,
    /// Calendar-day settings for due-today windows.
    pub calendar: CalendarSettings,
    /// Logging settings.
    pub telemetry: TelemetrySettings,
}

/// HTTP listener settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Which task store implementation to run against.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local store; contents are lost on exit.
    Memory,
    /// `PostgreSQL` through a Diesel connection pool.
    Postgres,
}

/// Task store settings.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    /// Store implementation.
    pub backend: StoreBackend,
    /// Connection URL, required for [`StoreBackend::Postgres`].
    #[serde(default)]
    pub database_url: Option<SecretString>,
    /// Upper bound on each store call, in milliseconds.
    pub timeout_ms: u64,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl StoreSettings {
    /// Returns the per-call store timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Calendar-day settings.
#[derive(Debug, Deserialize, Clone)]
pub struct CalendarSettings {
    /// Offset from UTC, in minutes, at which calendar days begin.
    pub utc_offset_minutes: i32,
}

impl CalendarSettings {
    /// Returns the configured offset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Message`] when the offset is a day or more
    /// away from UTC.
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ConfigError::Message(format!(
                    "calendar.utc_offset_minutes out of range: {}",
                    self.utc_offset_minutes
                ))
            })
    }
}

/// Logging settings.
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Settings {
    /// Loads settings from defaults, the optional config file, and the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be read or a value has
    /// the wrong type.
    pub fn new() -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Loads settings from defaults overlaid with the given variables, as if
    /// they were the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value has the wrong type.
    pub fn from_env_map(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        defaults()?
            .add_source(environment().source(Some(vars)))
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("store.backend", "memory")?
        .set_default("store.timeout_ms", 5000)?
        .set_default("store.pool_size", 8)?
        .set_default("calendar.utc_offset_minutes", 0)?
        .set_default("telemetry.log_level", "info")?
        .set_default("telemetry.json", false)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
