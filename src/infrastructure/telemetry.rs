//! Structured logging setup.

use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Builder for the process-wide `tracing` subscriber.
#[derive(Debug, Clone)]
pub struct TelemetryBuilder {
    service_name: String,
    log_level: String,
    json: bool,
}

impl TelemetryBuilder {
    /// Creates a builder logging at `info` in human-readable form.
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            log_level: "info".to_owned(),
            json: false,
        }
    }

    /// Sets the default filter directive. `RUST_LOG` still takes precedence.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switches output to JSON lines.
    #[must_use]
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Installs the subscriber globally.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter directive is invalid or a global
    /// subscriber is already installed.
    pub fn init(self) -> Result<()> {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&self.log_level)
                .with_context(|| format!("invalid log level '{}'", self.log_level))?,
        };

        let registry = Registry::default().with(env_filter);
        if self.json {
            registry
                .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
                .try_init()
                .context("Failed to init subscriber")?;
        } else {
            registry
                .with(fmt::layer())
                .try_init()
                .context("Failed to init subscriber")?;
        }

        tracing::info!(service = %self.service_name, json = self.json, "logging initialised");
        Ok(())
    }
}
