//! Runs the follow-up task HTTP API.
//!
//! Usage:
//!
//! ```text
//! FOLLOWUP__STORE__BACKEND=postgres \
//! FOLLOWUP__STORE__DATABASE_URL=postgres://localhost/followup \
//! followup_api
//! ```
//!
//! See [`followup::infrastructure::config`] for every setting. The
//! `PostgreSQL` backend expects the schema from `migrations/` to be applied.

use anyhow::{Context, Result};
use followup::infrastructure::{
    config::{Settings, StoreBackend},
    server::run_server,
    telemetry::TelemetryBuilder,
};
use followup::task::{
    adapters::{
        memory::InMemoryTaskRepository,
        postgres::{PostgresTaskRepository, build_pool},
    },
    ports::TaskRepository,
    services::TaskLifecycleService,
};
use mockable::DefaultClock;
use secrecy::ExposeSecret;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("failed to load configuration")?;

    TelemetryBuilder::new(env!("CARGO_PKG_NAME"))
        .with_log_level(settings.telemetry.log_level.clone())
        .with_json(settings.telemetry.json)
        .init()?;

    match settings.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; tasks are lost on exit");
            serve_with(&settings, InMemoryTaskRepository::new()).await
        }
        StoreBackend::Postgres => {
            let database_url = settings
                .store
                .database_url
                .as_ref()
                .context("store.database_url is required for the postgres backend")?
                .expose_secret()
                .to_owned();
            let pool_size = settings.store.pool_size;
            let pool = tokio::task::spawn_blocking(move || build_pool(&database_url, pool_size))
                .await?
                .context("failed to connect to PostgreSQL")?;
            serve_with(&settings, PostgresTaskRepository::new(pool)).await
        }
    }
}

async fn serve_with<R>(settings: &Settings, repository: R) -> Result<()>
where
    R: TaskRepository + 'static,
{
    let service = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock))
        .with_day_offset(settings.calendar.offset()?)
        .with_store_timeout(settings.store.timeout());

    tracing::info!(
        backend = ?settings.store.backend,
        day_offset = %service.day_offset(),
        timeout_ms = settings.store.timeout_ms,
        "task service configured"
    );

    run_server(&settings.server, Arc::new(service)).await
}
