//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, worker spawning, and Axum server lifecycle.

use crate::application::services::UrlService;
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::{AppCache, spawn_sweeper};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::mpsc;

/// How long shutdown waits for queued clicks to be written.
const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - In-memory cache and its expiry sweeper
/// - Background click worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = Arc::new(AppCache::with_config(config.cache_config()));
    let sweeper = spawn_sweeper(&cache, config.cache_check_period());
    tracing::info!(
        period_secs = config.cache_check_period_seconds,
        "Cache enabled (in-memory)"
    );

    let repository: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(Arc::new(pool)));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(click_rx, Arc::clone(&repository)));
    tracing::info!("Click worker started");

    let url_service = UrlService::new(
        repository,
        Arc::clone(&cache),
        click_tx,
        config.url_service_settings(),
    );
    let state = AppState::new(Arc::new(url_service));

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router held the last click sender; the worker drains what is left.
    match tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(error = %e, "Click worker terminated abnormally"),
        Err(_) => tracing::warn!("Click worker did not drain in time, pending clicks lost"),
    }

    sweeper.abort();
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
