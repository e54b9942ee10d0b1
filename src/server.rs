//! HTTP server initialization and runtime setup.
//!
//! Selects backends from the configuration, wires the services and runs the
//! Axum server until a shutdown signal arrives.

use crate::config::Config;
use crate::domain::repositories::{BookmarkRepository, CodeStore};
use crate::infrastructure::cache::{CacheStore, NullCacheStore, RedisCacheStore};
use crate::infrastructure::persistence::{
    MemoryBookmarkRepository, MemoryCodeStore, PgBookmarkRepository, RedisCodeStore,
};
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

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL bookmark repository (or in-memory fallback)
/// - Redis code store (or in-memory fallback)
/// - Redis listing cache (or `NullCacheStore` fallback)
/// - Axum HTTP server with graceful shutdown
///
/// The schema is expected to exist; no migrations are run.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Redis is configured but the code store cannot connect
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Connects the configured backends and builds the shared state.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let bookmark_repository = connect_bookmark_repository(config).await?;
    let (code_store, cache) = connect_redis_backends(config).await?;

    Ok(AppState::new(
        bookmark_repository,
        code_store,
        cache,
        config.base_url.clone(),
        config.short_url_max_ttl_seconds,
    ))
}

async fn connect_bookmark_repository(config: &Config) -> Result<Arc<dyn BookmarkRepository>> {
    let Some(ref database_url) = config.database_url else {
        tracing::warn!("DATABASE_URL not set. Bookmarks are kept in memory and lost on restart.");
        return Ok(Arc::new(MemoryBookmarkRepository::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    Ok(Arc::new(PgBookmarkRepository::new(Arc::new(pool))))
}

async fn connect_redis_backends(
    config: &Config,
) -> Result<(Arc<dyn CodeStore>, Arc<dyn CacheStore>)> {
    let Some(ref redis_url) = config.redis_url else {
        tracing::warn!("REDIS_URL not set. Short codes are kept in memory; caching disabled.");
        return Ok((Arc::new(MemoryCodeStore::new()), Arc::new(NullCacheStore::new())));
    };

    let timeout = config.store_timeout();

    let code_store = RedisCodeStore::connect(redis_url, timeout)
        .await
        .context("Failed to connect code store to Redis")?;
    tracing::info!("Code store enabled (Redis)");

    let cache: Arc<dyn CacheStore> = match RedisCacheStore::connect(redis_url, timeout).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect cache to Redis: {}. Using NullCacheStore.", e);
            Arc::new(NullCacheStore::new())
        }
    };

    Ok((Arc::new(code_store), cache))
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
