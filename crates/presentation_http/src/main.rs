//! Affiliate search HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use infrastructure::{
    AppConfig, RakutenItemSearchAdapter, SecurityValidator, SqliteSettingsStore, create_pool,
    init_logging,
};
use presentation_http::{AppState, create_app, set_expose_internal_errors};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the log settings apply
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.logging)?;

    info!("Affiliate search server v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = config.server.port,
        database = %config.database.path,
        "Configuration loaded"
    );

    let warnings = SecurityValidator::validate(&config);
    SecurityValidator::log_warnings(&warnings);
    if SecurityValidator::should_block_startup(&config, &warnings) {
        anyhow::bail!(
            "Refusing to start with critical security issues in production \
             (set AFFILIATE_SEARCH_ALLOW_INSECURE_CONFIG=true to override)"
        );
    }

    set_expose_internal_errors(config.expose_internal_errors());

    // Persistence
    let pool = create_pool(&config.database)
        .map_err(|e| anyhow::anyhow!("Failed to open database: {e}"))?;
    let store = Arc::new(SqliteSettingsStore::new(Arc::new(pool)));

    match store.updated_at().await {
        Ok(Some(updated_at)) => info!(%updated_at, "Settings found"),
        Ok(None) => info!("No settings saved yet"),
        Err(e) => warn!(error = %e, "Failed to read settings timestamp"),
    }

    // Upstream search
    let items = RakutenItemSearchAdapter::new(config.rakuten.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize item search: {e}"))?;

    let state = AppState::new(store, Arc::new(items));
    let app = create_app(state, &config.server);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("API docs: http://{}/swagger-ui", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    let (signalled_tx, signalled_rx) = oneshot::channel();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();

    tokio::select! {
        result = server => result?,
        () = drain_deadline(signalled_rx, shutdown_timeout) => {
            warn!(timeout = ?shutdown_timeout, "Connections still open after shutdown timeout, exiting");
        }
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Resolves `timeout` after the shutdown signal, never if the server stops first
async fn drain_deadline(signalled: oneshot::Receiver<()>, timeout: Duration) {
    if signalled.await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("Waiting up to {:?} for connections to close...", timeout);
    tokio::time::sleep(timeout).await;
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
