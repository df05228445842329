//! HTTP server for the landing page and API endpoints
//!
//! Serves the win probability page, the JSON probability and profile
//! endpoints, and health/metrics using Axum.

use crate::service::AppState;
use crate::web::handlers::{
    health_handler, metrics_handler, page_handler, player_handler, probability_handler,
};
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

/// Page server configuration
#[derive(Debug, Clone)]
pub struct PageServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host to bind to (typically "0.0.0.0" for all interfaces)
    pub host: String,
}

impl Default for PageServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl PageServerConfig {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Self {
        Self {
            port: config.service.http_port,
            host: config.service.http_host.clone(),
        }
    }
}

/// HTTP server with graceful shutdown
pub struct PageServer {
    config: PageServerConfig,
    state: Arc<AppState>,
    shutdown_tx: watch::Sender<bool>,
}

/// Build the router with every endpoint
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/probability", get(probability_handler))
        .route("/players/{player_id}", get(player_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

impl PageServer {
    pub fn new(config: PageServerConfig, state: Arc<AppState>) -> Self {
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            config,
            state,
            shutdown_tx,
        }
    }

    /// Bind and serve until [`PageServer::stop`] is called
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .context("Invalid page server address")?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let app = create_router(self.state.clone());
        info!("Page server listening on http://{}", listener.local_addr()?);

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.wait_for(|stopped| *stopped).await;
                info!("Page server shutdown signal received");
            })
            .await?;

        info!("Page server stopped");
        Ok(())
    }

    /// Signal the server to stop accepting connections
    pub fn stop(&self) {
        info!("Stopping page server...");
        self.shutdown_tx.send_replace(true);
    }
}
