pub mod handlers;
pub mod models;
pub mod router;

use crate::config::Config;
use crate::history::HistoryStore;
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use std::net::SocketAddr;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub history: HistoryStore,
}

impl AppState {
    pub fn new(history: HistoryStore) -> Self {
        Self { history }
    }
}

pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Binds the server to the configured port and serves until Ctrl+C.
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        // The exporter installs a process-global recorder, so it lives here
        // rather than in the router that tests build repeatedly.
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        let app = router::build(self.state)
            .route(
                "/metrics",
                get(move || std::future::ready(metric_handle.render())),
            )
            .layer(prometheus_layer);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
        tracing::info!("API server listening on http://{}", addr);
        tracing::info!("Health check: http://{}/health", addr);
        tracing::info!("Convert API: http://{}/api/convert", addr);
        tracing::info!("History API: http://{}/api/history", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
