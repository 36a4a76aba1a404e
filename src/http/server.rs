//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request timeout, request ID)
//! - Hold the shared manager client in application state
//! - Serve with graceful shutdown driven by a broadcast receiver

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::manager::ManagerClient;
use crate::transport::{Transport, UdpTransport};

/// Application state injected into handlers.
///
/// The manager client is the only shared piece, and it is read-only; every
/// request otherwise works with its own state.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<ManagerClient>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration, talking UDP
    /// to the upstream manager.
    pub fn new(config: GatewayConfig) -> Self {
        let transport = Arc::new(UdpTransport::new(Duration::from_millis(
            config.timeouts.upstream_reply_ms,
        )));
        Self::with_transport(config, transport)
    }

    /// Create a server with a custom transport. Tests use this to inject
    /// failing or scripted transports behind the same HTTP surface.
    pub fn with_transport(config: GatewayConfig, transport: Arc<dyn Transport>) -> Self {
        let manager = Arc::new(ManagerClient::new(&config.upstream, transport));
        let state = AppState { manager };
        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/healthcheck", get(handlers::healthcheck))
            .route("/ports", get(handlers::traffic_statistics))
            .route(
                "/ports/{port_number}",
                post(handlers::add_port).delete(handlers::remove_port),
            )
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
