//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the static handlers
//! - Fall through to the live route table for generated mocks
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::artifact::ArtifactStore;
use crate::config::ServiceConfig;
use crate::generator::MockForge;
use crate::http::handlers::{dispatch_live, download_api, generate_api, health};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::mock::MockStore;
use crate::routing::{LiveRouter, RouteSynthesizer};
use crate::security::AuthGuard;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forge: Arc<MockForge>,
    pub live: Arc<LiveRouter>,
}

/// Error building the server from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid credential header '{0}'")]
    CredentialHeader(String),
}

/// HTTP server for the generator and its live mocks.
pub struct HttpServer {
    router: Router,
    state: AppState,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, ServerError> {
        let guard = AuthGuard::new(&config.generator.credential_header)
            .map_err(|_| ServerError::CredentialHeader(config.generator.credential_header.clone()))?;

        let store = Arc::new(MockStore::new());
        let live = Arc::new(LiveRouter::new());
        let synthesizer = RouteSynthesizer::new(store.clone(), live.clone(), guard);
        let artifacts = ArtifactStore::new(&config.generator.output_dir);
        let forge = Arc::new(MockForge::new(&config.generator, store, synthesizer, artifacts));

        let state = AppState { forge, live };
        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            state,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/generate_api", get(generate_api))
            .route("/download_api", get(download_api))
            .route("/health", get(health))
            .fallback(dispatch_live)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                    .layer(propagate_request_id_layer()),
            )
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            output_dir = %self.config.generator.output_dir,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
