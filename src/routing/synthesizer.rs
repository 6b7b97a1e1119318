//! Builds mock handlers and installs them into the live route table.

use std::sync::Arc;

use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ApiError;
use crate::mock::{MockStore, RoutePair};
use crate::observability::metrics;
use crate::routing::router::{LiveRouter, MockHandler, RegisteredRoute};
use crate::security::AuthGuard;

/// Installs read-through mock handlers.
///
/// Handlers never capture a configuration. Each call loads the store, so a
/// path registered by an old generation still serves the newest payload,
/// credential and auth setting.
#[derive(Debug, Clone)]
pub struct RouteSynthesizer {
    store: Arc<MockStore>,
    router: Arc<LiveRouter>,
    guard: AuthGuard,
}

impl RouteSynthesizer {
    pub fn new(store: Arc<MockStore>, router: Arc<LiveRouter>, guard: AuthGuard) -> Self {
        Self { store, router, guard }
    }

    /// Make both paths live. Already-registered paths are overwritten.
    ///
    /// Returns how many paths were new to the table.
    pub fn install(&self, routes: &RoutePair) -> usize {
        let mut added = 0;
        for path in routes.iter() {
            let fresh = self.router.insert(RegisteredRoute {
                path: path.to_string(),
                method: Method::GET,
                handler: self.handler(),
            });
            if fresh {
                added += 1;
                tracing::info!(path = %path, "Live route registered");
            } else {
                tracing::debug!(path = %path, "Live route refreshed");
            }
        }
        metrics::record_live_routes(self.router.len());
        added
    }

    fn handler(&self) -> MockHandler {
        let store = self.store.clone();
        let guard = self.guard.clone();
        Arc::new(move |headers: &HeaderMap| serve_mock(&store, &guard, headers))
    }
}

/// Answer one live mock request from the configuration of the moment.
fn serve_mock(store: &MockStore, guard: &AuthGuard, headers: &HeaderMap) -> Response {
    // One snapshot per request: auth and payload always come from the same generation.
    let Some(config) = store.current() else {
        return ApiError::NotFound("No mock has been generated yet".to_string()).into_response();
    };

    match guard.verify(&config, headers) {
        Ok(()) => Json(config.envelope()).into_response(),
        Err(err) => {
            tracing::warn!(header = %guard.header(), "Live mock request rejected");
            err.into_response()
        }
    }
}
