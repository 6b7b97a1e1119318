//! Live route table.
//!
//! # Responsibilities
//! - Store routes installed at runtime
//! - Look up the route for a request path and method
//! - Return matched handler or explicit no-match
//!
//! # Design Decisions
//! - Path → route map; inserting an existing path overwrites it
//! - Lookups take a short shard lock and release it before the handler runs
//! - O(1) exact path lookup, no prefix or pattern matching

use std::fmt;
use std::sync::Arc;

use axum::http::{HeaderMap, Method};
use axum::response::Response;
use dashmap::DashMap;

use crate::error::ApiError;

/// Request handler installed for a live path.
pub type MockHandler = Arc<dyn Fn(&HeaderMap) -> Response + Send + Sync>;

/// A single entry of the live route table.
#[derive(Clone)]
pub struct RegisteredRoute {
    pub path: String,
    pub method: Method,
    pub handler: MockHandler,
}

impl fmt::Debug for RegisteredRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredRoute")
            .field("path", &self.path)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

/// Routes added while the server is running.
#[derive(Debug, Default)]
pub struct LiveRouter {
    routes: DashMap<String, RegisteredRoute>,
}

impl LiveRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, replacing any route already at that path.
    ///
    /// Returns `true` when the path was not registered before.
    pub fn insert(&self, route: RegisteredRoute) -> bool {
        self.routes.insert(route.path.clone(), route).is_none()
    }

    /// Find and run the handler for a request.
    pub fn dispatch(&self, method: &Method, path: &str, headers: &HeaderMap) -> Result<Response, ApiError> {
        let (route_method, handler) = match self.routes.get(path) {
            Some(entry) => (entry.method.clone(), entry.handler.clone()),
            None => return Err(ApiError::NotFound("Not Found".to_string())),
        };

        if *method != route_method {
            return Err(ApiError::MethodNotAllowed);
        }

        Ok(handler(headers))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.routes.iter().map(|r| r.key().clone()).collect();
        paths.sort();
        paths
    }
}
