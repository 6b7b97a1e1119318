//! SpecForge mock API generator library.
//!
//! Generates a mock HTTP API for a pair of services: a downloadable source
//! file, plus the same mock mounted live in the running server.

// Core subsystems
pub mod config;
pub mod error;
pub mod generator;
pub mod http;
pub mod mock;
pub mod routing;

// Outputs
pub mod artifact;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::ServiceConfig;
pub use error::ApiError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
