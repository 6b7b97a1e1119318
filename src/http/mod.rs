//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → static route? handlers.rs (generate / download / health)
//!     → otherwise handlers::dispatch_live → routing::LiveRouter
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use handlers::GenerationResponse;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer, ServerError};
