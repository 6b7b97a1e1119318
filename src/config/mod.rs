//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → shared with the HTTP server and generator at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the only runtime-mutable state is the
//!   live mock, which lives in `crate::mock`, not here
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{GeneratorConfig, ListenerConfig, LogFormat, ObservabilityConfig, ServiceConfig};
