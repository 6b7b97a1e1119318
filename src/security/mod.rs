//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Live mock request:
//!     → auth.rs (compare credential header with the current configuration)
//!     → permit: mock handler builds the envelope
//!     → reject: 401 with a fixed detail message
//! ```
//!
//! # Design Decisions
//! - Fail closed: missing and wrong credentials are indistinguishable
//! - No caching: the check runs against the configuration of the moment

pub mod auth;

pub use auth::AuthGuard;
