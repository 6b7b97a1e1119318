//! Mock generation.
//!
//! # Data Flow
//! ```text
//! GET /generate_api?app1=..&app2=..&fields=..&require_auth=..
//!     → request.rs (parse query)
//!     → service.rs
//!         validate → credential → payload + routes
//!         → MockStore::replace → RouteSynthesizer::install
//!         → render + write artifact (failure reported, not rolled back)
//!     → GenerationOutcome
//! ```

pub mod request;
pub mod service;

pub use request::GenerationRequest;
pub use service::{GenerationOutcome, MockForge};
