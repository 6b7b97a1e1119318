//! Routing subsystem for generated mocks.
//!
//! # Data Flow
//! ```text
//! Generation:
//!     RoutePair
//!     → synthesizer.rs (build read-through handler)
//!     → router.rs (insert or overwrite per path)
//!
//! Incoming request (no static route matched):
//!     → router.rs (exact path lookup, method check)
//!     → handler (auth guard + envelope from the current configuration)
//! ```
//!
//! # Design Decisions
//! - Route existence is fixed at registration; behaviour follows the store
//! - Re-registration overwrites, never duplicates
//! - Routes live until the process exits

pub mod router;
pub mod synthesizer;

pub use router::{LiveRouter, MockHandler, RegisteredRoute};
pub use synthesizer::RouteSynthesizer;
