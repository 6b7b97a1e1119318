//! Mock configuration subsystem.
//!
//! # Data Flow
//! ```text
//! service names
//!     → slug.rs (normalize to identifiers)
//!     → credential.rs (AAA-DDDD-BBB key)
//!     → configuration.rs (payload template + route pair)
//!     → store.rs (atomic swap into the single live cell)
//!     → read by every live mock request
//! ```
//!
//! # Design Decisions
//! - Exactly one configuration is live; replacing it is the only mutation
//! - Configurations are immutable values behind an `Arc`
//! - Nothing here touches the router; route installation lives in `routing`

pub mod configuration;
pub mod credential;
pub mod slug;
pub mod store;

pub use configuration::{payload_template, Envelope, MockConfiguration, PayloadTemplate, RoutePair};
pub use credential::Credential;
pub use slug::Slug;
pub use store::MockStore;
