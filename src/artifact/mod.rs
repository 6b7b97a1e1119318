//! Downloadable artifacts.
//!
//! # Data Flow
//! ```text
//! generation values (file name, routes, payload, auth flag, credential)
//!     → render.rs (pure source rendering)
//!     → store.rs (write under the output directory)
//!
//! download request
//!     → store.rs (read by file name) → raw bytes or NotFound
//! ```
//!
//! # Design Decisions
//! - Rendering holds no state and can be tested on its own
//! - Names are single path components; anything else never touches disk
//! - A write failure never undoes the live mock

pub mod render;
pub mod store;

pub use render::{render_artifact, ArtifactSpec};
pub use store::{ArtifactError, ArtifactStore};

use crate::mock::Slug;

/// File name of the artifact for a slug pair.
pub fn artifact_file_name(first: &Slug, second: &Slug) -> String {
    format!("{}_{}_api.rs", first, second)
}
