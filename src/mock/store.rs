//! Process-wide holder of the current mock configuration.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::mock::configuration::MockConfiguration;

/// Single shared cell holding the active [`MockConfiguration`].
///
/// Readers get an `Arc` snapshot; writers swap the whole value. A reader
/// therefore sees either the old or the new configuration, never a mix.
#[derive(Debug, Default)]
pub struct MockStore {
    current: ArcSwapOption<MockConfiguration>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active configuration. Returns the one it superseded.
    pub fn replace(&self, config: MockConfiguration) -> Option<Arc<MockConfiguration>> {
        self.current.swap(Some(Arc::new(config)))
    }

    /// Snapshot of the active configuration; `None` until the first generation.
    pub fn current(&self) -> Option<Arc<MockConfiguration>> {
        self.current.load_full()
    }
}
