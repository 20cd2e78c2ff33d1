//! Last-known system state

use aether_bar_types::{MetricKey, PartialUpdate, SystemState};
use std::collections::BTreeSet;

/// Holds the last-known value of every metric.
///
/// Updates are merged shallowly, last write wins per key, and the state is
/// never rolled back.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    state: SystemState,
}

impl StateStore {
    pub fn new(state: SystemState) -> Self {
        Self { state }
    }

    /// Store seeded with the bar's startup defaults
    pub fn with_defaults() -> Self {
        Self::new(SystemState::with_defaults())
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// Merge an update and return the keys it contained.
    ///
    /// Every key present in the update is reported, whether or not its
    /// value differs from the stored one.
    pub fn merge(&mut self, update: PartialUpdate) -> BTreeSet<MetricKey> {
        let keys = update.keys();
        for (key, value) in update {
            self.state.set(key, value);
        }
        keys
    }
}
