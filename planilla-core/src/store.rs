//! Shared lineup holder for UIs that render while edits arrive.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::lineup::Lineup;

/// Cheap-to-clone handle around the session's lineup.
///
/// Readers take snapshots; writers go through [`LineupStore::update`].
#[derive(Debug, Clone, Default)]
pub struct LineupStore {
    inner: Arc<RwLock<Lineup>>,
}

impl LineupStore {
    pub fn new(lineup: Lineup) -> Self {
        Self { inner: Arc::new(RwLock::new(lineup)) }
    }

    /// Copy of the current state; later edits do not affect it.
    pub fn snapshot(&self) -> Lineup {
        self.inner.read().clone()
    }

    pub fn update<R>(&self, edit: impl FnOnce(&mut Lineup) -> R) -> R {
        let mut guard = self.inner.write();
        edit(&mut *guard)
    }
}
