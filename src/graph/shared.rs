//! Store handle shared between writer and reader threads

use super::store::GraphStore;
use std::sync::{Arc, LockResult, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Clonable handle to a [`GraphStore`] behind a read/write lock.
///
/// A writer that panics while holding the lock poisons it; readers then get
/// an error instead of a possibly half-written store.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<GraphStore>>,
}

impl SharedGraph {
    pub fn new(store: GraphStore) -> Self {
        SharedGraph {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn read(&self) -> LockResult<RwLockReadGuard<'_, GraphStore>> {
        self.inner.read()
    }

    pub fn write(&self) -> LockResult<RwLockWriteGuard<'_, GraphStore>> {
        self.inner.write()
    }
}

impl From<GraphStore> for SharedGraph {
    fn from(store: GraphStore) -> Self {
        SharedGraph::new(store)
    }
}
