use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreResult;
use crate::id::SnapshotId;
use crate::traits::{ReadOutcome, SnapshotStore};

/// In-memory, HashMap-based snapshot store.
///
/// Intended for tests and embedding. Snapshots are held behind a `RwLock`
/// and cloned on read/write.
pub struct InMemorySnapshotStore {
    snapshots: RwLock<HashMap<SnapshotId, String>>,
}

impl InMemorySnapshotStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(HashMap::new()),
        }
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no snapshot is recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.read().expect("lock poisoned").is_empty()
    }

    /// Return a sorted list of all recorded identifiers.
    pub fn ids(&self) -> Vec<SnapshotId> {
        let map = self.snapshots.read().expect("lock poisoned");
        let mut ids: Vec<SnapshotId> = map.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Remove all snapshots.
    pub fn clear(&self) {
        self.snapshots.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn read(&self, id: &SnapshotId) -> StoreResult<ReadOutcome> {
        let map = self.snapshots.read().expect("lock poisoned");
        Ok(match map.get(id) {
            Some(text) => ReadOutcome::Found(text.clone()),
            None => ReadOutcome::NotFound,
        })
    }

    fn write(&self, id: &SnapshotId, text: &str) -> StoreResult<()> {
        let mut map = self.snapshots.write().expect("lock poisoned");
        map.insert(id.clone(), text.to_string());
        Ok(())
    }

    fn exists(&self, id: &SnapshotId) -> StoreResult<bool> {
        let map = self.snapshots.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }

    fn location(&self, id: &SnapshotId) -> String {
        format!("memory:{id}")
    }
}

impl std::fmt::Debug for InMemorySnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySnapshotStore")
            .field("snapshot_count", &self.len())
            .finish()
    }
}
