//! In-memory map store.
//!
//! This is the reference implementation of `MapStore`. Maps live in a
//! HashMap protected by an RwLock; loads hand out clones.
//!
//! Every insert stamps a revision higher than any the store has handed out
//! before, including for maps that were removed and inserted again, so
//! cached graphs built from older content are never reused.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use hashbrown::HashMap;
use parking_lot::RwLock;
use async_trait::async_trait;
use tracing::debug;

use crate::model::{Map, MapId};
use crate::{Error, Result};
use super::MapStore;

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory map storage. Cloning shares the same underlying maps.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    maps: RwLock<HashMap<MapId, Map>>,
    /// Lowest revision the next insert may carry.
    next_revision: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a map. Returns the revision the stored map carries.
    ///
    /// The map keeps its own revision if that is already above every
    /// revision issued so far; otherwise it is raised to the next one.
    pub fn insert(&self, id: impl Into<MapId>, mut map: Map) -> u64 {
        let id = id.into();
        let mut maps = self.inner.maps.write();
        let floor = self.inner.next_revision.load(Ordering::Relaxed);
        map.revision = map.revision.max(floor);
        self.inner.next_revision.store(map.revision.saturating_add(1), Ordering::Relaxed);
        let revision = map.revision;
        debug!(map_id = %id, revision, "map stored");
        maps.insert(id, map);
        revision
    }

    /// Remove a map. Returns it if it existed.
    pub fn remove(&self, id: &MapId) -> Option<Map> {
        self.inner.maps.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.inner.maps.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.maps.read().is_empty()
    }

    pub fn ids(&self) -> Vec<MapId> {
        let mut ids: Vec<MapId> = self.inner.maps.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl MapStore for MemoryStore {
    async fn load_map(&self, id: &MapId) -> Result<Map> {
        self.inner
            .maps
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::MapNotFound(id.clone()))
    }

    async fn contains_map(&self, id: &MapId) -> Result<bool> {
        Ok(self.inner.maps.read().contains_key(id))
    }
}

// ============================================================================
// Tests
// ============================================================================
