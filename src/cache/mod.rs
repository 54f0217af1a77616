//! # Graph Cache
//!
//! Built graphs keyed by map id, reused while the map's revision is
//! unchanged.
//!
//! ## Locking
//!
//! - The slot table is a `Mutex<HashMap<MapId, Arc<Slot>>>`, held only long
//!   enough to find or create a slot.
//! - Each slot has its own `Mutex`, held for the whole of a build. A second
//!   caller for the same map blocks on it and then sees the finished graph;
//!   callers for other maps are not affected.
//! - Slots are never removed while they hold a graph. `invalidate` and
//!   `clear` empty the slot in place, waiting for any in-flight build, so a
//!   later caller still queues behind the same mutex.
//! - Lock order is slot entry, then table. Nothing waits on an entry while
//!   holding the table.
//!
//! A failed build leaves the slot as it was. A failed first build removes the
//! empty slot; callers that were queued on it notice and retry.

use std::sync::Arc;
use hashbrown::HashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::graph::NavigationGraph;
use crate::model::{Map, MapId};
use crate::Result;

/// Per-map-id cache of navigation graphs.
#[derive(Default)]
pub struct GraphCache {
    slots: Mutex<HashMap<MapId, Arc<Slot>>>,
}

#[derive(Default)]
struct Slot {
    entry: Mutex<Option<CachedGraph>>,
}

struct CachedGraph {
    revision: u64,
    graph: Arc<NavigationGraph>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached graph for `id` if it was built from `map.revision`,
    /// otherwise build it from `map`, cache it, and return it.
    pub fn get_or_build(&self, id: &MapId, map: &Map) -> Result<Arc<NavigationGraph>> {
        loop {
            let slot = {
                let mut slots = self.slots.lock();
                Arc::clone(slots.entry(id.clone()).or_default())
            };

            let mut entry = slot.entry.lock();
            if !self.is_current(id, &slot) {
                // Pruned after a failed build while we waited on it.
                continue;
            }

            if let Some(cached) = entry.as_ref() {
                if cached.revision == map.revision {
                    debug!(map_id = %id, revision = map.revision, "graph cache hit");
                    return Ok(Arc::clone(&cached.graph));
                }
                debug!(
                    map_id = %id,
                    cached = cached.revision,
                    current = map.revision,
                    "cached graph is stale, rebuilding"
                );
            } else {
                debug!(map_id = %id, revision = map.revision, "graph cache miss");
            }

            return match NavigationGraph::build(map) {
                Ok(graph) => {
                    let graph = Arc::new(graph);
                    *entry = Some(CachedGraph { revision: map.revision, graph: Arc::clone(&graph) });
                    Ok(graph)
                }
                Err(e) => {
                    if entry.is_none() {
                        self.slots.lock().remove(id);
                    }
                    Err(e)
                }
            };
        }
    }

    /// The cached graph for `id`, whatever revision it was built from.
    pub fn get(&self, id: &MapId) -> Option<Arc<NavigationGraph>> {
        let slot = self.slots.lock().get(id).cloned()?;
        let entry = slot.entry.lock();
        entry.as_ref().map(|c| Arc::clone(&c.graph))
    }

    /// Revision the cached graph for `id` was built from.
    pub fn revision(&self, id: &MapId) -> Option<u64> {
        let slot = self.slots.lock().get(id).cloned()?;
        let entry = slot.entry.lock();
        entry.as_ref().map(|c| c.revision)
    }

    /// Drop the cached graph for `id`. Returns true if there was one.
    ///
    /// Waits for a build of `id` in progress and drops its result.
    pub fn invalidate(&self, id: &MapId) -> bool {
        let Some(slot) = self.slots.lock().get(id).cloned() else {
            return false;
        };
        let removed = slot.entry.lock().take().is_some();
        if removed {
            debug!(map_id = %id, "graph cache entry invalidated");
        }
        removed
    }

    pub fn clear(&self) {
        for slot in self.snapshot() {
            slot.entry.lock().take();
        }
    }

    /// Number of cached graphs.
    pub fn len(&self) -> usize {
        self.snapshot()
            .iter()
            .filter(|slot| slot.entry.lock().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Vec<Arc<Slot>> {
        self.slots.lock().values().cloned().collect()
    }

    fn is_current(&self, id: &MapId, slot: &Arc<Slot>) -> bool {
        self.slots
            .lock()
            .get(id)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
    }
}

// ============================================================================
// Tests
// ============================================================================
