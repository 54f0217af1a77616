//! # navigo — Indoor Navigation Graph and Route Search
//!
//! Builds a navigation graph from a mapped indoor space (points of interest
//! plus the walkable paths between them) and finds the shortest route
//! between two points with A*.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `MapStore` is the contract between the navigator and
//!    wherever maps are persisted
//! 2. **Clean DTOs**: `Point`, `Map`, `Path`, `Route` cross all boundaries
//! 3. **Explicit state**: a graph is a value returned from `build_graph` and
//!    passed to the search; the search keeps nothing between calls
//! 4. **No route is not an error**: `RouteOutcome::NoRoute` is a result,
//!    failures are `Error`
//!
//! ## Quick Start
//!
//! ```rust
//! use navigo::{Map, Navigator, Point, RouteOutcome};
//!
//! # async fn example() -> navigo::Result<()> {
//! let nav = Navigator::open_memory();
//! nav.store().insert("level-1", Map::new("Level 1", Point::new("origin", 0.0, 0.0, 0.0))
//!     .with_poi(Point::new("lobby", 0.0, 0.0, 0.0))
//!     .with_poi(Point::new("cafe", 12.0, 5.0, 0.0))
//!     .with_path("lobby", "cafe"));
//!
//! match nav.route(&"level-1".into(), "lobby", "cafe").await? {
//!     RouteOutcome::Found(route) => println!("{:?} ({:.1} m)", route.labels(), route.cost()),
//!     RouteOutcome::NoRoute => println!("unreachable"),
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod search;
pub mod store;
pub mod cache;
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{Point, Map, MapId, Path, Route};
pub use graph::{NavigationGraph, build_graph};
pub use search::{RouteOutcome, find_route, find_route_with};
pub use store::{MapStore, MemoryStore};
pub use cache::GraphCache;
pub use config::{NavigatorConfig, SearchConfig};

// ============================================================================
// Top-level Navigator handle
// ============================================================================

/// The primary entry point. A `Navigator` wraps a map store, caches the
/// graphs it builds, and answers route requests.
pub struct Navigator<S: MapStore> {
    store: S,
    cache: GraphCache,
    config: NavigatorConfig,
}

impl<S: MapStore> Navigator<S> {
    /// Create a Navigator over the given store with default settings.
    pub fn with_store(store: S) -> Self {
        Self::with_config(store, NavigatorConfig::default())
    }

    pub fn with_config(store: S, config: NavigatorConfig) -> Self {
        Self { store, cache: GraphCache::new(), config }
    }

    /// Load a map and return its navigation graph, from cache when the map
    /// revision is unchanged.
    pub async fn graph(&self, map_id: &MapId) -> Result<Arc<NavigationGraph>> {
        let map = self.store.load_map(map_id).await?;
        if self.config.cache_graphs {
            self.cache.get_or_build(map_id, &map)
        } else {
            Ok(Arc::new(NavigationGraph::build(&map)?))
        }
    }

    /// Find the shortest route between two POIs of a map.
    pub async fn route(&self, map_id: &MapId, start: &str, end: &str) -> Result<RouteOutcome> {
        let graph = self.graph(map_id).await?;
        find_route_with(&graph, start, end, &self.config.search)
    }

    /// Drop the cached graph for a map so the next request rebuilds it.
    pub fn invalidate(&self, map_id: &MapId) -> bool {
        self.cache.invalidate(map_id)
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &GraphCache {
        &self.cache
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }
}

/// In-memory navigator for testing and embedding.
impl Navigator<MemoryStore> {
    pub fn open_memory() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed map: {0}")]
    MalformedMap(String),

    #[error("Unknown point: '{0}'")]
    UnknownPoint(String),

    #[error("Map not found: {0}")]
    MapNotFound(MapId),

    #[error("Search timed out after expanding {expanded} points in {elapsed:?}")]
    SearchTimeout { expanded: usize, elapsed: Duration },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
