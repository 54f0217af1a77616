//! # Map Store Trait
//!
//! The read contract between the navigator and wherever maps live. Fetching
//! a map is the only I/O in a route request and always happens before the
//! graph is built or searched.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory for testing/embedding |

pub mod memory;

use async_trait::async_trait;
use crate::model::{Map, MapId};
use crate::{Error, Result};

pub use memory::MemoryStore;

/// Read access to persisted maps.
///
/// Implementations return `Error::MapNotFound` for an unknown id and
/// `Error::Storage` for anything else that goes wrong. Retrying is the
/// caller's business.
#[async_trait]
pub trait MapStore: Send + Sync + 'static {
    /// Load a whole map by id.
    async fn load_map(&self, id: &MapId) -> Result<Map>;

    /// Whether a map exists.
    ///
    /// Default: attempts a full load and maps `MapNotFound` to `false`.
    async fn contains_map(&self, id: &MapId) -> Result<bool> {
        match self.load_map(id).await {
            Ok(_) => Ok(true),
            Err(Error::MapNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
