//! # Navigation Map Model
//!
//! Plain DTOs describing a mapped indoor space: labeled points, the map
//! document that owns them, the walkable connections between them, and the
//! routes handed back to callers.
//!
//! Design rule: this module is pure data. No I/O, no state, no async.
//! Validation happens in `graph::NavigationGraph::build`, not here.

pub mod point;
pub mod map;
pub mod route;

pub use point::{Point, euclidean};
pub use map::{Map, MapId, Path};
pub use route::Route;
