//! # Navigation Graph
//!
//! The in-memory adjacency structure derived from one `Map`: every POI is a
//! node, every `Path` is a symmetric edge whose cost is fixed at build time.
//!
//! Built once per map revision and read-only afterwards, so a single graph
//! can be shared (`Arc<NavigationGraph>`) across any number of concurrent
//! searches.
//!
//! ## Validation policy
//!
//! `build` rejects the whole map with `Error::MalformedMap` on:
//! - an empty or duplicate POI label
//! - a non-finite coordinate (calibration point or POI)
//! - a path naming a label that is not a POI (dangling edges are never dropped)
//! - a path connecting a POI to itself
//! - a path cost that is non-finite or shorter than the straight-line distance
//!
//! A path listed more than once collapses into a single edge carrying the
//! cheapest of the listed costs.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::model::{Map, Point, Route, euclidean};
use crate::{Error, Result};

/// Build a navigation graph from a map. Same as `NavigationGraph::build`.
pub fn build_graph(map: &Map) -> Result<NavigationGraph> {
    NavigationGraph::build(map)
}

/// Outgoing edge in node-index space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Edge {
    pub target: usize,
    pub cost: f64,
}

#[derive(Debug, Clone)]
struct GraphNode {
    point: Point,
    edges: SmallVec<[Edge; 4]>,
}

/// Adjacency structure over a map's POIs.
///
/// Node order and per-node edge order follow the map's POI and path order,
/// which keeps search tie-breaks reproducible.
#[derive(Debug, Clone)]
pub struct NavigationGraph {
    name: String,
    calibration: Point,
    nodes: Vec<GraphNode>,
    index: HashMap<String, usize>,
    edge_count: usize,
}

impl NavigationGraph {
    /// Validate `map` and build its graph. The map is not modified.
    pub fn build(map: &Map) -> Result<Self> {
        if !map.calibration_point.is_finite() {
            return Err(malformed(map, format!(
                "calibration point '{}' has a non-finite coordinate",
                map.calibration_point.label
            )));
        }

        let mut nodes: Vec<GraphNode> = Vec::with_capacity(map.points_of_interest.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(map.points_of_interest.len());

        for poi in &map.points_of_interest {
            if poi.label.is_empty() {
                return Err(malformed(map, "point of interest with an empty label"));
            }
            if !poi.is_finite() {
                return Err(malformed(map, format!(
                    "point '{}' has a non-finite coordinate", poi.label
                )));
            }
            match index.entry(poi.label.clone()) {
                Entry::Occupied(_) => {
                    return Err(malformed(map, format!("duplicate point label '{}'", poi.label)));
                }
                Entry::Vacant(slot) => {
                    slot.insert(nodes.len());
                    nodes.push(GraphNode { point: poi.clone(), edges: SmallVec::new() });
                }
            }
        }

        let mut edge_count = 0;
        for path in &map.paths {
            let a = *index.get(path.a.as_str()).ok_or_else(|| {
                malformed(map, format!("path references unknown point '{}'", path.a))
            })?;
            let b = *index.get(path.b.as_str()).ok_or_else(|| {
                malformed(map, format!("path references unknown point '{}'", path.b))
            })?;
            if a == b {
                return Err(malformed(map, format!("path connects '{}' to itself", path.a)));
            }

            let distance = nodes[a].point.distance(&nodes[b].point);
            let cost = match path.cost {
                None => distance,
                Some(c) if c.is_finite() && c >= distance => c,
                Some(c) => {
                    return Err(malformed(map, format!(
                        "path '{}'-'{}' has cost {c}, below straight-line distance {distance}",
                        path.a, path.b
                    )));
                }
            };

            if let Some(existing) = nodes[a].edges.iter().position(|e| e.target == b) {
                trace!(a = %path.a, b = %path.b, "duplicate path collapsed");
                if cost < nodes[a].edges[existing].cost {
                    nodes[a].edges[existing].cost = cost;
                    if let Some(back) = nodes[b].edges.iter_mut().find(|e| e.target == a) {
                        back.cost = cost;
                    }
                }
                continue;
            }
            nodes[a].edges.push(Edge { target: b, cost });
            nodes[b].edges.push(Edge { target: a, cost });
            edge_count += 1;
        }

        debug!(map = %map.name, nodes = nodes.len(), edges = edge_count, "navigation graph built");

        Ok(Self {
            name: map.name.clone(),
            calibration: map.calibration_point.clone(),
            nodes,
            index,
            edge_count,
        })
    }

    /// Name of the map this graph was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn calibration(&self) -> &Point {
        &self.calibration
    }

    /// Number of POI nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// POI labels in map order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.point.label.as_str())
    }

    /// `(neighbor label, edge cost)` pairs for a POI.
    pub fn neighbors(&self, label: &str) -> Result<Vec<(&str, f64)>> {
        let idx = self.require(label)?;
        Ok(self.nodes[idx]
            .edges
            .iter()
            .map(|e| (self.label(e.target), e.cost))
            .collect())
    }

    /// The POI's point (label and coordinates).
    pub fn coordinate_of(&self, label: &str) -> Result<&Point> {
        let idx = self.require(label)?;
        Ok(&self.nodes[idx].point)
    }

    /// Offset of a POI from the calibration point, `[dx, dy, dz]`.
    ///
    /// This is the position a rendering client places relative to its
    /// calibrated anchor.
    pub fn relative_to_calibration(&self, label: &str) -> Result<[f64; 3]> {
        let p = self.coordinate_of(label)?;
        Ok([
            p.x - self.calibration.x,
            p.y - self.calibration.y,
            p.z - self.calibration.z,
        ])
    }

    /// Resolve a route's labels to their points, in route order.
    pub fn waypoints(&self, route: &Route) -> Result<Vec<Point>> {
        route
            .labels()
            .iter()
            .map(|label| self.coordinate_of(label).cloned())
            .collect()
    }

    // ========================================================================
    // Index-space accessors for the search
    // ========================================================================

    pub(crate) fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub(crate) fn require(&self, label: &str) -> Result<usize> {
        self.index_of(label).ok_or_else(|| Error::UnknownPoint(label.to_string()))
    }

    pub(crate) fn label(&self, idx: usize) -> &str {
        &self.nodes[idx].point.label
    }

    pub(crate) fn position(&self, idx: usize) -> [f64; 3] {
        self.nodes[idx].point.coords()
    }

    pub(crate) fn edges(&self, idx: usize) -> &[Edge] {
        &self.nodes[idx].edges
    }

    /// Straight-line distance between two nodes. The search heuristic.
    #[inline]
    pub(crate) fn straight_line(&self, from: usize, to: usize) -> f64 {
        euclidean(self.position(from), self.position(to))
    }
}

fn malformed(map: &Map, reason: impl std::fmt::Display) -> Error {
    warn!(map = %map.name, %reason, "rejecting malformed map");
    Error::MalformedMap(format!("map '{}': {reason}", map.name))
}

// ============================================================================
// Tests
// ============================================================================
