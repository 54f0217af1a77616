//! # Route Search
//!
//! A* over a `NavigationGraph`. The heuristic is the straight-line distance
//! to the goal, the same metric edge costs are derived from, and no edge may
//! cost less than that distance. The heuristic is therefore admissible and
//! consistent, and the first time the goal is popped its route is optimal.
//!
//! The open set is a binary heap keyed by fScore. Entries with equal fScore
//! pop in insertion order, so a given graph and query always produce the
//! same route. Stale heap entries (superseded by a cheaper gScore) are
//! skipped on pop instead of being removed in place.
//!
//! Searches share nothing: all bookkeeping is local to the call, so any
//! number may run at once against the same graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;
use tracing::{debug, trace, warn};

use crate::config::SearchConfig;
use crate::graph::NavigationGraph;
use crate::model::Route;
use crate::{Error, Result};

/// Result of a completed search.
///
/// `NoRoute` is a normal outcome for a disconnected graph, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Found(Route),
    NoRoute,
}

impl RouteOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::NoRoute => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::NoRoute => None,
        }
    }
}

/// Find the cheapest route from `start` to `end` with no search limits.
pub fn find_route(graph: &NavigationGraph, start: &str, end: &str) -> Result<RouteOutcome> {
    find_route_with(graph, start, end, &SearchConfig::default())
}

/// Find the cheapest route from `start` to `end`.
///
/// Fails with `Error::UnknownPoint` if either label is not in the graph, and
/// with `Error::SearchTimeout` if `config` limits are exceeded.
pub fn find_route_with(
    graph: &NavigationGraph,
    start: &str,
    end: &str,
    config: &SearchConfig,
) -> Result<RouteOutcome> {
    let start_idx = graph.require(start)?;
    let goal = graph.require(end)?;

    if start_idx == goal {
        return Ok(RouteOutcome::Found(Route::single(start)));
    }

    let n = graph.len();
    let mut g_score = vec![f64::INFINITY; n];
    let mut came_from: Vec<Option<usize>> = vec![None; n];
    let mut closed = vec![false; n];

    let mut open = BinaryHeap::new();
    let mut seq: u64 = 0;
    g_score[start_idx] = 0.0;
    open.push(OpenEntry {
        f_score: graph.straight_line(start_idx, goal),
        g_score: 0.0,
        seq,
        node: start_idx,
    });

    let deadline = config.deadline();
    let started = Instant::now();
    let mut expanded = 0usize;

    while let Some(OpenEntry { node, g_score: g, .. }) = open.pop() {
        if closed[node] || g > g_score[node] {
            continue;
        }

        if node == goal {
            let route = reconstruct(graph, &came_from, goal, g);
            debug!(start, end, expanded, cost = g, hops = route.len(), "route found");
            return Ok(RouteOutcome::Found(route));
        }

        closed[node] = true;
        expanded += 1;

        let over_budget = config.max_expansions.is_some_and(|max| expanded > max)
            || deadline.is_some_and(|d| started.elapsed() >= d);
        if over_budget {
            let elapsed = started.elapsed();
            warn!(start, end, expanded, ?elapsed, "route search exceeded its limits");
            return Err(Error::SearchTimeout { expanded, elapsed });
        }

        trace!(node = graph.label(node), g, "expanding");

        for edge in graph.edges(node) {
            if closed[edge.target] {
                continue;
            }
            let tentative = g + edge.cost;
            if tentative < g_score[edge.target] {
                g_score[edge.target] = tentative;
                came_from[edge.target] = Some(node);
                seq += 1;
                open.push(OpenEntry {
                    f_score: tentative + graph.straight_line(edge.target, goal),
                    g_score: tentative,
                    seq,
                    node: edge.target,
                });
            }
        }
    }

    debug!(start, end, expanded, "no route");
    Ok(RouteOutcome::NoRoute)
}

/// Walk predecessors back from the goal, then reverse.
fn reconstruct(
    graph: &NavigationGraph,
    came_from: &[Option<usize>],
    goal: usize,
    cost: f64,
) -> Route {
    let mut labels = vec![graph.label(goal).to_string()];
    let mut current = goal;
    while let Some(prev) = came_from[current] {
        labels.push(graph.label(prev).to_string());
        current = prev;
    }
    labels.reverse();
    Route::new(labels, cost)
}

// ============================================================================
// Open set entry
// ============================================================================

/// Heap entry. Ordered so that `BinaryHeap` (a max-heap) pops the lowest
/// fScore first, and among equal fScores the earliest inserted.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f_score: f64,
    g_score: f64,
    seq: u64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Tests
// ============================================================================
