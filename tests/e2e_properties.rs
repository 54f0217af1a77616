//! Property tests over randomly generated small maps.
//!
//! Every route A* returns is checked against a brute-force enumeration of
//! all simple paths, and every graph is checked for dangling neighbors and
//! rebuild stability.

use navigo::{Map, NavigationGraph, Point, RouteOutcome, build_graph, find_route};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Maps with 2..8 POIs on an integer grid and a random set of paths.
fn arb_map() -> impl Strategy<Value = Map> {
    (2usize..8)
        .prop_flat_map(|n| {
            let coords = prop::collection::vec((0i32..10, 0i32..10, 0i32..3), n);
            let paths = prop::collection::vec((0..n, 0..n, prop::option::weighted(0.2, 1.0f64..3.0)), 0..n * 2);
            (coords, paths)
        })
        .prop_map(|(coords, paths)| {
            let mut map = Map::new("generated", Point::new("origin", 0.0, 0.0, 0.0));
            for (i, (x, y, z)) in coords.iter().enumerate() {
                map = map.with_poi(Point::new(format!("p{i}"), *x as f64, *y as f64, *z as f64));
            }
            for (a, b, stretch) in paths {
                if a == b {
                    continue;
                }
                let (la, lb) = (format!("p{a}"), format!("p{b}"));
                map = match stretch {
                    // Explicit cost: straight-line distance scaled up, never down.
                    Some(factor) => {
                        let d = map.poi(&la).unwrap().distance(map.poi(&lb).unwrap());
                        map.with_weighted_path(la, lb, d * factor)
                    }
                    None => map.with_path(la, lb),
                };
            }
            map
        })
}

// ============================================================================
// Brute force
// ============================================================================

/// Cheapest simple-path cost from `start` to `end`, by exhaustive DFS.
fn brute_force_cost(graph: &NavigationGraph, start: &str, end: &str) -> Option<f64> {
    fn dfs(
        graph: &NavigationGraph,
        at: &str,
        end: &str,
        cost: f64,
        visited: &mut Vec<String>,
        best: &mut Option<f64>,
    ) {
        if at == end {
            if best.is_none_or(|b| cost < b) {
                *best = Some(cost);
            }
            return;
        }
        for (next, edge) in graph.neighbors(at).unwrap() {
            if visited.iter().any(|v| v == next) {
                continue;
            }
            visited.push(next.to_string());
            dfs(graph, next, end, cost + edge, visited, best);
            visited.pop();
        }
    }

    let mut best = None;
    let mut visited = vec![start.to_string()];
    dfs(graph, start, end, 0.0, &mut visited, &mut best);
    best
}

fn all_labels(graph: &NavigationGraph) -> Vec<String> {
    graph.labels().map(String::from).collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_route_cost_is_optimal(map in arb_map()) {
        let graph = build_graph(&map).unwrap();
        let labels = all_labels(&graph);

        for start in &labels {
            for end in &labels {
                let outcome = find_route(&graph, start, end).unwrap();
                match (outcome, brute_force_cost(&graph, start, end)) {
                    (RouteOutcome::Found(route), Some(best)) => {
                        prop_assert!((route.cost() - best).abs() < 1e-9,
                            "{start}->{end}: A* {} vs brute force {best}", route.cost());
                    }
                    (RouteOutcome::NoRoute, None) => {}
                    (outcome, best) => {
                        prop_assert!(false, "{start}->{end}: A* {outcome:?} vs brute force {best:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn prop_route_is_a_connected_walk(map in arb_map()) {
        let graph = build_graph(&map).unwrap();
        let labels = all_labels(&graph);

        for start in &labels {
            for end in &labels {
                let Some(route) = find_route(&graph, start, end).unwrap().into_route() else {
                    continue;
                };
                prop_assert_eq!(route.start(), start.as_str());
                prop_assert_eq!(route.end(), end.as_str());

                let mut walked = 0.0;
                for pair in route.labels().windows(2) {
                    let step = graph
                        .neighbors(&pair[0])
                        .unwrap()
                        .into_iter()
                        .find(|(n, _)| *n == pair[1]);
                    prop_assert!(step.is_some(), "{} and {} are not adjacent", pair[0], pair[1]);
                    walked += step.unwrap().1;
                }
                prop_assert!((walked - route.cost()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn prop_neighbors_stay_inside_graph(map in arb_map()) {
        let graph = build_graph(&map).unwrap();
        for label in graph.labels() {
            for (neighbor, cost) in graph.neighbors(label).unwrap() {
                prop_assert!(graph.contains(neighbor));
                prop_assert!(cost >= 0.0);
                // Symmetric: the edge is listed from the other end with the same cost.
                let back = graph.neighbors(neighbor).unwrap();
                prop_assert!(back.contains(&(label, cost)));
            }
        }
    }

    #[test]
    fn prop_rebuild_is_idempotent(map in arb_map()) {
        let first = build_graph(&map).unwrap();
        let second = build_graph(&map).unwrap();
        let labels = all_labels(&first);

        for start in &labels {
            for end in &labels {
                prop_assert_eq!(
                    find_route(&first, start, end).unwrap(),
                    find_route(&second, start, end).unwrap()
                );
            }
        }
    }
}
