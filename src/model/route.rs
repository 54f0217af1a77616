//! Route — the ordered POI labels from start to end.

use serde::{Deserialize, Serialize};

/// An ordered walk through the graph, start first, end last.
///
/// Always holds at least one label. A single-label route is the degenerate
/// start == end case with zero cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RouteRepr")]
pub struct Route {
    labels: Vec<String>,
    cost: f64,
}

#[derive(Deserialize)]
struct RouteRepr {
    labels: Vec<String>,
    cost: f64,
}

impl TryFrom<RouteRepr> for Route {
    type Error = String;

    fn try_from(repr: RouteRepr) -> Result<Self, Self::Error> {
        if repr.labels.is_empty() {
            return Err("route must name at least one point".into());
        }
        if !repr.cost.is_finite() || repr.cost < 0.0 {
            return Err(format!("route cost must be finite and non-negative, got {}", repr.cost));
        }
        Ok(Route { labels: repr.labels, cost: repr.cost })
    }
}

impl Route {
    pub fn single(label: impl Into<String>) -> Self {
        Self { labels: vec![label.into()], cost: 0.0 }
    }

    pub(crate) fn new(labels: Vec<String>, cost: f64) -> Self {
        debug_assert!(!labels.is_empty());
        Self { labels, cost }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }

    /// Total walking cost (sum of edge costs).
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of edges traversed.
    pub fn len(&self) -> usize {
        self.labels.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.labels.len() == 1
    }

    pub fn start(&self) -> &str {
        &self.labels[0]
    }

    pub fn end(&self) -> &str {
        &self.labels[self.labels.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_route() {
        let route: Route = serde_json::from_str(r#"{"labels": ["a", "b"], "cost": 4.5}"#).unwrap();
        assert_eq!(route.start(), "a");
        assert_eq!(route.end(), "b");
        assert_eq!(route.len(), 1);
        assert_eq!(route.cost(), 4.5);
    }

    #[test]
    fn test_empty_route_rejected() {
        assert!(serde_json::from_str::<Route>(r#"{"labels": [], "cost": 0}"#).is_err());
    }

    #[test]
    fn test_negative_cost_rejected() {
        assert!(serde_json::from_str::<Route>(r#"{"labels": ["a"], "cost": -1}"#).is_err());
    }

    #[test]
    fn test_serialize_round_trip_keeps_single() {
        let json = serde_json::to_string(&Route::single("lobby")).unwrap();
        let back: Route = serde_json::from_str(&json).unwrap();
        assert!(back.is_empty());
        assert_eq!(back.labels(), &["lobby"]);
    }
}
