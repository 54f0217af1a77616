//! Map document: calibration point, POIs, and the paths between them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::Point;

/// Identifier a map store uses to look a map up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(pub String);

impl std::fmt::Display for MapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MapId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MapId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A direct walkable connection between two POIs, named by label.
///
/// The pair is unordered. Cost defaults to the straight-line distance between
/// the endpoints. An explicit `cost` models connections that are longer to
/// walk than they are wide apart (stairs, detours around fixtures); it may
/// never be shorter than the straight-line distance.
///
/// Persisted as `["a", "b"]`, or `{"between": ["a", "b"], "cost": 12.5}` when
/// a cost is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PathRepr", into = "PathRepr")]
pub struct Path {
    pub a: String,
    pub b: String,
    pub cost: Option<f64>,
}

impl Path {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self { a: a.into(), b: b.into(), cost: None }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// The "other" end of the path from the given label.
    pub fn other_end(&self, from: &str) -> Option<&str> {
        if from == self.a { Some(&self.b) }
        else if from == self.b { Some(&self.a) }
        else { None }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PathRepr {
    Pair(Vec<String>),
    Weighted { between: Vec<String>, cost: f64 },
}

impl TryFrom<PathRepr> for Path {
    type Error = String;

    fn try_from(repr: PathRepr) -> Result<Self, Self::Error> {
        let (labels, cost) = match repr {
            PathRepr::Pair(labels) => (labels, None),
            PathRepr::Weighted { between, cost } => (between, Some(cost)),
        };
        match <[String; 2]>::try_from(labels) {
            Ok([a, b]) => Ok(Path { a, b, cost }),
            Err(labels) => Err(format!(
                "path must name exactly 2 points, got {}",
                labels.len()
            )),
        }
    }
}

impl From<Path> for PathRepr {
    fn from(path: Path) -> Self {
        match path.cost {
            None => PathRepr::Pair(vec![path.a, path.b]),
            Some(cost) => PathRepr::Weighted { between: vec![path.a, path.b], cost },
        }
    }
}

/// A mapped space: one calibration point, the POIs, and their connections.
///
/// Authored outside this crate and read whole. `revision` changes whenever
/// the map's content changes; cached graphs are keyed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Map {
    pub name: String,
    pub calibration_point: Point,
    #[serde(default)]
    pub points_of_interest: Vec<Point>,
    #[serde(default)]
    pub paths: Vec<Path>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub revision: u64,
}

impl Map {
    pub fn new(name: impl Into<String>, calibration_point: Point) -> Self {
        Self {
            name: name.into(),
            calibration_point,
            points_of_interest: Vec::new(),
            paths: Vec::new(),
            created_at: Utc::now(),
            revision: 0,
        }
    }

    pub fn with_poi(mut self, poi: Point) -> Self {
        self.points_of_interest.push(poi);
        self
    }

    pub fn with_path(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.paths.push(Path::new(a, b));
        self
    }

    pub fn with_weighted_path(
        mut self,
        a: impl Into<String>,
        b: impl Into<String>,
        cost: f64,
    ) -> Self {
        self.paths.push(Path::new(a, b).with_cost(cost));
        self
    }

    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    pub fn poi(&self, label: &str) -> Option<&Point> {
        self.points_of_interest.iter().find(|p| p.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_persisted_document() {
        let json = r#"{
            "name": "Level 2",
            "calibrationPoint": {"label": "origin", "x": 0, "y": 0, "z": 0},
            "pointsOfInterest": [
                {"label": "lobby", "x": 0, "y": 0, "z": 1},
                {"label": "cafe", "x": 4, "y": 0, "z": 1}
            ],
            "paths": [["lobby", "cafe"]],
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;

        let map: Map = serde_json::from_str(json).unwrap();
        assert_eq!(map.name, "Level 2");
        assert_eq!(map.points_of_interest.len(), 2);
        assert_eq!(map.paths, vec![Path::new("lobby", "cafe")]);
        assert_eq!(map.revision, 0);
        assert_eq!(map.created_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn test_weighted_path_serde() {
        let path: Path = serde_json::from_str(r#"{"between": ["a", "b"], "cost": 7.5}"#).unwrap();
        assert_eq!(path, Path::new("a", "b").with_cost(7.5));

        let json = serde_json::to_string(&Path::new("a", "b")).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
    }

    #[test]
    fn test_path_with_wrong_arity_rejected() {
        assert!(serde_json::from_str::<Path>(r#"["a"]"#).is_err());
        assert!(serde_json::from_str::<Path>(r#"["a", "b", "c"]"#).is_err());
    }

    #[test]
    fn test_other_end() {
        let path = Path::new("a", "b");
        assert_eq!(path.other_end("a"), Some("b"));
        assert_eq!(path.other_end("b"), Some("a"));
        assert_eq!(path.other_end("c"), None);
    }
}
