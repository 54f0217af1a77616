//! Labeled 3D point.

use serde::{Deserialize, Serialize};

/// A labeled coordinate. Serves as both calibration anchor and POI.
///
/// The label is the point's identity within a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(label: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self { label: label.into(), x, y, z }
    }

    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// True when every coordinate is a finite number (no NaN, no infinity).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Straight-line distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        euclidean(self.coords(), other.coords())
    }
}

/// Euclidean distance between two coordinates.
///
/// Edge costs and the search heuristic both go through this function; they
/// must stay the same metric or A* loses its optimality guarantee.
#[inline]
pub fn euclidean(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_3_4_5() {
        let a = Point::new("a", 0.0, 0.0, 0.0);
        let b = Point::new("b", 3.0, 4.0, 0.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_distance_uses_z() {
        let a = Point::new("a", 1.0, 1.0, 1.0);
        let b = Point::new("b", 1.0, 1.0, -2.0);
        assert_eq!(a.distance(&b), 3.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point::new("ok", 1.0, -2.0, 0.5).is_finite());
        assert!(!Point::new("nan", f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Point::new("inf", 0.0, f64::INFINITY, 0.0).is_finite());
    }
}
