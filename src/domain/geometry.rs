//! Planar polygon geometry
//!
//! Latitude/longitude are treated as Euclidean (x, y) coordinates. Polygons
//! are explicitly closed rings: the first vertex is repeated at the end.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid region data. Always a data/programming error, never transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("polygon needs at least 2 vertices, got {len}")]
    TooFewVertices { len: usize },
    #[error("polygon is not closed: first vertex {first} != last vertex {last}")]
    NotClosed { first: Point, last: Point },
    #[error("polygon vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
    #[error("region {name} has no polygons")]
    EmptyRegion { name: String },
    #[error("unknown region {name}")]
    UnknownRegion { name: String },
}

/// A position; `x` is latitude and `y` is longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in coordinate space
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Closed ring of vertices. Only constructible through [`Polygon::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Validate and wrap a closed ring
    ///
    /// Requires at least 2 vertices, finite coordinates, and first == last.
    /// A 2-vertex ring is accepted and degrades to a zero-area polygon.
    pub fn new(vertices: Vec<Point>) -> Result<Self, GeometryError> {
        if vertices.len() < 2 {
            return Err(GeometryError::TooFewVertices { len: vertices.len() });
        }
        if let Some(index) = vertices.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate { index });
        }
        let first = vertices[0];
        let last = vertices[vertices.len() - 1];
        if first != last {
            return Err(GeometryError::NotClosed { first, last });
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Same ring traversed in the opposite direction
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }
}

/// Centroid of a polygon together with its unsigned area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    /// Always >= 0 regardless of winding
    pub area: f64,
}

impl Centroid {
    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Signed shoelace area; positive for counter-clockwise rings
pub fn signed_area(polygon: &Polygon) -> f64 {
    polygon.vertices.windows(2).map(|w| cross(w[0], w[1])).sum::<f64>() * 0.5
}

/// Centroid and unsigned area of a closed polygon
///
/// A zero-area ring (coincident or collinear vertices) reports its first
/// vertex as the centroid with area 0 instead of dividing by zero.
pub fn centroid_and_area(polygon: &Polygon) -> Centroid {
    let mut twice_area = 0.0;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;

    for w in polygon.vertices.windows(2) {
        let (a, b) = (w[0], w[1]);
        let c = cross(a, b);
        twice_area += c;
        sum_x += (a.x + b.x) * c;
        sum_y += (a.y + b.y) * c;
    }

    let area = twice_area * 0.5;
    if area == 0.0 {
        let first = polygon.vertices[0];
        return Centroid { x: first.x, y: first.y, area: 0.0 };
    }

    Centroid { x: sum_x / (6.0 * area), y: sum_y / (6.0 * area), area: area.abs() }
}

#[inline]
fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - b.x * a.y
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn ring(coords: &[(f64, f64)]) -> Polygon {
        Polygon::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
    }

    fn assert_centroid(actual: Centroid, x: f64, y: f64, area: f64) {
        assert!((actual.x - x).abs() < EPS, "x: {} != {}", actual.x, x);
        assert!((actual.y - y).abs() < EPS, "y: {} != {}", actual.y, y);
        assert!((actual.area - area).abs() < EPS, "area: {} != {}", actual.area, area);
    }

    #[test]
    fn test_triangle_centroid() {
        let triangle = ring(&[(1.0, 2.0), (3.0, 4.0), (5.0, 0.0), (1.0, 2.0)]);
        assert_centroid(centroid_and_area(&triangle), 3.0, 2.0, 6.0);
    }

    #[test]
    fn test_winding_order_does_not_matter() {
        let triangle = ring(&[(1.0, 2.0), (5.0, 0.0), (3.0, 4.0), (1.0, 2.0)]);
        assert_centroid(centroid_and_area(&triangle), 3.0, 2.0, 6.0);

        let irregular =
            ring(&[(0.0, 0.0), (4.0, 0.5), (5.0, 3.0), (2.0, 6.0), (-1.0, 2.5), (0.0, 0.0)]);
        let forward = centroid_and_area(&irregular);
        let backward = centroid_and_area(&irregular.reversed());
        assert_centroid(backward, forward.x, forward.y, forward.area);
        assert!(signed_area(&irregular) > 0.0);
        assert!(signed_area(&irregular.reversed()) < 0.0);
    }

    #[test]
    fn test_two_point_polygon_is_degenerate() {
        let degenerate = ring(&[(1.0, 2.0), (1.0, 2.0)]);
        let c = centroid_and_area(&degenerate);
        assert_eq!(c.area, 0.0);
        assert_eq!(c.point(), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_collinear_polygon_falls_back_to_first_vertex() {
        let line = ring(&[(1.0, 2.0), (3.0, 4.0), (1.0, 2.0)]);
        let c = centroid_and_area(&line);
        assert_eq!(c.area, 0.0);
        assert_eq!(c.point(), Point::new(1.0, 2.0));
        assert!(c.x.is_finite() && c.y.is_finite());
    }

    #[test]
    fn test_unit_square() {
        let square = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        assert_centroid(centroid_and_area(&square), 1.0, 1.0, 4.0);
    }

    #[test]
    fn test_rejects_too_few_vertices() {
        assert_eq!(
            Polygon::new(vec![Point::new(1.0, 1.0)]),
            Err(GeometryError::TooFewVertices { len: 1 })
        );
        assert_eq!(Polygon::new(vec![]), Err(GeometryError::TooFewVertices { len: 0 }));
    }

    #[test]
    fn test_rejects_open_ring() {
        let err = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)])
            .unwrap_err();
        assert!(matches!(err, GeometryError::NotClosed { .. }));
    }

    #[test]
    fn test_rejects_nan_vertex() {
        let err = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0), Point::new(0.0, 0.0)])
            .unwrap_err();
        assert_eq!(err, GeometryError::NonFiniteCoordinate { index: 1 });
    }

    #[test]
    fn test_point_distance() {
        assert!((Point::new(0.0, 0.0).distance(&Point::new(3.0, 4.0)) - 5.0).abs() < EPS);
    }
}
