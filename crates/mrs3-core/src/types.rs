//! Shared value types for region selection.

use serde::{Deserialize, Serialize};

/// A 2D point in image-pixel space.
///
/// Coordinates are stored at full precision; rounding to integers happens
/// only at the wire boundary (see [`crate::wire`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from the image's left edge).
    pub x: f64,
    /// Vertical position (pixels from the image's top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round both coordinates to the nearest integer.
    ///
    /// This is the representation the backend expects in the `polygons`
    /// form field.
    #[must_use]
    pub fn rounded(self) -> (i64, i64) {
        #[expect(clippy::cast_possible_truncation)]
        {
            (self.x.round() as i64, self.y.round() as i64)
        }
    }
}

/// An ordered sequence of points forming a user-drawn region.
///
/// Point order is significant (it defines the edges and winding used for
/// rendering) and points are not deduplicated. A polygon is only
/// constructed once the user closes a region with at least three points;
/// in-progress point lists live inside [`crate::session::PolygonSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon(Vec<Point>);

impl Polygon {
    /// Create a polygon from an ordered vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polygon has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polygon and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// Natural image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn point_new() {
        let p = Point::new(3.0, 4.0);
        assert!((p.x - 3.0).abs() < f64::EPSILON);
        assert!((p.y - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_rounded_nearest() {
        assert_eq!(Point::new(10.4, 10.6).rounded(), (10, 11));
        assert_eq!(Point::new(-0.5, 0.5).rounded(), (-1, 1));
        assert_eq!(Point::new(100.0, 0.0).rounded(), (100, 0));
    }

    #[test]
    fn polygon_order_is_preserved() {
        let points = vec![
            Point::new(10.0, 10.0),
            Point::new(100.0, 10.0),
            Point::new(100.0, 100.0),
        ];
        let polygon = Polygon::new(points.clone());
        assert_eq!(polygon.points(), &points);
        assert_eq!(polygon.first(), Some(&points[0]));
        assert_eq!(polygon.last(), Some(&points[2]));
        assert_eq!(polygon.into_points(), points);
    }

    #[test]
    fn polygon_does_not_deduplicate() {
        let p = Point::new(1.0, 1.0);
        let polygon = Polygon::new(vec![p, p, p]);
        assert_eq!(polygon.len(), 3);
    }

    #[test]
    fn polygon_empty() {
        let polygon = Polygon::new(vec![]);
        assert!(polygon.is_empty());
        assert_eq!(polygon.len(), 0);
        assert!(polygon.first().is_none());
        assert!(polygon.last().is_none());
    }

    #[test]
    fn polygon_serde_round_trip() {
        let polygon = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.5, 2.5)]);
        let json = serde_json::to_string(&polygon).unwrap();
        let back: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(polygon, back);
    }

    #[test]
    fn dimensions_equality() {
        assert_eq!(
            Dimensions {
                width: 640,
                height: 480
            },
            Dimensions {
                width: 640,
                height: 480
            },
        );
        assert_ne!(
            Dimensions {
                width: 640,
                height: 480
            },
            Dimensions {
                width: 640,
                height: 481
            },
        );
    }
}
