use super::intersect::segment_intersection;
use crate::model::{Point, Segment};
use serde::{Deserialize, Serialize};

/// Closed polygon: ordered vertices plus the segments joining them.
///
/// `segments` starts as one segment per consecutive vertex pair (last back
/// to first). Boolean splitting subdivides it in place, so after a union
/// pass it may hold more segments than there are vertices; `points` is left
/// untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub segments: Vec<Segment>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Polygon {
        let n = points.len();
        let segments = (1..=n)
            .map(|i| Segment::new(points[i - 1], points[i % n]))
            .collect();
        Polygon { points, segments }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest distance from `p` to any edge; infinite for an empty polygon.
    pub fn distance_to_point(&self, p: Point) -> f64 {
        self.segments
            .iter()
            .map(|s| s.distance_to_point(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// Smallest distance from any of this polygon's vertices to `other`.
    pub fn distance_to_poly(&self, other: &Polygon) -> f64 {
        self.points
            .iter()
            .map(|&p| other.distance_to_point(p))
            .fold(f64::INFINITY, f64::min)
    }

    /// True when some edge of `self` crosses or touches some edge of `other`.
    pub fn intersects_poly(&self, other: &Polygon) -> bool {
        self.segments.iter().any(|s1| {
            other
                .segments
                .iter()
                .any(|s2| segment_intersection(s1.p1, s1.p2, s2.p1, s2.p2).is_some())
        })
    }

    /// Axis-aligned bounds as (minx, miny, maxx, maxy).
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        bbox_of(self.points.iter().copied())
    }
}

pub fn bbox_of(points: impl IntoIterator<Item = Point>) -> Option<(f64, f64, f64, f64)> {
    points.into_iter().fold(None, |acc, p| match acc {
        None => Some((p.x, p.y, p.x, p.y)),
        Some((x0, y0, x1, y1)) => Some((x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        Polygon::new(vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ])
    }

    #[test]
    fn segments_close_the_ring() {
        let sq = square(0.0, 0.0, 10.0);
        assert_eq!(sq.segments.len(), 4);
        assert_eq!(sq.segments[3], Segment::new(Point::new(0.0, 10.0), Point::new(0.0, 0.0)));
        assert!(Polygon::new(Vec::new()).segments.is_empty());
    }

    #[test]
    fn distances_between_squares() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(15.0, 0.0, 10.0);
        assert!((a.distance_to_poly(&b) - 5.0).abs() < 1e-12);
        assert!(!a.intersects_poly(&b));
        let c = square(5.0, 5.0, 10.0);
        assert!(a.intersects_poly(&c));
        assert!((a.distance_to_point(Point::new(5.0, 13.0)) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn bbox_spans_vertices() {
        assert_eq!(square(-1.0, 2.0, 3.0).bbox(), Some((-1.0, 2.0, 2.0, 5.0)));
        assert_eq!(Polygon::new(Vec::new()).bbox(), None);
    }
}
