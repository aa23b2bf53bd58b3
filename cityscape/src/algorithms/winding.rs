//! Point-in-polygon tests by ray casting (even-odd rule).
//!
//! A ray is cast from a point known to lie outside all geometry to the
//! query point, and crossings with the polygon's current segment list are
//! counted. Because the segment list is used (not the vertex ring), this
//! works unchanged on polygons that boolean splitting has subdivided.

use crate::geometry::intersect::segment_intersection;
use crate::geometry::polygon::Polygon;
use crate::geometry::tolerance::{EPS_BOUNDARY, OUTSIDE_POINT};
use crate::model::{Point, Segment};

/// Even-odd containment of `p`, casting the ray from `outside`.
///
/// `outside` must not coincide with, or lie inside, any scene geometry.
pub fn contains_point_from(poly: &Polygon, p: Point, outside: Point) -> bool {
    let crossings = poly
        .segments
        .iter()
        .filter(|s| segment_intersection(outside, p, s.p1, s.p2).is_some())
        .count();
    crossings % 2 == 1
}

impl Polygon {
    pub fn contains_point(&self, p: Point) -> bool {
        contains_point_from(self, p, OUTSIDE_POINT)
    }

    /// Midpoint containment. Long segments that only partly overlap the
    /// polygon are classified by their midpoint alone.
    pub fn contains_segment(&self, seg: &Segment) -> bool {
        self.contains_point(seg.midpoint())
    }

    /// Inside and not on the boundary.
    pub fn strictly_contains_point(&self, p: Point) -> bool {
        self.distance_to_point(p) > EPS_BOUNDARY && self.contains_point(p)
    }

    pub fn strictly_contains_segment(&self, seg: &Segment) -> bool {
        self.strictly_contains_point(seg.midpoint())
    }
}
