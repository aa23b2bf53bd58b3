//! Boolean union of polygons by segment splitting.
//!
//! This module computes the outline of a set of overlapping polygons by:
//! 1. Splitting every pair of polygons at their proper crossings
//! 2. Keeping each split segment whose midpoint lies strictly inside no
//!    other polygon
//!
//! The result is a bag of segments, not a reconstructed ring. Callers use
//! it for drawing road borders and as guides for building placement.

use crate::geometry::intersect::segment_intersection;
use crate::geometry::polygon::Polygon;
use crate::model::Segment;

/// Split both polygons at every point where one of their segments crosses
/// the other's away from the endpoints.
///
/// Splits are made in place: the crossed segment is shortened to end at
/// the crossing and a new segment for the remainder is inserted right
/// after it. Both loops re-read the current lengths, so pieces created by
/// an earlier split are compared against later segments within this call.
pub fn break_pair(a: &mut Polygon, b: &mut Polygon) {
    let segs1 = &mut a.segments;
    let segs2 = &mut b.segments;
    let mut i = 0;
    while i < segs1.len() {
        let mut j = 0;
        while j < segs2.len() {
            let (s1, s2) = (segs1[i], segs2[j]);
            if let Some(hit) = segment_intersection(s1.p1, s1.p2, s2.p1, s2.p2) {
                if hit.is_interior() {
                    let point = hit.point();
                    segs1[i].p2 = point;
                    segs1.insert(i + 1, Segment::new(point, s1.p2));
                    segs2[j].p2 = point;
                    segs2.insert(j + 1, Segment::new(point, s2.p2));
                }
            }
            j += 1;
        }
        i += 1;
    }
}

/// Apply [`break_pair`] to every unordered pair, in index order.
pub fn multi_break(polys: &mut [Polygon]) {
    for i in 0..polys.len() {
        let (head, tail) = polys.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            break_pair(a, b);
        }
    }
}

/// Outline segments of the union of `polys`.
///
/// Splits the polygons (mutating their segment lists), then keeps a segment
/// of polygon `i` only if its midpoint is not strictly inside any polygon
/// `j != i`. Segments lying on a shared boundary survive once.
pub fn union(polys: &mut [Polygon]) -> Vec<Segment> {
    multi_break(polys);
    let mut kept: Vec<Segment> = Vec::new();
    for (i, poly) in polys.iter().enumerate() {
        for seg in &poly.segments {
            let covered = polys
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && other.strictly_contains_segment(seg));
            if !covered && !kept.contains(seg) {
                kept.push(*seg);
            }
        }
    }
    kept
}
