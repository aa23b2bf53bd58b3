use super::math::{add, average, distance, dot, magnitude, normalize, scale, subtract};
use crate::model::{Point, Segment};

/// Orthogonal projection of a point onto a segment's supporting line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub point: Point,
    /// 0 at `p1`, 1 at `p2`; outside [0, 1] when the foot lies beyond an end.
    pub offset: f64,
}

impl Segment {
    pub fn length(&self) -> f64 {
        distance(self.p1, self.p2)
    }

    /// Unit vector from `p1` to `p2`.
    pub fn direction_vector(&self) -> Point {
        normalize(subtract(self.p2, self.p1))
    }

    pub fn midpoint(&self) -> Point {
        average(self.p1, self.p2)
    }

    pub fn project_point(&self, p: Point) -> Projection {
        let a = subtract(p, self.p1);
        let b = subtract(self.p2, self.p1);
        let len = magnitude(b);
        if len == 0.0 {
            return Projection { point: self.p1, offset: 0.0 };
        }
        let scaler = dot(a, normalize(b));
        Projection {
            point: add(self.p1, scale(normalize(b), scaler)),
            offset: scaler / len,
        }
    }

    pub fn distance_to_point(&self, p: Point) -> f64 {
        let proj = self.project_point(p);
        if proj.offset > 0.0 && proj.offset < 1.0 {
            return distance(p, proj.point);
        }
        distance(p, self.p1).min(distance(p, self.p2))
    }
}

/// Closest segment to `loc` strictly within `threshold`, first one wins ties.
pub fn nearest_segment(loc: Point, segments: &[Segment], threshold: f64) -> Option<&Segment> {
    let mut best: Option<(&Segment, f64)> = None;
    for seg in segments {
        let d = seg.distance_to_point(loc);
        if d < threshold && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((seg, d));
        }
    }
    best.map(|(s, _)| s)
}

/// Closest point to `loc` strictly within `threshold`.
pub fn nearest_point(loc: Point, points: &[Point], threshold: f64) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for &p in points {
        let d = distance(loc, p);
        if d < threshold && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((p, d));
        }
    }
    best.map(|(p, _)| p)
}
