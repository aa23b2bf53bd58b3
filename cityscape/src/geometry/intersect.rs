// Parametric segment-segment intersection.
// Near-parallel pairs are treated as disjoint rather than dividing by a tiny determinant.

use super::math::lerp;
use super::tolerance::EPS_DENOM;
use crate::model::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub x: f64,
    pub y: f64,
    /// Parameter along the first segment (0 at A, 1 at B).
    pub offset: f64,
}

impl Intersection {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// True when the hit is not at either end of the first segment.
    pub fn is_interior(&self) -> bool {
        self.offset != 0.0 && self.offset != 1.0
    }
}

/// Intersection of segment AB with segment CD, if both parameters fall in [0, 1].
pub fn segment_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Intersection> {
    let t_top = (d.x - c.x) * (a.y - c.y) - (d.y - c.y) * (a.x - c.x);
    let u_top = (c.y - a.y) * (a.x - b.x) - (c.x - a.x) * (a.y - b.y);
    let bottom = (d.y - c.y) * (b.x - a.x) - (d.x - c.x) * (b.y - a.y);

    if bottom.abs() < EPS_DENOM {
        return None;
    }
    let t = t_top / bottom;
    let u = u_top / bottom;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }
    Some(Intersection {
        x: lerp(a.x, b.x, t),
        y: lerp(a.y, b.y, t),
        offset: t,
    })
}
