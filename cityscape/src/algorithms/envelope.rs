//! Capsule-shaped polygon swept around a segment.

use crate::geometry::math::{angle, subtract, translate};
use crate::geometry::polygon::Polygon;
use crate::model::Segment;
use std::f64::consts::{FRAC_PI_2, PI};

pub const DEFAULT_ROUNDNESS: u32 = 3;

/// Width-`w` region around a skeleton segment, with half-circle caps
/// approximated by `roundness` steps each.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub skeleton: Segment,
    pub width: f64,
    pub roundness: u32,
    pub poly: Polygon,
}

impl Envelope {
    pub fn new(skeleton: Segment, width: f64, roundness: u32) -> Envelope {
        let poly = Self::generate_polygon(&skeleton, width, roundness);
        Envelope { skeleton, width, roundness, poly }
    }

    pub fn with_default_roundness(skeleton: Segment, width: f64) -> Envelope {
        Self::new(skeleton, width, DEFAULT_ROUNDNESS)
    }

    pub fn into_poly(self) -> Polygon {
        self.poly
    }

    // Cap around p1 sweeps alpha-90deg..alpha+90deg, the cap around p2 the
    // same range turned by 180deg. Roundness 0 behaves like 1: a rectangle.
    fn generate_polygon(skeleton: &Segment, width: f64, roundness: u32) -> Polygon {
        let Segment { p1, p2 } = *skeleton;
        let radius = width / 2.0;
        let alpha = angle(subtract(p1, p2));
        let alpha_ccw = alpha - FRAC_PI_2;
        let steps = roundness.max(1);
        let step = PI / steps as f64;

        let mut points = Vec::with_capacity(2 * (steps as usize + 1));
        for k in 0..=steps {
            points.push(translate(p1, alpha_ccw + k as f64 * step, radius));
        }
        for k in 0..=steps {
            points.push(translate(p2, PI + alpha_ccw + k as f64 * step, radius));
        }
        Polygon::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    fn horizontal(len: f64) -> Segment {
        Segment::new(Point::new(0.0, 0.0), Point::new(len, 0.0))
    }

    #[test]
    fn vertex_count_follows_roundness() {
        for r in [1u32, 3, 10] {
            let env = Envelope::new(horizontal(100.0), 20.0, r);
            assert_eq!(env.poly.points.len(), 2 * (r as usize + 1));
            assert_eq!(env.poly.segments.len(), env.poly.points.len());
        }
    }

    #[test]
    fn zero_roundness_and_width_stay_finite() {
        let env = Envelope::new(horizontal(100.0), 0.0, 0);
        assert_eq!(env.poly.points.len(), 4);
        assert!(env.poly.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn rectangle_spans_skeleton_exactly() {
        let env = Envelope::new(horizontal(100.0), 20.0, 1);
        let bbox = env.poly.bbox().unwrap();
        assert!((bbox.0 - 0.0).abs() < 1e-9 && (bbox.2 - 100.0).abs() < 1e-9);
        assert!((bbox.1 + 10.0).abs() < 1e-9 && (bbox.3 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn default_roundness_is_three() {
        let env = Envelope::with_default_roundness(horizontal(100.0), 20.0);
        assert_eq!(env.roundness, DEFAULT_ROUNDNESS);
        assert_eq!(env.poly.points.len(), 8);
    }

    #[test]
    fn rounded_caps_reach_past_endpoints() {
        let env = Envelope::new(horizontal(100.0), 20.0, 10);
        let bbox = env.poly.bbox().unwrap();
        assert!((bbox.0 + 10.0).abs() < 1e-9);
        assert!((bbox.2 - 110.0).abs() < 1e-9);
        assert!(env.poly.contains_point(Point::new(50.0, 0.0)));
        assert!(!env.poly.contains_point(Point::new(50.0, 11.0)));
    }
}
