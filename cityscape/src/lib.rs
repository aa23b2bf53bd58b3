pub mod error;
pub mod items;
pub mod markings;
pub mod model;
pub mod render;
pub mod svg;
pub mod world;
pub mod geometry {
    pub mod intersect;
    pub mod limits;
    pub mod math;
    pub mod polygon;
    pub mod segment;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod boolean;
    pub mod envelope;
    pub mod placement;
    pub mod winding;
}
mod json;

pub use error::LoadError;
pub use json::{EndpointRef, GraphData, SegmentData, WorldData};
pub use model::{Color, DrawStyle, Point, Segment};
pub use world::{World, WorldParams};

use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

/// Road graph: unique points and unique undirected segments between them.
///
/// Identity is by coordinates, not by object: a segment refers to a point
/// by holding an equal copy of it. Insertion order is kept so drawing is
/// stable from frame to frame.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub(crate) points: Vec<Point>,
    pub(crate) segments: Vec<Segment>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
    pub fn point_count(&self) -> usize {
        self.points.len()
    }
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    // Points
    pub fn add_point(&mut self, p: Point) {
        self.points.push(p);
    }
    pub fn contains_point(&self, p: Point) -> bool {
        self.points.contains(&p)
    }
    pub fn try_add_point(&mut self, p: Point) -> bool {
        if self.contains_point(p) {
            return false;
        }
        self.add_point(p);
        true
    }
    /// Removes `p` and every segment touching it.
    pub fn remove_point(&mut self, p: Point) {
        self.segments.retain(|s| !s.includes(p));
        self.points.retain(|q| *q != p);
    }
    /// Move the point equal to `from` to `to`, dragging segment endpoints
    /// along. Fails if `from` is absent or `to` is already taken.
    pub fn move_point(&mut self, from: Point, to: Point) -> bool {
        if from == to {
            return self.contains_point(from);
        }
        if !self.contains_point(from) || self.contains_point(to) {
            return false;
        }
        for q in self.points.iter_mut().filter(|q| **q == from) {
            *q = to;
        }
        for s in self.segments.iter_mut() {
            if s.p1 == from {
                s.p1 = to;
            }
            if s.p2 == from {
                s.p2 = to;
            }
        }
        true
    }

    // Segments
    pub fn add_segment(&mut self, seg: Segment) {
        self.segments.push(seg);
    }
    pub fn contains_segment(&self, seg: &Segment) -> bool {
        self.segments.contains(seg)
    }
    /// Inserts unless an equal segment exists or both ends coincide.
    pub fn try_add_segment(&mut self, seg: Segment) -> bool {
        if seg.is_degenerate() || self.contains_segment(&seg) {
            return false;
        }
        self.add_segment(seg);
        true
    }
    pub fn remove_segment(&mut self, seg: &Segment) {
        self.segments.retain(|s| s != seg);
    }
    pub fn segments_with_point(&self, p: Point) -> Vec<Segment> {
        self.segments.iter().filter(|s| s.includes(p)).copied().collect()
    }

    pub fn dispose(&mut self) {
        self.points.clear();
        self.segments.clear();
    }

    pub fn nearest_point(&self, loc: Point, threshold: f64) -> Option<Point> {
        geometry::segment::nearest_point(loc, &self.points, threshold)
    }
    pub fn nearest_segment(&self, loc: Point, threshold: f64) -> Option<Segment> {
        geometry::segment::nearest_segment(loc, &self.segments, threshold).copied()
    }

    /// Fingerprint of the full point and segment lists, in order. Equal
    /// graphs built the same way hash equal; any edit changes the value
    /// with high probability.
    pub fn hash(&self) -> u64 {
        let mut h = DefaultHasher::new();
        h.write_usize(self.points.len());
        for p in &self.points {
            h.write_u64(p.x.to_bits());
            h.write_u64(p.y.to_bits());
        }
        h.write_usize(self.segments.len());
        for s in &self.segments {
            for p in [s.p1, s.p2] {
                h.write_u64(p.x.to_bits());
                h.write_u64(p.y.to_bits());
            }
        }
        h.finish()
    }

    /// Same point set and same segment set, ignoring order.
    pub fn same_content(&self, other: &Graph) -> bool {
        self.points.len() == other.points.len()
            && self.segments.len() == other.segments.len()
            && self.points.iter().all(|p| other.contains_point(*p))
            && self.segments.iter().all(|s| other.contains_segment(s))
    }
}
