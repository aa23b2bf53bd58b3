use crate::error::LoadError;
use crate::geometry::limits;
use crate::markings::{Marking, MarkingData};
use crate::model::{Point, Segment};
use crate::world::{World, WorldParams};
use crate::Graph;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A segment endpoint: an index into `points` or the point itself.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EndpointRef {
    Index(usize),
    Point(Point),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentData {
    pub p1: EndpointRef,
    pub p2: EndpointRef,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphData {
    pub points: Vec<Point>,
    pub segments: Vec<SegmentData>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldData {
    pub graph: GraphData,
    pub params: WorldParams,
    pub markings: Vec<MarkingData>,
    pub zoom: f64,
    pub offset: Point,
}

impl Default for WorldData {
    fn default() -> Self {
        WorldData {
            graph: GraphData::default(),
            params: WorldParams::default(),
            markings: Vec::new(),
            zoom: 1.0,
            offset: Point::new(0.0, 0.0),
        }
    }
}

fn check_point(p: Point) -> Result<Point, LoadError> {
    if limits::point_in_bounds(p) {
        Ok(p)
    } else {
        Err(LoadError::CoordinateOutOfBounds { x: p.x, y: p.y })
    }
}

fn resolve(end: EndpointRef, points: &[Point]) -> Result<Point, LoadError> {
    match end {
        EndpointRef::Index(index) => points
            .get(index)
            .copied()
            .ok_or(LoadError::DanglingSegment { index, len: points.len() }),
        EndpointRef::Point(p) => check_point(p),
    }
}

impl Graph {
    pub fn save(&self) -> GraphData {
        GraphData {
            points: self.points.clone(),
            segments: self
                .segments
                .iter()
                .map(|s| SegmentData {
                    p1: EndpointRef::Point(s.p1),
                    p2: EndpointRef::Point(s.p2),
                })
                .collect(),
        }
    }

    /// Rebuild a graph in input order. Duplicates and self-loops are
    /// dropped; inline endpoints missing from `points` are added.
    pub fn load(data: &GraphData) -> Result<Graph, LoadError> {
        if data.points.len() > limits::MAX_POINTS {
            return Err(LoadError::TooManyPoints { got: data.points.len(), max: limits::MAX_POINTS });
        }
        if data.segments.len() > limits::MAX_SEGMENTS {
            return Err(LoadError::TooManySegments {
                got: data.segments.len(),
                max: limits::MAX_SEGMENTS,
            });
        }

        let mut g = Graph::new();
        for &p in &data.points {
            if !g.try_add_point(check_point(p)?) {
                warn!("load: duplicate point ({}, {}) skipped", p.x, p.y);
            }
        }
        for s in &data.segments {
            let p1 = resolve(s.p1, &data.points)?;
            let p2 = resolve(s.p2, &data.points)?;
            for p in [p1, p2] {
                if g.try_add_point(p) {
                    warn!("load: endpoint ({}, {}) missing from points, added", p.x, p.y);
                }
            }
            if g.point_count() > limits::MAX_POINTS {
                return Err(LoadError::TooManyPoints { got: g.point_count(), max: limits::MAX_POINTS });
            }
            if !g.try_add_segment(Segment::new(p1, p2)) {
                warn!("load: duplicate or degenerate segment skipped");
            }
        }
        Ok(g)
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.save()).unwrap_or(Value::Null)
    }

    pub fn from_json(v: Value) -> Result<Graph, LoadError> {
        let data: GraphData = serde_json::from_value(v)?;
        Graph::load(&data)
    }
}

impl World {
    pub fn save(&self) -> WorldData {
        WorldData {
            graph: self.graph.save(),
            params: self.params.clone(),
            markings: self.markings.iter().map(Marking::to_data).collect(),
            zoom: self.zoom,
            offset: self.offset,
        }
    }

    /// Rebuild the graph and markings, then regenerate the scene.
    pub fn load(data: &WorldData) -> Result<World, LoadError> {
        if data.markings.len() > limits::MAX_MARKINGS {
            return Err(LoadError::TooManyMarkings {
                got: data.markings.len(),
                max: limits::MAX_MARKINGS,
            });
        }
        data.params.validate()?;
        for m in &data.markings {
            check_point(m.center)?;
        }
        check_point(data.offset)?;
        let graph = Graph::load(&data.graph)?;
        let mut world = World::new(graph, data.params.clone());
        world.markings = data.markings.iter().map(Marking::from_data).collect();
        world.zoom = if data.zoom.is_finite() && data.zoom > 0.0 {
            data.zoom
        } else {
            warn!("load: invalid zoom {}, reset to 1", data.zoom);
            1.0
        };
        world.offset = data.offset;
        Ok(world)
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.save()).unwrap_or(Value::Null)
    }

    pub fn from_json(v: Value) -> Result<World, LoadError> {
        let data: WorldData = serde_json::from_value(v)?;
        World::load(&data)
    }
}
