use crate::algorithms::boolean::union;
use crate::algorithms::envelope::{Envelope, DEFAULT_ROUNDNESS};
use crate::error::LoadError;
use crate::geometry::limits;
use crate::algorithms::placement::{generate_buildings, generate_trees};
use crate::geometry::polygon::Polygon;
use crate::geometry::segment::nearest_segment;
use crate::items::{Building, Tree};
use crate::markings::{Marking, MarkingKind};
use crate::model::{Color, DrawStyle, Point, Segment};
use crate::render::{draw_poly, draw_segment, Surface};
use crate::Graph;
use instant::Instant;
use log::debug;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde::{Deserialize, Serialize};

/// Generation parameters. Every field has a default, so partial JSON works.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldParams {
    pub road_width: f64,
    pub road_roundness: u32,
    pub building_width: f64,
    pub building_min_length: f64,
    pub building_roundness: u32,
    pub spacing: f64,
    pub tree_size: f64,
    pub tree_count: usize,
    pub seed: u64,
}

impl Default for WorldParams {
    fn default() -> Self {
        WorldParams {
            road_width: 100.0,
            road_roundness: 10,
            building_width: 150.0,
            building_min_length: 150.0,
            building_roundness: DEFAULT_ROUNDNESS,
            spacing: 50.0,
            tree_size: 200.0,
            tree_count: 120,
            seed: 42,
        }
    }
}

impl WorldParams {
    /// Bounds that keep one generation pass finite: slot counts, cap
    /// vertex counts and tree attempts all scale with these.
    pub fn validate(&self) -> Result<(), LoadError> {
        let sizes = [
            ("roadWidth", self.road_width),
            ("buildingWidth", self.building_width),
            ("buildingMinLength", self.building_min_length),
            ("spacing", self.spacing),
            ("treeSize", self.tree_size),
        ];
        for (field, value) in sizes {
            if !(value.is_finite() && (0.0..=limits::MAX_FEATURE_SIZE).contains(&value)) {
                return Err(LoadError::InvalidParams { field, value });
            }
        }
        if self.building_min_length + self.spacing < limits::MIN_SLOT_LENGTH {
            return Err(LoadError::InvalidParams {
                field: "buildingMinLength",
                value: self.building_min_length,
            });
        }
        let roundness = [
            ("roadRoundness", self.road_roundness),
            ("buildingRoundness", self.building_roundness),
        ];
        for (field, r) in roundness {
            if r > limits::MAX_ROUNDNESS {
                return Err(LoadError::InvalidParams { field, value: r as f64 });
            }
        }
        if self.tree_count > limits::MAX_TREE_COUNT {
            return Err(LoadError::InvalidParams {
                field: "treeCount",
                value: self.tree_count as f64,
            });
        }
        Ok(())
    }
}

/// Anything the compositor can depth-sort: it has a ground footprint and
/// can draw itself relative to the view point.
#[derive(Clone, Copy, Debug)]
pub enum SceneItem<'a> {
    Tree(&'a Tree),
    Building(&'a Building),
}

impl<'a> SceneItem<'a> {
    pub fn footprint(&self) -> &'a Polygon {
        match *self {
            SceneItem::Tree(t) => &t.base,
            SceneItem::Building(b) => &b.base,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, view_point: Point) {
        match *self {
            SceneItem::Tree(t) => t.draw(surface, view_point),
            SceneItem::Building(b) => b.draw(surface, view_point),
        }
    }
}

/// Sort far-to-near by footprint distance; the sort is stable, so equally
/// distant items keep their input order.
pub fn painter_order<'a>(items: &mut [SceneItem<'a>], view_point: Point) {
    items.sort_by(|a, b| {
        b.footprint()
            .distance_to_point(view_point)
            .total_cmp(&a.footprint().distance_to_point(view_point))
    });
}

/// The road graph plus everything generated from it.
#[derive(Debug)]
pub struct World {
    pub(crate) graph: Graph,
    pub params: WorldParams,
    pub envelopes: Vec<Envelope>,
    pub road_borders: Vec<Segment>,
    pub buildings: Vec<Building>,
    pub trees: Vec<Tree>,
    pub markings: Vec<Marking>,
    pub zoom: f64,
    pub offset: Point,
    last_hash: Option<u64>,
}

impl World {
    /// `params` are taken as given; untrusted input goes through
    /// [`WorldParams::validate`] first (as [`World::load`] does).
    pub fn new(graph: Graph, params: WorldParams) -> World {
        let mut world = World {
            graph,
            params,
            envelopes: Vec::new(),
            road_borders: Vec::new(),
            buildings: Vec::new(),
            trees: Vec::new(),
            markings: Vec::new(),
            zoom: 1.0,
            offset: Point::new(0.0, 0.0),
            last_hash: None,
        };
        world.sync();
        world
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Write access for the editor. Changes are picked up by the next [`World::sync`].
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Regenerate if the graph changed since the last pass. Returns whether it did.
    pub fn sync(&mut self) -> bool {
        let hash = self.graph.hash();
        if self.last_hash == Some(hash) {
            return false;
        }
        self.generate();
        self.last_hash = Some(hash);
        true
    }

    /// Replace parameters and regenerate unconditionally. Invalid
    /// parameters leave the world untouched.
    pub fn set_params(&mut self, params: WorldParams) -> Result<(), LoadError> {
        params.validate()?;
        self.params = params;
        self.generate();
        self.last_hash = Some(self.graph.hash());
        Ok(())
    }

    /// Full generation pass. Markings are left alone.
    pub fn generate(&mut self) {
        let started = Instant::now();
        let roads = self.graph.segments().to_vec();
        let p = &self.params;

        self.envelopes = roads
            .iter()
            .map(|&seg| Envelope::new(seg, p.road_width, p.road_roundness))
            .collect();
        let mut polys: Vec<Polygon> = self.envelopes.iter().map(|e| e.poly.clone()).collect();
        self.road_borders = union(&mut polys);
        self.buildings = generate_buildings(&roads, p);

        let road_polys: Vec<&Polygon> = self.envelopes.iter().map(|e| &e.poly).collect();
        let mut rng = XorShiftRng::seed_from_u64(p.seed);
        self.trees = generate_trees(&self.road_borders, &self.buildings, &road_polys, p, &mut rng);

        debug!(
            "generated {} envelopes, {} borders, {} buildings, {} trees in {:?}",
            self.envelopes.len(),
            self.road_borders.len(),
            self.buildings.len(),
            self.trees.len(),
            started.elapsed()
        );
    }

    /// Trees and buildings in the order they must be drawn.
    pub fn scene_items(&self, view_point: Point) -> Vec<SceneItem<'_>> {
        let mut items: Vec<SceneItem<'_>> = self
            .trees
            .iter()
            .map(SceneItem::Tree)
            .chain(self.buildings.iter().map(SceneItem::Building))
            .collect();
        painter_order(&mut items, view_point);
        items
    }

    /// A marking of `kind` snapped onto the nearest road within `threshold`
    /// of `loc`, or `None` when no road is close enough or `loc` projects
    /// past the road's ends.
    pub fn marking_intent(&self, kind: MarkingKind, loc: Point, threshold: f64) -> Option<Marking> {
        let seg = nearest_segment(loc, self.graph.segments(), threshold)?;
        let proj = seg.project_point(loc);
        if !(0.0..=1.0).contains(&proj.offset) {
            return None;
        }
        let (width, height) = kind.default_size(self.params.road_width);
        Some(Marking::new(kind, proj.point, seg.direction_vector(), width, height))
    }

    pub fn add_marking(&mut self, marking: Marking) {
        self.markings.push(marking);
    }

    /// Remove the first marking whose shape contains `p`.
    pub fn remove_marking_at(&mut self, p: Point) -> bool {
        match self.markings.iter().position(|m| m.contains_point(p)) {
            Some(i) => {
                self.markings.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, view_point: Point) {
        let asphalt = Color::rgb(0xBB, 0xBB, 0xBB);
        let surface_style = DrawStyle::fill(asphalt).with_stroke(asphalt, 15.0);
        for env in &self.envelopes {
            draw_poly(surface, &env.poly, &surface_style);
        }
        let center_line = DrawStyle::stroke(Color::WHITE, 4.0).with_dash(&[10.0, 10.0]);
        for seg in self.graph.segments() {
            draw_segment(surface, seg, &center_line);
        }
        let border = DrawStyle::stroke(Color::WHITE, 4.0);
        for seg in &self.road_borders {
            draw_segment(surface, seg, &border);
        }
        for marking in &self.markings {
            marking.draw(surface);
        }
        for item in self.scene_items(view_point) {
            item.draw(surface, view_point);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        World::new(Graph::new(), WorldParams::default())
    }
}
