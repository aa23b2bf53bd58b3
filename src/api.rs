use crate::error;
use crate::interop::{arr_f64, arr_u32, new_obj, set_kv, to_js};
use crate::logger;
use crate::World;
use cityscape::geometry::limits;
use cityscape::markings::MarkingKind;
use cityscape::svg::render_world;
use cityscape::{Point, Segment, WorldParams};
use js_sys::{Float64Array, Object};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

const SVG_MARGIN: f64 = 50.0;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route core log records to the browser console. Unknown levels fall back to `warn`.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    logger::init(logger::parse_level(level).unwrap_or(log::LevelFilter::Warn));
}

fn in_bounds(x: f64, y: f64) -> bool {
    limits::in_coord_bounds(x) && limits::in_coord_bounds(y)
}

fn check_coords(names: [&str; 2], x: f64, y: f64) -> Result<Point, JsValue> {
    for (name, v) in names.into_iter().zip([x, y]) {
        if !v.is_finite() {
            return Err(error::non_finite(name));
        }
        if !limits::in_coord_bounds(v) {
            return Err(error::out_of_range(name, limits::COORD_MIN, limits::COORD_MAX, v));
        }
    }
    Ok(Point::new(x, y))
}

#[wasm_bindgen]
impl World {
    #[wasm_bindgen(constructor)]
    pub fn new() -> World {
        crate::World::rs_new()
    }
    pub fn graph_hash(&self) -> u64 {
        self.rs_graph_hash()
    }

    // Parameters
    pub fn params(&self) -> JsValue {
        to_js(&self.inner.params)
    }
    /// Partial objects are fine: missing fields take defaults. Regenerates.
    pub fn set_params_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<WorldParams>(v) {
            Ok(params) => match self.inner.set_params(params) {
                Ok(()) => error::ok(JsValue::TRUE),
                Err(e) => error::load_error(&e),
            },
            Err(e) => error::err("invalid_json", format!("{}", e), None),
        }
    }

    // Points
    pub fn add_point(&mut self, x: f64, y: f64) -> bool {
        in_bounds(x, y) && self.inner.graph_mut().try_add_point(Point::new(x, y))
    }
    pub fn add_point_res(&mut self, x: f64, y: f64) -> JsValue {
        match check_coords(["x", "y"], x, y) {
            Ok(p) => error::ok(JsValue::from_bool(self.inner.graph_mut().try_add_point(p))),
            Err(e) => e,
        }
    }
    pub fn remove_point(&mut self, x: f64, y: f64) -> bool {
        let p = Point::new(x, y);
        if !self.inner.graph().contains_point(p) {
            return false;
        }
        self.inner.graph_mut().remove_point(p);
        true
    }
    pub fn move_point(&mut self, from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> bool {
        in_bounds(to_x, to_y)
            && self
                .inner
                .graph_mut()
                .move_point(Point::new(from_x, from_y), Point::new(to_x, to_y))
    }
    pub fn move_point_res(&mut self, from_x: f64, from_y: f64, to_x: f64, to_y: f64) -> JsValue {
        let to = match check_coords(["to_x", "to_y"], to_x, to_y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        let from = Point::new(from_x, from_y);
        if !self.inner.graph().contains_point(from) {
            return error::not_found("point", from_x, from_y);
        }
        error::ok(JsValue::from_bool(self.inner.graph_mut().move_point(from, to)))
    }
    pub fn point_count(&self) -> u32 {
        self.inner.graph().point_count() as u32
    }
    /// `[x, y]` of the closest point within `threshold`, or `null`.
    pub fn nearest_point(&self, x: f64, y: f64, threshold: f64) -> JsValue {
        match self.inner.graph().nearest_point(Point::new(x, y), threshold) {
            Some(p) => to_js(&[p.x, p.y]),
            None => JsValue::NULL,
        }
    }
    /// Flat `[x0, y0, x1, y1, ...]` in insertion order.
    pub fn point_data(&self) -> Float64Array {
        let flat: Vec<f64> = self.inner.graph().points().iter().flat_map(|p| [p.x, p.y]).collect();
        arr_f64(&flat)
    }

    // Segments
    pub fn add_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> bool {
        let seg = Segment::new(Point::new(x1, y1), Point::new(x2, y2));
        let g = self.inner.graph_mut();
        if !g.contains_point(seg.p1) || !g.contains_point(seg.p2) {
            return false;
        }
        g.try_add_segment(seg)
    }
    pub fn add_segment_res(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> JsValue {
        let g = self.inner.graph();
        if !g.contains_point(Point::new(x1, y1)) {
            return error::not_found("point", x1, y1);
        }
        if !g.contains_point(Point::new(x2, y2)) {
            return error::not_found("point", x2, y2);
        }
        error::ok(JsValue::from_bool(self.add_segment(x1, y1, x2, y2)))
    }
    pub fn remove_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> bool {
        let seg = Segment::new(Point::new(x1, y1), Point::new(x2, y2));
        if !self.inner.graph().contains_segment(&seg) {
            return false;
        }
        self.inner.graph_mut().remove_segment(&seg);
        true
    }
    pub fn segment_count(&self) -> u32 {
        self.inner.graph().segment_count() as u32
    }
    /// Flat `[x1, y1, x2, y2, ...]` per segment.
    pub fn segment_data(&self) -> Float64Array {
        arr_f64(&flatten_segments(self.inner.graph().segments()))
    }
    pub fn clear(&mut self) {
        self.inner.graph_mut().dispose();
        self.inner.markings.clear();
    }

    // Generation
    /// Regenerate if the graph changed since the last call.
    pub fn sync(&mut self) -> bool {
        self.inner.sync()
    }
    pub fn road_border_data(&self) -> Float64Array {
        arr_f64(&flatten_segments(&self.inner.road_borders))
    }
    /// `{ offsets, coords }`: building `i` owns `coords[2*offsets[i]..2*offsets[i+1]]`.
    pub fn building_data(&self) -> Object {
        let mut offsets = Vec::with_capacity(self.inner.buildings.len() + 1);
        let mut coords = Vec::new();
        offsets.push(0u32);
        for b in &self.inner.buildings {
            coords.extend(b.base.points.iter().flat_map(|p| [p.x, p.y]));
            offsets.push((coords.len() / 2) as u32);
        }
        let o = new_obj();
        set_kv(&o, "offsets", &arr_u32(&offsets).into());
        set_kv(&o, "coords", &arr_f64(&coords).into());
        o
    }
    /// Flat `[cx, cy, size, ...]` per tree.
    pub fn tree_data(&self) -> Float64Array {
        let flat: Vec<f64> = self
            .inner
            .trees
            .iter()
            .flat_map(|t| [t.center.x, t.center.y, t.size])
            .collect();
        arr_f64(&flat)
    }
    pub fn render_svg(&self, view_x: f64, view_y: f64) -> String {
        render_world(&self.inner, Point::new(view_x, view_y), SVG_MARGIN)
    }

    // Markings
    pub fn add_marking_res(&mut self, kind: &str, x: f64, y: f64, threshold: f64) -> JsValue {
        let Some(kind) = MarkingKind::from_tag(kind) else {
            return error::invalid_kind(kind);
        };
        let loc = match check_coords(["x", "y"], x, y) {
            Ok(p) => p,
            Err(e) => return e,
        };
        if !threshold.is_finite() || threshold < 0.0 {
            return error::out_of_range("threshold", 0.0, f64::MAX, threshold);
        }
        if self.inner.markings.len() >= limits::MAX_MARKINGS {
            return error::out_of_range(
                "markings",
                0.0,
                limits::MAX_MARKINGS as f64,
                self.inner.markings.len() as f64,
            );
        }
        match self.inner.marking_intent(kind, loc, threshold) {
            Some(m) => {
                let data = m.to_data();
                self.inner.add_marking(m);
                error::ok(to_js(&data))
            }
            None => error::not_found("road", x, y),
        }
    }
    pub fn remove_marking_at(&mut self, x: f64, y: f64) -> bool {
        self.inner.remove_marking_at(Point::new(x, y))
    }
    /// Advance the first traffic light containing the point.
    pub fn cycle_light_at(&mut self, x: f64, y: f64) -> bool {
        let p = Point::new(x, y);
        self.inner
            .markings
            .iter_mut()
            .filter(|m| m.contains_point(p))
            .any(|m| m.cycle_light())
    }
    pub fn marking_count(&self) -> u32 {
        self.inner.markings.len() as u32
    }
    pub fn markings(&self) -> JsValue {
        let data: Vec<_> = self.inner.markings.iter().map(|m| m.to_data()).collect();
        to_js(&data)
    }

    // Viewport
    pub fn set_view(&mut self, zoom: f64, offset_x: f64, offset_y: f64) -> bool {
        if !(zoom.is_finite() && zoom > 0.0 && offset_x.is_finite() && offset_y.is_finite()) {
            return false;
        }
        self.inner.zoom = zoom;
        self.inner.offset = Point::new(offset_x, offset_y);
        true
    }
    pub fn zoom(&self) -> f64 {
        self.inner.zoom
    }

    // Persistence
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.to_json())
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match cityscape::World::from_json(val) {
                Ok(world) => {
                    self.inner = world;
                    true
                }
                Err(_) => false,
            },
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match cityscape::World::from_json(val) {
                Ok(world) => {
                    self.inner = world;
                    error::ok(JsValue::TRUE)
                }
                Err(e) => error::load_error(&e),
            },
            Err(e) => error::err("invalid_json", format!("{}", e), None),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

fn flatten_segments(segs: &[Segment]) -> Vec<f64> {
    segs.iter().flat_map(|s| [s.p1.x, s.p1.y, s.p2.x, s.p2.y]).collect()
}
