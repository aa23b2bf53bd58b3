//! Generated scene items: extruded buildings and layered trees.

use crate::geometry::math::{add, lerp, lerp2d, scale, subtract, translate};
use crate::geometry::polygon::Polygon;
use crate::model::{Color, DrawStyle, Point};
use crate::render::{draw_poly, Surface};
use std::f64::consts::PI;

const BUILDING_FILL: Color = Color::WHITE;
const BUILDING_STROKE: Color = Color::rgb(0xAA, 0xAA, 0xAA);
const TREE_LEVELS: usize = 7;
const TREE_TOP_SIZE: f64 = 40.0;
const TREE_LEVEL_VERTICES: usize = 32;

#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    pub base: Polygon,
    /// How far the roof is pushed away from the view point, as a fraction
    /// of each base vertex's offset from it.
    pub height_coef: f64,
}

impl Building {
    pub fn new(base: Polygon) -> Building {
        Building { base, height_coef: 0.4 }
    }

    fn roof_points(&self, view_point: Point) -> Vec<Point> {
        self.base
            .points
            .iter()
            .map(|&p| add(p, scale(subtract(p, view_point), self.height_coef)))
            .collect()
    }

    /// Side walls, farthest from the view point first.
    pub fn sides(&self, view_point: Point) -> Vec<Polygon> {
        let base = &self.base.points;
        let top = self.roof_points(view_point);
        let n = base.len();
        let mut sides: Vec<Polygon> = (0..n)
            .map(|i| {
                let next = (i + 1) % n;
                Polygon::new(vec![base[i], base[next], top[next], top[i]])
            })
            .collect();
        sort_far_to_near(&mut sides, view_point);
        sides
    }

    pub fn ceiling(&self, view_point: Point) -> Polygon {
        Polygon::new(self.roof_points(view_point))
    }

    pub fn draw(&self, surface: &mut dyn Surface, view_point: Point) {
        let style = DrawStyle::fill(BUILDING_FILL).with_stroke(BUILDING_STROKE, 2.0);
        draw_poly(surface, &self.base, &style);
        for side in self.sides(view_point) {
            draw_poly(surface, &side, &style);
        }
        draw_poly(surface, &self.ceiling(view_point), &style);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub center: Point,
    /// Canopy diameter at ground level.
    pub size: f64,
    pub height_coef: f64,
    pub base: Polygon,
}

impl Tree {
    pub fn new(center: Point, size: f64) -> Tree {
        let base = canopy_level(center, center, size);
        Tree { center, size, height_coef: 0.3, base }
    }

    /// The foliage layers bottom to top, each with its fill color.
    pub fn levels(&self, view_point: Point) -> Vec<(Polygon, Color)> {
        let diff = subtract(self.center, view_point);
        let top = add(self.center, scale(diff, self.height_coef));
        (0..TREE_LEVELS)
            .map(|level| {
                let t = level as f64 / (TREE_LEVELS - 1) as f64;
                let at = lerp2d(self.center, top, t);
                let green = lerp(50.0, 200.0, t).round() as u8;
                let size = lerp(self.size, TREE_TOP_SIZE, t);
                (canopy_level(self.center, at, size), Color::rgb(30, green, 70))
            })
            .collect()
    }

    pub fn draw(&self, surface: &mut dyn Surface, view_point: Point) {
        for (poly, color) in self.levels(view_point) {
            let style = DrawStyle {
                fill: Some(color),
                stroke: None,
                line_width: 0.0,
                dash: Vec::new(),
            };
            draw_poly(surface, &poly, &style);
        }
    }
}

// Jitter depends only on the tree's own center and the level size, so a
// tree keeps its silhouette from frame to frame.
fn canopy_level(seed: Point, at: Point, size: f64) -> Polygon {
    let rad = size / 2.0;
    let points = (0..TREE_LEVEL_VERTICES)
        .map(|k| {
            let theta = k as f64 * PI / 16.0;
            let kind_of_random = (((theta + seed.x) * size) % 17.0).cos().powi(2);
            translate(at, theta, rad * lerp(0.5, 1.0, kind_of_random))
        })
        .collect();
    Polygon::new(points)
}

pub(crate) fn sort_far_to_near(polys: &mut [Polygon], view_point: Point) {
    polys.sort_by(|a, b| {
        b.distance_to_point(view_point)
            .total_cmp(&a.distance_to_point(view_point))
    });
}
