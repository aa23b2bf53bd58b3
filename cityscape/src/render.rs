//! Drawing boundary between the scene and whatever paints it.
//!
//! Every call carries its own [`DrawStyle`]; a surface must not let one
//! call's style leak into the next.

use crate::geometry::polygon::Polygon;
use crate::model::{DrawStyle, Point, Segment};

pub trait Surface {
    fn stroke_segment(&mut self, a: Point, b: Point, style: &DrawStyle);
    /// Fill then stroke a closed ring, per the style's `fill`/`stroke`.
    fn draw_polygon(&mut self, points: &[Point], style: &DrawStyle);
    fn draw_circle(&mut self, center: Point, radius: f64, style: &DrawStyle);
    /// Centered text, rotated by `rotation` radians and stretched vertically by `stretch`.
    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        rotation: f64,
        stretch: f64,
        size: f64,
        style: &DrawStyle,
    );
}

pub(crate) fn draw_segment(surface: &mut dyn Surface, seg: &Segment, style: &DrawStyle) {
    surface.stroke_segment(seg.p1, seg.p2, style);
}

pub(crate) fn draw_poly(surface: &mut dyn Surface, poly: &Polygon, style: &DrawStyle) {
    if poly.is_empty() {
        return;
    }
    surface.draw_polygon(&poly.points, style);
}
