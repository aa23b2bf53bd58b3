use crate::geometry::polygon::bbox_of;
use crate::model::{DrawStyle, Point};
use crate::render::Surface;
use crate::world::World;
use std::fmt::Write;

/// A [`Surface`] that accumulates SVG elements.
#[derive(Debug, Default)]
pub struct SvgSurface {
    body: String,
    elements: usize,
}

fn paint_attrs(style: &DrawStyle) -> String {
    let mut s = String::new();
    match style.fill {
        Some(c) => {
            let _ = write!(s, " fill=\"{}\"", c.css());
        }
        None => s.push_str(" fill=\"none\""),
    }
    if let Some(c) = style.stroke {
        let _ = write!(
            s,
            " stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"",
            c.css(),
            style.line_width
        );
        if !style.dash.is_empty() {
            let dash: Vec<String> = style.dash.iter().map(|d| d.to_string()).collect();
            let _ = write!(s, " stroke-dasharray=\"{}\"", dash.join(" "));
        }
    }
    s
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl SvgSurface {
    pub fn new() -> Self {
        SvgSurface::default()
    }

    pub fn element_count(&self) -> usize {
        self.elements
    }

    /// Wrap the accumulated elements in an `<svg>` root with the given
    /// `(min_x, min_y, width, height)` view box.
    pub fn finish(self, view_box: (f64, f64, f64, f64)) -> String {
        let (x, y, w, h) = view_box;
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">{}</svg>",
            x, y, w, h, self.body
        )
    }
}

impl Surface for SvgSurface {
    fn stroke_segment(&mut self, a: Point, b: Point, style: &DrawStyle) {
        let _ = write!(
            self.body,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
            a.x,
            a.y,
            b.x,
            b.y,
            paint_attrs(&DrawStyle { fill: None, ..style.clone() })
        );
        self.elements += 1;
    }

    fn draw_polygon(&mut self, points: &[Point], style: &DrawStyle) {
        if points.is_empty() {
            return;
        }
        let pts: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
        let _ = write!(self.body, "<polygon points=\"{}\"{}/>", pts.join(" "), paint_attrs(style));
        self.elements += 1;
    }

    fn draw_circle(&mut self, center: Point, radius: f64, style: &DrawStyle) {
        let _ = write!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
            center.x,
            center.y,
            radius,
            paint_attrs(style)
        );
        self.elements += 1;
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        rotation: f64,
        stretch: f64,
        size: f64,
        style: &DrawStyle,
    ) {
        let _ = write!(
            self.body,
            "<text transform=\"translate({} {}) rotate({}) scale(1 {})\" font-size=\"{}\" \
             font-weight=\"bold\" text-anchor=\"middle\" dominant-baseline=\"central\"{}>{}</text>",
            at.x,
            at.y,
            rotation.to_degrees(),
            stretch,
            size,
            paint_attrs(style),
            escape(text)
        );
        self.elements += 1;
    }
}

/// Render the whole world, framed around its generated content plus `margin`.
pub fn render_world(world: &World, view_point: Point, margin: f64) -> String {
    let mut surface = SvgSurface::new();
    world.draw(&mut surface, view_point);
    let corners = world
        .envelopes
        .iter()
        .flat_map(|e| e.poly.points.iter().copied())
        .chain(world.buildings.iter().flat_map(|b| b.base.points.iter().copied()))
        .chain(world.trees.iter().flat_map(|t| t.base.points.iter().copied()));
    let view_box = match bbox_of(corners) {
        Some((left, top, right, bottom)) => (
            left - margin,
            top - margin,
            right - left + margin * 2.0,
            bottom - top + margin * 2.0,
        ),
        None => (-margin, -margin, margin * 2.0, margin * 2.0),
    };
    surface.finish(view_box)
}
