use serde::{Deserialize, Serialize};

/// A location (or a displacement vector) in world space.
///
/// Equality is exact coordinate equality; there is no epsilon. The graph
/// relies on this to identify shared endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}

/// An undirected segment between two points.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    pub const fn new(p1: Point, p2: Point) -> Segment {
        Segment { p1, p2 }
    }

    pub fn includes(&self, p: Point) -> bool {
        self.p1 == p || self.p2 == p
    }

    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }
}

// Endpoint-set equality: (a, b) == (b, a).
impl PartialEq for Segment {
    fn eq(&self, other: &Segment) -> bool {
        self.includes(other.p1) && self.includes(other.p2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// CSS color string, `rgb(..)` when opaque and `rgba(..)` otherwise.
    pub fn css(&self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}

/// Per-call drawing configuration. Nothing is shared between draw calls;
/// every primitive receives the style it should use.
///
/// Deserializing ignores unknown fields and defaults missing ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f64,
    pub dash: Vec<f64>,
}

impl Default for DrawStyle {
    fn default() -> Self {
        DrawStyle {
            fill: None,
            stroke: Some(Color::BLACK),
            line_width: 2.0,
            dash: Vec::new(),
        }
    }
}

impl DrawStyle {
    pub fn stroke(color: Color, line_width: f64) -> DrawStyle {
        DrawStyle {
            fill: None,
            stroke: Some(color),
            line_width,
            dash: Vec::new(),
        }
    }

    pub fn fill(color: Color) -> DrawStyle {
        DrawStyle {
            fill: Some(color),
            stroke: None,
            line_width: 0.0,
            dash: Vec::new(),
        }
    }

    pub fn with_stroke(mut self, color: Color, line_width: f64) -> DrawStyle {
        self.stroke = Some(color);
        self.line_width = line_width;
        self
    }

    pub fn with_dash(mut self, dash: &[f64]) -> DrawStyle {
        self.dash = dash.to_vec();
        self
    }
}
