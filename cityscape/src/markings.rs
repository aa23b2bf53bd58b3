//! Road markings placed by the user on top of generated roads.
//!
//! All kinds share one shape: a support segment of length `height` along
//! `direction`, swept into a rectangle `width` wide. What differs is which
//! rectangle edges are painted and the decoration on top.

use crate::algorithms::envelope::Envelope;
use crate::geometry::math::{add, angle, lerp2d, normalize, perpendicular, scale, translate};
use crate::geometry::polygon::Polygon;
use crate::model::{Color, DrawStyle, Point, Segment};
use crate::render::{draw_segment, Surface};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

const LIGHT_HEIGHT: f64 = 18.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightState {
    #[default]
    Off,
    Green,
    Yellow,
    Red,
}

impl LightState {
    /// Next phase in the green, yellow, red cycle. `Off` starts at green.
    pub fn next(self) -> LightState {
        match self {
            LightState::Off | LightState::Red => LightState::Green,
            LightState::Green => LightState::Yellow,
            LightState::Yellow => LightState::Red,
        }
    }
}

/// Marking kind plus any per-kind state. Serialized as the `type` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MarkingKind {
    Stop,
    Yield,
    Crossing,
    Light {
        #[serde(default)]
        state: LightState,
    },
    Target,
    Parking,
    Start,
}

impl MarkingKind {
    pub fn tag(&self) -> &'static str {
        match self {
            MarkingKind::Stop => "stop",
            MarkingKind::Yield => "yield",
            MarkingKind::Crossing => "crossing",
            MarkingKind::Light { .. } => "light",
            MarkingKind::Target => "target",
            MarkingKind::Parking => "parking",
            MarkingKind::Start => "start",
        }
    }

    pub fn from_tag(tag: &str) -> Option<MarkingKind> {
        Some(match tag {
            "stop" => MarkingKind::Stop,
            "yield" => MarkingKind::Yield,
            "crossing" => MarkingKind::Crossing,
            "light" => MarkingKind::Light { state: LightState::Off },
            "target" => MarkingKind::Target,
            "parking" => MarkingKind::Parking,
            "start" => MarkingKind::Start,
            _ => return None,
        })
    }

    /// (width, height) for a marking snapped onto a road of `road_width`.
    pub fn default_size(&self, road_width: f64) -> (f64, f64) {
        let half = road_width / 2.0;
        match self {
            MarkingKind::Crossing => (road_width, half),
            MarkingKind::Light { .. } => (half, LIGHT_HEIGHT),
            _ => (half, half),
        }
    }
}

/// Serialized form of a marking: the shape parameters plus the kind tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkingData {
    #[serde(flatten)]
    pub kind: MarkingKind,
    pub center: Point,
    pub direction_vector: Point,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marking {
    pub kind: MarkingKind,
    pub center: Point,
    pub direction: Point,
    pub width: f64,
    pub height: f64,
    pub support: Segment,
    pub poly: Polygon,
}

impl Marking {
    pub fn new(kind: MarkingKind, center: Point, direction: Point, width: f64, height: f64) -> Marking {
        let alpha = angle(direction);
        let support = Segment::new(
            translate(center, alpha, height / 2.0),
            translate(center, alpha, -height / 2.0),
        );
        let poly = Envelope::new(support, width, 0).into_poly();
        Marking { kind, center, direction, width, height, support, poly }
    }

    pub fn from_data(data: &MarkingData) -> Marking {
        Marking::new(data.kind, data.center, data.direction_vector, data.width, data.height)
    }

    pub fn to_data(&self) -> MarkingData {
        MarkingData {
            kind: self.kind,
            center: self.center,
            direction_vector: self.direction,
            width: self.width,
            height: self.height,
        }
    }

    pub fn kind(&self) -> MarkingKind {
        self.kind
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.poly.contains_point(p)
    }

    /// Advance a traffic light to its next phase; other kinds are unchanged.
    pub fn cycle_light(&mut self) -> bool {
        match &mut self.kind {
            MarkingKind::Light { state } => {
                *state = state.next();
                true
            }
            _ => false,
        }
    }

    /// Rectangle edges painted as lines for this kind.
    pub fn borders(&self) -> Vec<Segment> {
        let idx: &[usize] = match self.kind {
            MarkingKind::Stop | MarkingKind::Yield | MarkingKind::Target => &[2],
            MarkingKind::Light { .. } => &[0],
            MarkingKind::Parking => &[0, 2],
            MarkingKind::Crossing | MarkingKind::Start => &[],
        };
        idx.iter().filter_map(|&i| self.poly.segments.get(i).copied()).collect()
    }

    // Segment across the road through the center, `width` long.
    fn cross_line(&self) -> Segment {
        let perp = perpendicular(normalize(self.direction));
        Segment::new(
            add(self.center, scale(perp, self.width / 2.0)),
            add(self.center, scale(perp, -self.width / 2.0)),
        )
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let white = Color::WHITE;
        let alpha = angle(self.direction);
        match self.kind {
            MarkingKind::Stop => {
                for b in self.borders() {
                    draw_segment(surface, &b, &DrawStyle::stroke(Color::rgb(255, 255, 0), 10.0));
                }
                let text = DrawStyle::fill(white);
                surface.draw_text("STOP", self.center, alpha - FRAC_PI_2, 3.0, self.height * 0.3, &text);
            }
            MarkingKind::Yield => {
                for b in self.borders() {
                    draw_segment(surface, &b, &DrawStyle::stroke(white, 5.0));
                }
                let text = DrawStyle::fill(white);
                surface.draw_text("YIELD", self.center, alpha - FRAC_PI_2, 3.0, self.height * 0.3, &text);
            }
            MarkingKind::Crossing => {
                let line = self.cross_line();
                let style = DrawStyle::stroke(white, self.height).with_dash(&[11.0, 11.0]);
                draw_segment(surface, &line, &style);
            }
            MarkingKind::Light { state } => self.draw_light(surface, state),
            MarkingKind::Target => {
                let red = DrawStyle::fill(Color::rgb(255, 0, 0));
                surface.draw_circle(self.center, 15.0, &red);
                surface.draw_circle(self.center, 10.0, &DrawStyle::fill(white));
                surface.draw_circle(self.center, 5.0, &red);
            }
            MarkingKind::Parking => {
                for b in self.borders() {
                    draw_segment(surface, &b, &DrawStyle::stroke(white, 5.0));
                }
                let text = DrawStyle::fill(white);
                surface.draw_text("P", self.center, alpha, 1.0, self.height * 0.9, &text);
            }
            MarkingKind::Start => {
                let body = Envelope::new(self.support, self.width * 0.5, 0).into_poly();
                let style = DrawStyle::fill(Color::rgb(0x44, 0x44, 0x44)).with_stroke(white, 2.0);
                surface.draw_polygon(&body.points, &style);
                let nose = translate(self.center, alpha, self.height / 2.0);
                surface.stroke_segment(self.center, nose, &DrawStyle::stroke(white, 3.0));
            }
        }
    }

    fn draw_light(&self, surface: &mut dyn Surface, state: LightState) {
        let line = self.cross_line();
        let green = lerp2d(line.p1, line.p2, 0.2);
        let yellow = lerp2d(line.p1, line.p2, 0.5);
        let red = lerp2d(line.p1, line.p2, 0.8);
        surface.stroke_segment(red, green, &DrawStyle::stroke(Color::BLACK, self.height));

        let r = self.height * 0.6 / 2.0;
        let lamps = [
            (green, Color::rgb(0x00, 0x66, 0x00), Color::rgb(0x00, 0xFF, 0x00), LightState::Green),
            (yellow, Color::rgb(0x66, 0x66, 0x00), Color::rgb(0xFF, 0xFF, 0x00), LightState::Yellow),
            (red, Color::rgb(0x66, 0x00, 0x00), Color::rgb(0xFF, 0x00, 0x00), LightState::Red),
        ];
        for (at, dim, lit, phase) in lamps {
            let color = if phase == state { lit } else { dim };
            surface.draw_circle(at, r, &DrawStyle::fill(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn along_x(kind: MarkingKind) -> Marking {
        Marking::new(kind, Point::new(0.0, 0.0), Point::new(1.0, 0.0), 40.0, 20.0)
    }

    #[test]
    fn support_runs_along_direction() {
        let m = along_x(MarkingKind::Stop);
        assert!((m.support.p1.x - 10.0).abs() < 1e-9);
        assert!((m.support.p2.x + 10.0).abs() < 1e-9);
        assert_eq!(m.poly.points.len(), 4);
        assert!(m.contains_point(Point::new(0.0, 15.0)));
        assert!(!m.contains_point(Point::new(0.0, 25.0)));
    }

    #[test]
    fn borders_per_kind() {
        assert_eq!(along_x(MarkingKind::Stop).borders().len(), 1);
        assert_eq!(along_x(MarkingKind::Parking).borders().len(), 2);
        assert!(along_x(MarkingKind::Crossing).borders().is_empty());
    }

    #[test]
    fn tags_round_trip() {
        for tag in ["stop", "yield", "crossing", "light", "target", "parking", "start"] {
            assert_eq!(MarkingKind::from_tag(tag).map(|k| k.tag()), Some(tag));
        }
        assert!(MarkingKind::from_tag("bus").is_none());
    }

    #[test]
    fn deserialize_by_type_tag() {
        let v = json!({
            "type": "light",
            "state": "red",
            "center": {"x": 5.0, "y": 6.0},
            "directionVector": {"x": 0.0, "y": 1.0},
            "width": 50.0,
            "height": 18.0
        });
        let data: MarkingData = serde_json::from_value(v).unwrap();
        assert_eq!(data.kind, MarkingKind::Light { state: LightState::Red });
        let m = Marking::from_data(&data);
        assert_eq!(m.to_data(), data);

        let unknown = json!({"type": "bus", "center": {"x": 0, "y": 0},
            "directionVector": {"x": 1, "y": 0}, "width": 1, "height": 1});
        assert!(serde_json::from_value::<MarkingData>(unknown).is_err());
    }

    #[test]
    fn light_cycles_through_phases() {
        let mut m = along_x(MarkingKind::Light { state: LightState::Off });
        assert!(m.cycle_light());
        assert_eq!(m.kind, MarkingKind::Light { state: LightState::Green });
        m.cycle_light();
        m.cycle_light();
        m.cycle_light();
        assert_eq!(m.kind, MarkingKind::Light { state: LightState::Green });
        assert!(!along_x(MarkingKind::Stop).cycle_light());
    }
}
