// Point/vector kernel. Points double as vectors; nothing here allocates.
use super::tolerance::EPS_LEN;
use crate::model::Point;

#[inline]
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p1.x - p2.x).hypot(p1.y - p2.y)
}

#[inline]
pub fn add(p1: Point, p2: Point) -> Point {
    Point::new(p1.x + p2.x, p1.y + p2.y)
}

#[inline]
pub fn subtract(p1: Point, p2: Point) -> Point {
    Point::new(p1.x - p2.x, p1.y - p2.y)
}

#[inline]
pub fn scale(p: Point, scaler: f64) -> Point {
    Point::new(p.x * scaler, p.y * scaler)
}

/// Moves `loc` by `offset` in the direction `angle` (radians).
#[inline]
pub fn translate(loc: Point, angle: f64, offset: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(loc.x + cos * offset, loc.y + sin * offset)
}

/// Direction of a vector, `atan2(y, x)`.
#[inline]
pub fn angle(v: Point) -> f64 {
    v.y.atan2(v.x)
}

#[inline]
pub fn magnitude(v: Point) -> f64 {
    v.x.hypot(v.y)
}

/// Unit vector along `v`; the zero vector stays zero.
#[inline]
pub fn normalize(v: Point) -> Point {
    let len = magnitude(v);
    if len > EPS_LEN { scale(v, 1.0 / len) } else { Point::new(0.0, 0.0) }
}

#[inline]
pub fn dot(p1: Point, p2: Point) -> f64 {
    p1.x * p2.x + p1.y * p2.y
}

#[inline]
pub fn perpendicular(v: Point) -> Point {
    Point::new(-v.y, v.x)
}

#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

#[inline]
pub fn lerp2d(a: Point, b: Point, t: f64) -> Point {
    Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Midpoint of two points.
#[inline]
pub fn average(p1: Point, p2: Point) -> Point {
    Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0)
}
