// Centralized tolerances for the geometry kernel

use crate::model::Point;

pub const EPS_DENOM: f64 = 1e-3;          // near-parallel guard for segment intersection
pub const EPS_LEN: f64 = 1e-12;           // zero-length vector threshold
pub const EPS_SPACING: f64 = 1e-3;        // slack when comparing building gaps to spacing
pub const EPS_BOUNDARY: f64 = 1e-6;       // a point this close to an edge is on the boundary

/// Ray origin for containment tests. It sits beyond every coordinate the
/// limits allow, and off the diagonal so rays toward axis-aligned geometry
/// do not graze its vertices.
pub const OUTSIDE_POINT: Point = Point::new(-1.0e7, -1.3e7);
