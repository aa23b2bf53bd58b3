// Ingestion limits applied when loading graphs and worlds from untrusted JSON

pub const MAX_POINTS: usize = 50_000;
pub const MAX_SEGMENTS: usize = 100_000;
pub const MAX_MARKINGS: usize = 10_000;

// Generation parameters
pub const MAX_ROUNDNESS: u32 = 64;
pub const MAX_TREE_COUNT: usize = 10_000;
pub const MAX_FEATURE_SIZE: f64 = 10_000.0; // widths, lengths, spacing, tree size
pub const MIN_SLOT_LENGTH: f64 = 1.0;       // building min length + spacing

// Kept well inside tolerance::OUTSIDE_POINT so containment rays always start outside.
pub const COORD_MIN: f64 = -1_000_000.0;
pub const COORD_MAX: f64 = 1_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn point_in_bounds(p: crate::model::Point) -> bool { in_coord_bounds(p.x) && in_coord_bounds(p.y) }
