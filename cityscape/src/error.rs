use thiserror::Error;

/// Failure to rebuild a graph or world from serialized data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("too many points: {got} (max {max})")]
    TooManyPoints { got: usize, max: usize },
    #[error("too many segments: {got} (max {max})")]
    TooManySegments { got: usize, max: usize },
    #[error("too many markings: {got} (max {max})")]
    TooManyMarkings { got: usize, max: usize },
    #[error("coordinate out of bounds: ({x}, {y})")]
    CoordinateOutOfBounds { x: f64, y: f64 },
    #[error("segment endpoint index {index} out of range for {len} points")]
    DanglingSegment { index: usize, len: usize },
    #[error("generation parameter {field} out of range: {value}")]
    InvalidParams { field: &'static str, value: f64 },
}

impl LoadError {
    /// Stable machine-readable code for the binding layer.
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Json(_) => "invalid_json",
            LoadError::TooManyPoints { .. }
            | LoadError::TooManySegments { .. }
            | LoadError::TooManyMarkings { .. } => "too_large",
            LoadError::CoordinateOutOfBounds { .. } | LoadError::InvalidParams { .. } => {
                "out_of_range"
            }
            LoadError::DanglingSegment { .. } => "invalid_id",
        }
    }
}
