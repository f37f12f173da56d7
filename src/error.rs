//! Error types for the occupancy engine.

use thiserror::Error;

/// Errors surfaced by curve construction, footprint growth and shape lookup.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Curve data does not describe a steppable conic segment.
    #[error("malformed curve: {0}")]
    MalformedCurve(String),

    /// The coupled walk could not advance along the guide path.
    #[error("path walk failed: {0}")]
    PathWalk(String),

    /// The shape source could not supply data for a shape.
    #[error("shape data unavailable: {0}")]
    ShapeData(String),

    /// A footprint sequence ran out of preallocated slots.
    #[error("footprint capacity of {capacity} slots exceeded")]
    CapacityExceeded { capacity: usize },

    /// Encoding a diagnostic record failed.
    #[error("record encoding failed: {0}")]
    Record(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SweepError>;
