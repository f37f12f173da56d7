//! Versioned footprint records for logging and tooling.
//!
//! The record layout is a stable, explicit encoding of a footprint sequence,
//! decoupled from the in-memory arena so diagnostic consumers do not break
//! when the engine's internals change.

use serde::{Deserialize, Serialize};

use crate::cache::CacheKey;
use crate::core::{Point2D, TravelDirection};
use crate::error::Result;
use crate::footprint::FootprintSequence;
use crate::source::ShapeId;

/// Format version stamped into every record.
pub const RECORD_VERSION: u32 = 1;

/// Flat encoding of one footprint segment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub index: u32,
    pub center: Point2D,
    pub half_x: f64,
    pub half_y: f64,
    /// Bearing in degrees.
    pub bearing: f64,
    pub at_rest: bool,
}

/// Snapshot of one cached footprint sequence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FootprintRecord {
    pub version: u32,
    pub shape: ShapeId,
    pub entry: TravelDirection,
    pub exit: TravelDirection,
    pub segments: Vec<SegmentRecord>,
}

impl FootprintRecord {
    pub fn from_sequence(key: &CacheKey, sequence: &FootprintSequence) -> Self {
        let segments = sequence
            .iter()
            .map(|segment| SegmentRecord {
                index: segment.index,
                center: segment.obb.center(),
                half_x: segment.obb.half_x(),
                half_y: segment.obb.half_y(),
                bearing: segment.obb.bearing().degrees(),
                at_rest: segment.at_rest,
            })
            .collect();
        Self {
            version: RECORD_VERSION,
            shape: key.shape,
            entry: key.entry,
            exit: key.exit,
            segments,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
