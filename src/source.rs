//! Shape data access: curve descriptors, clearances and assembled paths.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::Point2D;
use crate::curve::{ArcDescriptor, ConicSegment};
use crate::error::{Result, SweepError};

/// Identifier of a path shape in the layout data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

/// Clearances from a vehicle's wheel reference frame to its physical hull,
/// measured ahead, behind and to each side of the frame center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Clearances {
    pub front: f64,
    pub rear: f64,
    pub inner: f64,
    pub outer: f64,
}

/// Curve descriptors for one shape: the tracks traced by the front and rear
/// reference points.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShapeCurves {
    pub front: Vec<ArcDescriptor>,
    pub rear: Vec<ArcDescriptor>,
}

/// Supplies curve and clearance records per shape. Implemented by the layout
/// loader in production and by [`MemoryShapeSource`] in tests and tools.
pub trait ShapeSource: Send + Sync {
    fn curves(&self, shape: ShapeId) -> Result<ShapeCurves>;
    fn clearances(&self, shape: ShapeId) -> Result<Clearances>;
}

/// In-memory shape store.
#[derive(Debug, Default)]
pub struct MemoryShapeSource {
    records: HashMap<ShapeId, (ShapeCurves, Clearances)>,
}

impl MemoryShapeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shape: ShapeId, curves: ShapeCurves, clearances: Clearances) {
        self.records.insert(shape, (curves, clearances));
    }
}

impl ShapeSource for MemoryShapeSource {
    fn curves(&self, shape: ShapeId) -> Result<ShapeCurves> {
        self.records
            .get(&shape)
            .map(|(curves, _)| curves.clone())
            .ok_or_else(|| SweepError::ShapeData(format!("no curve record for shape {}", shape.0)))
    }

    fn clearances(&self, shape: ShapeId) -> Result<Clearances> {
        self.records
            .get(&shape)
            .map(|(_, clearances)| *clearances)
            .ok_or_else(|| {
                SweepError::ShapeData(format!("no clearance record for shape {}", shape.0))
            })
    }
}

/// A walkable path: validated conic segments for the front and rear tracks.
#[derive(Clone, Debug)]
pub struct GuidePath {
    front: Vec<ConicSegment>,
    rear: Vec<ConicSegment>,
}

impl GuidePath {
    pub fn new(front: Vec<ConicSegment>, rear: Vec<ConicSegment>) -> Result<Self> {
        if front.is_empty() || rear.is_empty() {
            return Err(SweepError::ShapeData(
                "guide path needs at least one front and one rear track segment".into(),
            ));
        }
        Ok(Self { front, rear })
    }

    /// Builds the path from raw curve descriptors, validating each segment.
    pub fn from_curves(front: &[ArcDescriptor], rear: &[ArcDescriptor]) -> Result<Self> {
        let front = front
            .iter()
            .map(ArcDescriptor::to_segment)
            .collect::<Result<Vec<_>>>()?;
        let rear = rear
            .iter()
            .map(ArcDescriptor::to_segment)
            .collect::<Result<Vec<_>>>()?;
        GuidePath::new(front, rear)
    }

    #[inline]
    pub fn front(&self) -> &[ConicSegment] {
        &self.front
    }

    #[inline]
    pub fn rear(&self) -> &[ConicSegment] {
        &self.rear
    }

    /// Front and rear reference points of a vehicle standing at the path
    /// entry.
    pub fn entry_points(&self) -> (Point2D, Point2D) {
        (self.front[0].start(), self.rear[0].start())
    }

    /// Front and rear reference points of a vehicle standing at the path
    /// exit.
    pub fn exit_points(&self) -> (Point2D, Point2D) {
        (
            self.front[self.front.len() - 1].end(),
            self.rear[self.rear.len() - 1].end(),
        )
    }
}
