//! Shared shape fixtures for the footprint integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use marga_sweep::{ArcDescriptor, Clearances, MemoryShapeSource, Point2D, ShapeCurves, ShapeId};

pub const STRAIGHT_SHAPE: ShapeId = ShapeId(1);
pub const TURN_SHAPE: ShapeId = ShapeId(2);

/// Clearances of the demo vehicle: hull 1700 long and 340 wide, centroid 50
/// ahead of and 30 to the inner side of the wheel frame center.
pub fn demo_clearances() -> Clearances {
    Clearances {
        front: 900.0,
        rear: 800.0,
        inner: 200.0,
        outer: 140.0,
    }
}

/// Straight vertical lane, wheelbase 1200.
pub fn straight_curves() -> ShapeCurves {
    ShapeCurves {
        front: vec![ArcDescriptor::line(
            Point2D::new(0.0, 0.0),
            Point2D::new(0.0, 1000.0),
        )],
        rear: vec![ArcDescriptor::line(
            Point2D::new(0.0, -1200.0),
            Point2D::new(0.0, -200.0),
        )],
    }
}

/// Right-angle turn: a vertical approach, a quarter arc of radius 700 around
/// (700, 900) and a horizontal departure. The rear track runs the same lane
/// with its own span of the arc.
pub fn turn_curves() -> ShapeCurves {
    let arc_center = Point2D::new(700.0, 900.0);
    ShapeCurves {
        front: vec![
            ArcDescriptor::line(Point2D::new(0.0, 0.0), Point2D::new(0.0, 900.0)),
            ArcDescriptor::circular(
                Point2D::new(0.0, 900.0),
                arc_center,
                Point2D::new(700.0, 1600.0),
                700.0,
            ),
            ArcDescriptor::line(Point2D::new(700.0, 1600.0), Point2D::new(1800.0, 1600.0)),
        ],
        rear: vec![
            ArcDescriptor::line(Point2D::new(0.0, -1200.0), Point2D::new(0.0, 900.0)),
            ArcDescriptor::circular(
                Point2D::new(0.0, 900.0),
                arc_center,
                Point2D::new(600.0, 900.0 + 480_000f64.sqrt()),
                700.0,
            ),
        ],
    }
}

/// Source holding both demo shapes.
pub fn demo_source() -> Arc<MemoryShapeSource> {
    let mut source = MemoryShapeSource::new();
    source.insert(STRAIGHT_SHAPE, straight_curves(), demo_clearances());
    source.insert(TURN_SHAPE, turn_curves(), demo_clearances());
    Arc::new(source)
}
