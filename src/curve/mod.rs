//! Conic guide-path curves and the point stepper.

pub mod build;
pub mod segment;
pub mod stepper;

pub use build::ArcDescriptor;
pub use segment::{ConicSegment, CurveKind};
pub use stepper::Step;
