//! Swept-footprint sequences and the path walk that builds them.

pub mod sequence;
pub mod walk;

pub use sequence::{FootprintSegment, FootprintSequence};
