//! Diagnostic output: versioned records and SVG sketches.

pub mod record;
pub mod svg;

pub use record::{FootprintRecord, SegmentRecord, RECORD_VERSION};
pub use svg::{SvgConfig, SvgSketch};
