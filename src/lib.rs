//! # MargaSweep
//!
//! Swept-footprint occupancy engine for AGV guide paths.
//!
//! ## Overview
//!
//! For a vehicle moving along a predefined guide path, the engine computes
//! the sequence of space the vehicle physically occupies and lets a traffic
//! controller test that space against other vehicles and restricted zones:
//!
//! - **Curve model**: path segments as general conic sections (lines,
//!   circular and elliptic arcs, hyperbolic transitions) with a recognized
//!   root branch per segment
//! - **Point stepper**: two-iteration Newton walk along a curve at a fixed
//!   arc interval, or holding a fixed separation from a reference point
//! - **Oriented boxes**: exact separating-axis overlap tests between swept
//!   boxes, other footprints and zone rectangles
//! - **Footprint sequences**: deduplicated box chains built by a coupled
//!   front/rear walk, cached per shape and traversal direction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use marga_sweep::{
//!     ArcDescriptor, Clearances, FootprintCache, MemoryShapeSource, Point2D, ShapeCurves,
//!     ShapeId, SweepConfig, TravelDirection,
//! };
//!
//! // Describe one straight guide path: the tracks of the front and rear
//! // wheel reference points, plus body clearances around the wheel frame.
//! let mut source = MemoryShapeSource::new();
//! source.insert(
//!     ShapeId(1),
//!     ShapeCurves {
//!         front: vec![ArcDescriptor::line(
//!             Point2D::new(0.0, 0.0),
//!             Point2D::new(0.0, 1000.0),
//!         )],
//!         rear: vec![ArcDescriptor::line(
//!             Point2D::new(0.0, -1200.0),
//!             Point2D::new(0.0, -200.0),
//!         )],
//!     },
//!     Clearances { front: 900.0, rear: 800.0, inner: 200.0, outer: 140.0 },
//! );
//!
//! // Walk the path once; later lookups reuse the cached sequence.
//! let cache = FootprintCache::new(Arc::new(source), SweepConfig::default());
//! let footprint = cache
//!     .base_footprint(ShapeId(1), TravelDirection::XInc, TravelDirection::YInc)
//!     .unwrap();
//! println!("path occupies {} boxes", footprint.len());
//! ```
//!
//! ## Coordinate System
//!
//! Map coordinates are planar with x to the right and y upward; bearings are
//! degrees counterclockwise from +x. All lengths share one map unit.

// Basic geometry and headings
pub mod core;

// Conic curve model and the point stepper
pub mod curve;

// Oriented and axis-aligned boxes
pub mod geometry;

// Footprint sequences and the path walk
pub mod footprint;

// Shape data access
pub mod source;

// Lazy per-shape footprint store
pub mod cache;

// Engine parameters
pub mod config;

// Errors
pub mod error;

// Diagnostic records and SVG sketches
pub mod io;

// Re-export commonly used types
pub use self::core::{Bearing, Point2D, TravelDirection};

pub use curve::{ArcDescriptor, ConicSegment, CurveKind, Step};

pub use geometry::{Aabb, Obb};

pub use footprint::{FootprintSegment, FootprintSequence};

pub use source::{Clearances, GuidePath, MemoryShapeSource, ShapeCurves, ShapeId, ShapeSource};

pub use cache::{CacheKey, FootprintCache};

pub use config::SweepConfig;

pub use error::{Result, SweepError};
