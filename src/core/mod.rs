//! Shared geometric primitives.

pub mod bearing;
pub mod math;
pub mod point;

pub use bearing::{Bearing, TravelDirection};
pub use point::Point2D;
