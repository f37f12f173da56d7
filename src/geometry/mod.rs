//! Box primitives used for swept-footprint occupancy.

pub mod aabb;
pub mod obb;

pub use aabb::Aabb;
pub use obb::Obb;
