//! Axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;

/// Axis-aligned box given by center and half-extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Point2D,
    pub half_x: f64,
    pub half_y: f64,
}

impl Aabb {
    #[inline]
    pub fn new(center: Point2D, half_x: f64, half_y: f64) -> Self {
        Self {
            center,
            half_x,
            half_y,
        }
    }

    /// Box spanning two opposite corners; restricted zones arrive this way.
    pub fn from_corners(a: Point2D, b: Point2D) -> Self {
        Self {
            center: a.midpoint(&b),
            half_x: (a.x - b.x).abs() * 0.5,
            half_y: (a.y - b.y).abs() * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Point2D {
        Point2D::new(self.center.x - self.half_x, self.center.y - self.half_y)
    }

    #[inline]
    pub fn max(&self) -> Point2D {
        Point2D::new(self.center.x + self.half_x, self.center.y + self.half_y)
    }

    /// Strict interval overlap on both axes; touching edges do not count.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (self.center.x - other.center.x).abs() < self.half_x + other.half_x
            && (self.center.y - other.center.y).abs() < self.half_y + other.half_y
    }
}
