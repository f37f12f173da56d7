//! Oriented bounding boxes and the separating-axis overlap test.

use serde::{Deserialize, Serialize};

use crate::core::{Bearing, Point2D};

use super::Aabb;

/// Oriented box: a center, half-extents along the box's own axes, and a
/// bearing. The axis vectors are derived from the bearing at construction
/// and stay unit-length and orthogonal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obb {
    center: Point2D,
    half_x: f64,
    half_y: f64,
    bearing: Bearing,
    x_axis: Point2D,
    y_axis: Point2D,
}

impl Default for Obb {
    fn default() -> Self {
        Obb::new(Point2D::ORIGIN, 0.0, 0.0, Bearing::default())
    }
}

impl Obb {
    pub fn new(center: Point2D, half_x: f64, half_y: f64, bearing: Bearing) -> Self {
        debug_assert!(half_x >= 0.0 && half_y >= 0.0);
        let (sin, cos) = bearing.radians().sin_cos();
        Self {
            center,
            half_x,
            half_y,
            bearing,
            x_axis: Point2D::new(cos, sin),
            y_axis: Point2D::new(-sin, cos),
        }
    }

    /// Axis-aligned box, bearing zero.
    pub fn aligned(center: Point2D, half_x: f64, half_y: f64) -> Self {
        Obb::new(center, half_x, half_y, Bearing::default())
    }

    #[inline]
    pub fn center(&self) -> Point2D {
        self.center
    }

    #[inline]
    pub fn half_x(&self) -> f64 {
        self.half_x
    }

    #[inline]
    pub fn half_y(&self) -> f64 {
        self.half_y
    }

    #[inline]
    pub fn bearing(&self) -> Bearing {
        self.bearing
    }

    #[inline]
    pub fn x_axis(&self) -> Point2D {
        self.x_axis
    }

    #[inline]
    pub fn y_axis(&self) -> Point2D {
        self.y_axis
    }

    /// Exact separating-axis overlap test over both boxes' axis pairs.
    /// Boxes meeting exactly on a separating axis do not overlap.
    pub fn overlaps(&self, other: &Obb) -> bool {
        let offset = other.center - self.center;
        for axis in [self.x_axis, self.y_axis, other.x_axis, other.y_axis] {
            let reach = self.projected_reach(&axis) + other.projected_reach(&axis);
            if reach <= offset.dot(&axis).abs() {
                return false;
            }
        }
        true
    }

    /// Half-extent of this box projected onto a unit axis.
    #[inline]
    fn projected_reach(&self, axis: &Point2D) -> f64 {
        self.half_x * self.x_axis.dot(axis).abs() + self.half_y * self.y_axis.dot(axis).abs()
    }

    /// Corner points, counterclockwise from the front-left corner.
    pub fn vertices(&self) -> [Point2D; 4] {
        let along = self.x_axis * self.half_x;
        let across = self.y_axis * self.half_y;
        [
            self.center + along + across,
            self.center - along + across,
            self.center - along - across,
            self.center + along - across,
        ]
    }

    /// Center displaced by per-edge clearances measured along the box axes:
    /// half the front/rear difference along x, half the inner/outer
    /// difference along y.
    pub fn centroid_offset(&self, front: f64, rear: f64, inner: f64, outer: f64) -> Point2D {
        self.center + self.x_axis * (0.5 * (front - rear)) + self.y_axis * (0.5 * (inner - outer))
    }

    /// The box reflected across the horizontal axis: center y negated,
    /// bearing mirrored, half-extents preserved.
    pub fn mirror_x(&self) -> Obb {
        Obb::new(
            self.center.mirror_x(),
            self.half_x,
            self.half_y,
            self.bearing.mirror_x(),
        )
    }

    /// Smallest axis-aligned box containing this one.
    pub fn to_aabb(&self) -> Aabb {
        Aabb::new(
            self.center,
            self.half_x * self.x_axis.x.abs() + self.half_y * self.y_axis.x.abs(),
            self.half_x * self.x_axis.y.abs() + self.half_y * self.y_axis.y.abs(),
        )
    }

    /// Tolerance equality on center, half-extents and bearing; used to
    /// deduplicate consecutive footprint boxes.
    pub fn approx_eq(&self, other: &Obb) -> bool {
        self.center.approx_eq(&other.center)
            && crate::core::math::approx_eq(self.half_x, other.half_x)
            && crate::core::math::approx_eq(self.half_y, other.half_y)
            && self.bearing.approx_eq(&other.bearing)
    }
}
