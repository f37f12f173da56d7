//! 2-D points in the guide-path plane.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::math::approx_eq;

/// A point, or free vector, in map units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn distance(&self, other: &Point2D) -> f64 {
        (*self - *other).length()
    }

    #[inline]
    pub fn dot(&self, other: &Point2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Heading from `self` toward `other`, in degrees within `[0, 360)`.
    #[inline]
    pub fn bearing_to(&self, other: &Point2D) -> f64 {
        (other.y - self.y)
            .atan2(other.x - self.x)
            .to_degrees()
            .rem_euclid(360.0)
    }

    /// Reflection across the horizontal axis.
    #[inline]
    pub fn mirror_x(&self) -> Point2D {
        Point2D::new(self.x, -self.y)
    }

    /// Componentwise tolerance equality.
    #[inline]
    pub fn approx_eq(&self, other: &Point2D) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}

impl Add for Point2D {
    type Output = Point2D;

    #[inline]
    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    #[inline]
    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;

    #[inline]
    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point2D {
    type Output = Point2D;

    #[inline]
    fn neg(self) -> Point2D {
        Point2D::new(-self.x, -self.y)
    }
}
