//! Conic synthesis from layout curve descriptors.
//!
//! Layout data stores each path span as an arc descriptor: endpoints, an
//! axis center, two semi-axis radii and an axis rotation. Zero radii mark a
//! straight line, a negative radius marks a hyperbola. Synthesis expands the
//! descriptor into general-conic coefficients and rescales them toward unit
//! magnitude so solver tolerances keep working at layout scale.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;
use crate::error::Result;

use super::segment::ConicSegment;

/// One quadratic-curve descriptor from the path layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcDescriptor {
    pub start: Point2D,
    pub center: Point2D,
    pub end: Point2D,
    /// Semi-axis along the rotated x direction; negative marks a hyperbola.
    pub radius_a: f64,
    /// Semi-axis along the rotated y direction; negative marks a hyperbola.
    pub radius_b: f64,
    /// Clockwise axis rotation in radians.
    pub rotation: f64,
}

impl ArcDescriptor {
    /// Descriptor for a straight-line span.
    pub fn line(start: Point2D, end: Point2D) -> Self {
        Self {
            start,
            center: start.midpoint(&end),
            end,
            radius_a: 0.0,
            radius_b: 0.0,
            rotation: 0.0,
        }
    }

    /// Descriptor for a circular arc: equal radii, no rotation.
    pub fn circular(start: Point2D, center: Point2D, end: Point2D, radius: f64) -> Self {
        Self {
            start,
            center,
            end,
            radius_a: radius,
            radius_b: radius,
            rotation: 0.0,
        }
    }

    /// Expands the descriptor into a steppable conic segment.
    pub fn to_segment(&self) -> Result<ConicSegment> {
        let coeffs = if self.radius_a == 0.0 && self.radius_b == 0.0 {
            line_coeffs(&self.start, &self.end)
        } else if self.radius_a < 0.0 || self.radius_b < 0.0 {
            hyperbola_coeffs(&self.center, self.radius_a, self.radius_b, self.rotation)
        } else {
            ellipse_coeffs(&self.center, self.radius_a, self.radius_b, self.rotation)
        };
        ConicSegment::new(self.start, self.end, normalize_coeffs(coeffs))
    }
}

fn line_coeffs(start: &Point2D, end: &Point2D) -> [f64; 6] {
    if start.x == end.x {
        return [0.0, 0.0, 0.0, -1.0, 0.0, start.x];
    }
    let slope = (end.y - start.y) / (end.x - start.x);
    let intercept = end.y - slope * end.x;
    [0.0, 0.0, 0.0, slope, -1.0, intercept]
}

fn ellipse_coeffs(center: &Point2D, radius_a: f64, radius_b: f64, rotation: f64) -> [f64; 6] {
    let (sin, cos) = rotation.sin_cos();
    let ra2 = radius_a * radius_a;
    let rb2 = radius_b * radius_b;
    let a = ra2 * sin * sin + rb2 * cos * cos;
    let b = ra2 * cos * cos + rb2 * sin * sin;
    let c = 2.0 * (ra2 - rb2) * sin * cos;
    let d = -2.0 * a * center.x - c * center.y;
    let e = -2.0 * b * center.y - c * center.x;
    let f = a * center.x * center.x + b * center.y * center.y + c * center.x * center.y - ra2 * rb2;
    [a, b, c, d, e, f]
}

fn hyperbola_coeffs(center: &Point2D, radius_a: f64, radius_b: f64, rotation: f64) -> [f64; 6] {
    let (sin, cos) = rotation.sin_cos();
    let ra2 = radius_a * radius_a;
    let rb2 = radius_b * radius_b;
    let a = rb2 * cos * cos - ra2 * sin * sin;
    let b = rb2 * sin * sin - ra2 * cos * cos;
    let c = -2.0 * (ra2 + rb2) * sin * cos;
    let d = -2.0 * a * center.x - c * center.y;
    let e = -2.0 * b * center.y - c * center.x;
    let f = a * center.x * center.x + b * center.y * center.y + c * center.x * center.y - ra2 * rb2;
    [a, b, c, d, e, f]
}

/// Rescales coefficients by a power of ten so the two quadratic terms sit
/// near unit magnitude. Synthesized conics carry radius⁴-scale constants
/// that would otherwise dwarf the solver tolerances. Spans without both
/// quadratic terms pass through unchanged.
fn normalize_coeffs(coeffs: [f64; 6]) -> [f64; 6] {
    let magnitude = (coeffs[0].abs().log10() + coeffs[1].abs().log10()) * 0.5;
    if !magnitude.is_finite() {
        return coeffs;
    }
    let factor = 10f64.powi(-(magnitude as i32));
    if factor == 0.0 || !factor.is_finite() {
        return coeffs;
    }
    coeffs.map(|p| p * factor)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::super::segment::CurveKind;
    use super::*;

    #[test]
    fn vertical_descriptor_becomes_a_vertical_span() {
        let segment = ArcDescriptor::line(Point2D::new(5.0, 0.0), Point2D::new(5.0, 200.0))
            .to_segment()
            .unwrap();
        assert_eq!(segment.kind(), CurveKind::VerticalLine);
        assert_relative_eq!(segment.evaluate(&Point2D::new(5.0, 123.0)), 0.0);
    }

    #[test]
    fn slanted_descriptor_becomes_a_line_span() {
        let segment = ArcDescriptor::line(Point2D::new(0.0, 10.0), Point2D::new(200.0, 110.0))
            .to_segment()
            .unwrap();
        assert_eq!(segment.kind(), CurveKind::LinearXy);
        assert_relative_eq!(segment.evaluate(&Point2D::new(100.0, 60.0)), 0.0);
    }

    #[test]
    fn circular_descriptor_normalizes_to_unit_quadratic_terms() {
        let segment = ArcDescriptor::circular(
            Point2D::new(0.0, 900.0),
            Point2D::new(700.0, 900.0),
            Point2D::new(700.0, 1600.0),
            700.0,
        )
        .to_segment()
        .unwrap();
        assert_eq!(segment.kind(), CurveKind::GeneralConic);
        let coeffs = segment.coeffs();
        // raw quadratic terms are 700² = 490000; one power-of-ten rescale
        assert_relative_eq!(coeffs[0], 4.9);
        assert_relative_eq!(coeffs[1], 4.9);
        assert_relative_eq!(segment.evaluate(&segment.start()), 0.0);
        assert_relative_eq!(segment.evaluate(&segment.end()), 0.0);
        assert_relative_eq!(segment.branch(), 1.0);
    }

    #[test]
    fn hyperbola_descriptor_keeps_both_branch_signs() {
        // x²/400² - y²/300² = 1, right branch
        let descriptor = ArcDescriptor {
            start: Point2D::new(400.0, 0.0),
            center: Point2D::ORIGIN,
            end: Point2D::new(500.0, -225.0),
            radius_a: -400.0,
            radius_b: -300.0,
            rotation: 0.0,
        };
        let segment = descriptor.to_segment().unwrap();
        assert_eq!(segment.kind(), CurveKind::GeneralConic);
        assert_relative_eq!(segment.evaluate(&Point2D::new(500.0, 225.0)), 0.0);
        assert_relative_eq!(segment.evaluate(&Point2D::new(500.0, -225.0)), 0.0);
        // the y² coefficient is negative, so the positive root branch
        // carries the negative-y side
        assert_relative_eq!(segment.branch(), 1.0);
        assert_relative_eq!(segment.solve_y(1.0, 500.0), -225.0);
    }

    #[test]
    fn rotated_ellipse_endpoints_satisfy_the_conic() {
        // 600x300 ellipse rotated 30 degrees clockwise; both endpoints sit
        // on the upper root branch
        let rotation = 30f64.to_radians();
        let (sin, cos) = rotation.sin_cos();
        let world = |t: f64| {
            let (body_x, body_y) = (600.0 * t.cos(), 300.0 * t.sin());
            Point2D::new(
                body_x * cos + body_y * sin,
                -body_x * sin + body_y * cos,
            )
        };
        let start = world(60f64.to_radians());
        let end = world(120f64.to_radians());
        let descriptor = ArcDescriptor {
            start,
            center: Point2D::ORIGIN,
            end,
            radius_a: 600.0,
            radius_b: 300.0,
            rotation,
        };
        let segment = descriptor.to_segment().unwrap();
        assert_relative_eq!(segment.branch(), 1.0);
        assert!(segment.evaluate(&start).abs() < 1e-6);
        assert!(segment.evaluate(&end).abs() < 1e-6);
    }
}
