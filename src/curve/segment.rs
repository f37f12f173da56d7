//! General-conic curve segments.
//!
//! A segment is one span of a guide path written as
//! `a·x² + b·y² + c·xy + d·x + e·y + f = 0` between two endpoints. The
//! coefficient pattern picks one of four stepping strategies, and genuinely
//! quadratic spans also track which root branch of the conic they lie on.

use serde::{Deserialize, Serialize};

use crate::core::math::approx_eq;
use crate::core::Point2D;
use crate::error::{Result, SweepError};

/// Stepping strategy for a segment, decided once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveKind {
    /// Quadratic in y; y is recovered from x on a fixed root branch.
    GeneralConic,
    /// Constant x; stepping moves along y only.
    VerticalLine,
    /// Straight, non-vertical line.
    LinearXy,
    /// No y² term but a y·(c·x + e) coupling; y is rational in x.
    ConicLinearY,
}

/// One conic span of a guide path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConicSegment {
    start: Point2D,
    end: Point2D,
    coeffs: [f64; 6],
    kind: CurveKind,
    branch: f64,
}

impl ConicSegment {
    /// Builds a segment from endpoints and coefficients, classifying the
    /// stepping kind and validating that both endpoints sit on the curve.
    pub fn new(start: Point2D, end: Point2D, coeffs: [f64; 6]) -> Result<Self> {
        let kind = classify(&coeffs, &start);
        let mut segment = Self {
            start,
            end,
            coeffs,
            kind,
            branch: 1.0,
        };
        match kind {
            CurveKind::GeneralConic => {
                segment.branch = segment.recognize_branch()?;
            }
            CurveKind::VerticalLine => {
                if !approx_eq(start.x, end.x) {
                    return Err(SweepError::MalformedCurve(format!(
                        "vertical span with unequal endpoint x: {} vs {}",
                        start.x, end.x
                    )));
                }
                segment.branch = if start.y < end.y { 1.0 } else { -1.0 };
            }
            CurveKind::LinearXy => {
                for p in [&start, &end] {
                    let y = segment.line_y(p.x);
                    if !y.is_finite() || !approx_eq(y, p.y) {
                        return Err(SweepError::MalformedCurve(format!(
                            "endpoint ({}, {}) is not on the line",
                            p.x, p.y
                        )));
                    }
                }
            }
            CurveKind::ConicLinearY => {
                for p in [&start, &end] {
                    let y = segment.rational_y(p.x);
                    if !y.is_finite() || !approx_eq(y, p.y) {
                        return Err(SweepError::MalformedCurve(format!(
                            "endpoint ({}, {}) is not on the curve",
                            p.x, p.y
                        )));
                    }
                }
            }
        }
        Ok(segment)
    }

    #[inline]
    pub fn start(&self) -> Point2D {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point2D {
        self.end
    }

    #[inline]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Root branch sign for quadratic kinds, `+1.0` or `-1.0`.
    #[inline]
    pub fn branch(&self) -> f64 {
        self.branch
    }

    #[inline]
    pub fn coeffs(&self) -> [f64; 6] {
        self.coeffs
    }

    /// Signed residual of the conic equation at `p`; zero on the curve.
    #[inline]
    pub fn evaluate(&self, p: &Point2D) -> f64 {
        let [a, b, c, d, e, f] = self.coeffs;
        a * p.x * p.x + b * p.y * p.y + c * p.x * p.y + d * p.x + e * p.y + f
    }

    /// X root at the given y on the `branch` (`+1.0` / `-1.0`) side.
    /// Yields NaN when the discriminant is negative. Meaningful only when
    /// the x² coefficient is nonzero.
    pub fn solve_x(&self, branch: f64, y: f64) -> f64 {
        let [a, b, c, d, e, f] = self.coeffs;
        let double_lead = 2.0 * a;
        let linear = c * y + d;
        let disc = linear * linear - 4.0 * a * (b * y * y + e * y + f);
        if approx_eq(disc, 0.0) {
            return -linear / double_lead;
        }
        if disc < 0.0 {
            return f64::NAN;
        }
        (-linear + disc.sqrt().copysign(branch)) / double_lead
    }

    /// Y root at the given x on the `branch` (`+1.0` / `-1.0`) side.
    /// Yields NaN when the discriminant is negative. Meaningful only when
    /// the y² coefficient is nonzero.
    pub fn solve_y(&self, branch: f64, x: f64) -> f64 {
        let [a, b, c, d, e, f] = self.coeffs;
        let double_lead = 2.0 * b;
        let linear = c * x + e;
        let disc = linear * linear - 4.0 * b * (a * x * x + d * x + f);
        if approx_eq(disc, 0.0) {
            return -linear / double_lead;
        }
        if disc < 0.0 {
            return f64::NAN;
        }
        (-linear + disc.sqrt().copysign(branch)) / double_lead
    }

    /// Y on a `LinearXy` span at the given x.
    #[inline]
    pub(crate) fn line_y(&self, x: f64) -> f64 {
        let [_a, _b, _c, d, e, f] = self.coeffs;
        -(d * x + f) / e
    }

    /// Y on a `ConicLinearY` span at the given x.
    #[inline]
    pub(crate) fn rational_y(&self, x: f64) -> f64 {
        let [a, _b, c, d, e, f] = self.coeffs;
        -(a * x * x + d * x + f) / (c * x + e)
    }

    /// Picks the root branch carrying both endpoints. An endpoint at a
    /// double root matches either branch; when both endpoints are
    /// ambiguous the positive branch wins.
    fn recognize_branch(&self) -> Result<f64> {
        let (start_plus, start_minus) = self.branch_membership(&self.start);
        let (end_plus, end_minus) = self.branch_membership(&self.end);
        if (!start_plus && !start_minus) || (!end_plus && !end_minus) {
            return Err(SweepError::MalformedCurve(format!(
                "endpoint off the conic: start ({}, {}), end ({}, {})",
                self.start.x, self.start.y, self.end.x, self.end.y
            )));
        }
        if start_plus && end_plus {
            Ok(1.0)
        } else if start_minus && end_minus {
            Ok(-1.0)
        } else {
            Err(SweepError::MalformedCurve(
                "endpoints lie on different root branches".into(),
            ))
        }
    }

    fn branch_membership(&self, p: &Point2D) -> (bool, bool) {
        (
            approx_eq(self.solve_y(1.0, p.x), p.y),
            approx_eq(self.solve_y(-1.0, p.x), p.y),
        )
    }
}

fn classify(coeffs: &[f64; 6], start: &Point2D) -> CurveKind {
    let [a, b, c, _d, e, _f] = *coeffs;
    if b != 0.0 {
        return CurveKind::GeneralConic;
    }
    if approx_eq(c * start.x + e, 0.0) {
        return CurveKind::VerticalLine;
    }
    if approx_eq(a, 0.0) && approx_eq(c, 0.0) {
        return CurveKind::LinearXy;
    }
    CurveKind::ConicLinearY
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn unit_circle_1000() -> ConicSegment {
        // x² + y² = 1000², upper arc
        ConicSegment::new(
            Point2D::new(-600.0, 800.0),
            Point2D::new(600.0, 800.0),
            [1.0, 1.0, 0.0, 0.0, 0.0, -1_000_000.0],
        )
        .unwrap()
    }

    #[test]
    fn classification_covers_all_four_kinds() {
        assert_eq!(unit_circle_1000().kind(), CurveKind::GeneralConic);

        let vertical = ConicSegment::new(
            Point2D::new(5.0, 0.0),
            Point2D::new(5.0, 100.0),
            [0.0, 0.0, 0.0, -1.0, 0.0, 5.0],
        )
        .unwrap();
        assert_eq!(vertical.kind(), CurveKind::VerticalLine);
        assert_relative_eq!(vertical.branch(), 1.0);

        let diagonal = ConicSegment::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(300.0, 300.0),
            [0.0, 0.0, 0.0, 1.0, -1.0, 0.0],
        )
        .unwrap();
        assert_eq!(diagonal.kind(), CurveKind::LinearXy);

        // x·y = 10000
        let rational = ConicSegment::new(
            Point2D::new(100.0, 100.0),
            Point2D::new(400.0, 25.0),
            [0.0, 0.0, 1.0, 0.0, 0.0, -10_000.0],
        )
        .unwrap();
        assert_eq!(rational.kind(), CurveKind::ConicLinearY);
    }

    #[test]
    fn evaluate_vanishes_on_the_curve() {
        let circle = unit_circle_1000();
        assert_relative_eq!(circle.evaluate(&Point2D::new(-600.0, 800.0)), 0.0);
        assert_relative_eq!(circle.evaluate(&Point2D::new(0.0, 1000.0)), 0.0);
        assert!(circle.evaluate(&Point2D::new(0.0, 0.0)) < 0.0);
        assert!(circle.evaluate(&Point2D::new(2000.0, 0.0)) > 0.0);
    }

    #[test]
    fn y_roots_follow_the_branch_sign() {
        let circle = unit_circle_1000();
        assert_relative_eq!(circle.solve_y(1.0, 600.0), 800.0);
        assert_relative_eq!(circle.solve_y(-1.0, 600.0), -800.0);
        assert!(circle.solve_y(1.0, 1500.0).is_nan());
        // double root at the x apex
        assert_relative_eq!(circle.solve_y(1.0, 1000.0), 0.0);
        assert_relative_eq!(circle.solve_y(-1.0, 1000.0), 0.0);
    }

    #[test]
    fn x_roots_follow_the_branch_sign() {
        let circle = unit_circle_1000();
        assert_relative_eq!(circle.solve_x(1.0, 800.0), 600.0);
        assert_relative_eq!(circle.solve_x(-1.0, 800.0), -600.0);
        assert!(circle.solve_x(1.0, 1500.0).is_nan());
    }

    #[test]
    fn lower_arc_recognizes_the_negative_branch() {
        let lower = ConicSegment::new(
            Point2D::new(-600.0, -800.0),
            Point2D::new(600.0, -800.0),
            [1.0, 1.0, 0.0, 0.0, 0.0, -1_000_000.0],
        )
        .unwrap();
        assert_relative_eq!(lower.branch(), -1.0);
    }

    #[test]
    fn apex_start_takes_the_unambiguous_endpoint_branch() {
        // quarter arc from the x apex (double root) down to the lower side
        let arc = ConicSegment::new(
            Point2D::new(-1000.0, 0.0),
            Point2D::new(0.0, -1000.0),
            [1.0, 1.0, 0.0, 0.0, 0.0, -1_000_000.0],
        )
        .unwrap();
        assert_relative_eq!(arc.branch(), -1.0);
    }

    #[test]
    fn off_curve_endpoint_is_rejected() {
        let result = ConicSegment::new(
            Point2D::new(-600.0, 790.0),
            Point2D::new(600.0, 800.0),
            [1.0, 1.0, 0.0, 0.0, 0.0, -1_000_000.0],
        );
        assert!(matches!(result, Err(SweepError::MalformedCurve(_))));
    }

    #[test]
    fn branch_crossing_span_is_rejected() {
        // (80, 60) sits on the upper branch, (80, -60) on the lower one
        let result = ConicSegment::new(
            Point2D::new(80.0, 60.0),
            Point2D::new(80.0, -60.0),
            [1.0, 1.0, 0.0, 0.0, 0.0, -10_000.0],
        );
        assert!(matches!(result, Err(SweepError::MalformedCurve(_))));
    }

    #[test]
    fn vertical_span_needs_matching_x() {
        let result = ConicSegment::new(
            Point2D::new(5.0, 0.0),
            Point2D::new(6.0, 100.0),
            [0.0, 0.0, 0.0, -1.0, 0.0, 5.0],
        );
        assert!(matches!(result, Err(SweepError::MalformedCurve(_))));
    }

    #[test]
    fn line_span_needs_endpoints_on_the_line() {
        let result = ConicSegment::new(
            Point2D::new(0.0, 50.0),
            Point2D::new(300.0, 300.0),
            [0.0, 0.0, 0.0, 1.0, -1.0, 0.0],
        );
        assert!(matches!(result, Err(SweepError::MalformedCurve(_))));
    }
}
