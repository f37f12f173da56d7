//! Stepping along conic segments.
//!
//! `next_point` advances a point by a fixed curve distance measured from
//! the point itself; `next_point_ref` instead intersects the segment with a
//! circle around a separate reference point, which is how a rear axle
//! follows a front axle at a fixed wheelbase. Straight kinds step in closed
//! form; quadratic kinds run a two-iteration Newton update on x against the
//! squared-distance equation.

use crate::core::math::{in_closed_interval, INTERVAL_TOLERANCE};
use crate::core::Point2D;

use super::segment::{ConicSegment, CurveKind};

const NEWTON_ITERATIONS: usize = 2;

/// Outcome of one stepping call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// The cursor was unset; the segment's start point begins the traversal.
    AtStart(Point2D),
    /// A point inside the segment.
    InMiddle(Point2D),
    /// The segment is exhausted at this point.
    AtEnd(Point2D),
    /// No usable point exists on this segment.
    NotFound,
}

impl Step {
    /// The stepped point, if any.
    pub fn point(&self) -> Option<Point2D> {
        match self {
            Step::AtStart(p) | Step::InMiddle(p) | Step::AtEnd(p) => Some(*p),
            Step::NotFound => None,
        }
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self, Step::AtEnd(_))
    }
}

impl ConicSegment {
    /// Advances from `current` by curve distance `interval`, measured from
    /// `current` itself. `None` starts the traversal at the segment start.
    /// A result past the span clamps to `AtEnd` at the exact end point; a
    /// result that fails to move off `current` is `NotFound`.
    pub fn next_point(&self, current: Option<Point2D>, interval: f64) -> Step {
        let current = match current {
            Some(point) => point,
            None => return Step::AtStart(self.start()),
        };
        let next = match self.kind() {
            CurveKind::VerticalLine => {
                let y = current.y + interval.copysign(self.branch());
                if !in_closed_interval(y, self.start().y, self.end().y, INTERVAL_TOLERANCE) {
                    return Step::AtEnd(self.end());
                }
                Point2D::new(self.start().x, y)
            }
            CurveKind::LinearXy => {
                let [_a, _b, _c, d, e, _f] = self.coeffs();
                let slope = d / e;
                let run = interval / (1.0 + slope * slope).sqrt();
                let x = current.x + run.copysign(self.end().x - self.start().x);
                if !in_closed_interval(x, self.start().x, self.end().x, INTERVAL_TOLERANCE) {
                    return Step::AtEnd(self.end());
                }
                Point2D::new(x, self.line_y(x))
            }
            CurveKind::GeneralConic => {
                let x = match conic_circle_x(self, &current, interval) {
                    Ok(x) => x,
                    Err(estimate) => return self.diverged(estimate),
                };
                match self.solved_conic_point(x) {
                    Ok(point) => point,
                    Err(step) => return step,
                }
            }
            CurveKind::ConicLinearY => {
                let x = rational_circle_x(self, current.x, &current, interval);
                match self.solved_rational_point(x) {
                    Ok(point) => point,
                    Err(step) => return step,
                }
            }
        };
        if next.approx_eq(&current) {
            return Step::NotFound;
        }
        if next.approx_eq(&self.end()) {
            return Step::AtEnd(self.end());
        }
        Step::InMiddle(next)
    }

    /// Advances to the point at distance `interval` from the separate
    /// `reference` point, searching this segment from `current`. `None`
    /// starts the traversal at the segment start. Unlike [`Self::next_point`],
    /// reproducing `current` is not treated as exhaustion: a stationary
    /// reference yields the same point again.
    pub fn next_point_ref(
        &self,
        current: Option<Point2D>,
        reference: &Point2D,
        interval: f64,
    ) -> Step {
        let current = match current {
            Some(point) => point,
            None => return Step::AtStart(self.start()),
        };
        let next = match self.kind() {
            CurveKind::VerticalLine => {
                let spare = interval * interval - (reference.x - current.x).powi(2);
                if spare < 0.0 {
                    return Step::NotFound;
                }
                let y = reference.y + spare.sqrt().copysign(current.y - reference.y);
                if !in_closed_interval(y, self.start().y, self.end().y, INTERVAL_TOLERANCE) {
                    return Step::AtEnd(self.end());
                }
                Point2D::new(self.start().x, y)
            }
            CurveKind::LinearXy => {
                let x = line_circle_x(self, current.x, reference, interval);
                if !x.is_finite() {
                    return Step::NotFound;
                }
                let y = self.line_y(x);
                if !in_closed_interval(y, self.start().y, self.end().y, INTERVAL_TOLERANCE) {
                    return Step::AtEnd(self.end());
                }
                Point2D::new(x, y)
            }
            CurveKind::GeneralConic => {
                let x = match conic_circle_x(self, reference, interval) {
                    Ok(x) => x,
                    Err(estimate) => return self.diverged(estimate),
                };
                match self.solved_conic_point(x) {
                    Ok(point) => point,
                    Err(step) => return step,
                }
            }
            CurveKind::ConicLinearY => {
                let x = rational_circle_x(self, current.x, reference, interval);
                match self.solved_rational_point(x) {
                    Ok(point) => point,
                    Err(step) => return step,
                }
            }
        };
        Step::InMiddle(next)
    }

    /// Clamps a solved x into the span, then recovers y on the root branch.
    fn solved_conic_point(&self, x: f64) -> std::result::Result<Point2D, Step> {
        if !x.is_finite() {
            return Err(Step::NotFound);
        }
        if !in_closed_interval(x, self.start().x, self.end().x, INTERVAL_TOLERANCE) {
            return Err(Step::AtEnd(self.end()));
        }
        let y = self.solve_y(self.branch(), x);
        if !y.is_finite() {
            return Err(Step::NotFound);
        }
        Ok(Point2D::new(x, y))
    }

    /// Clamps a solved x into the span, then recovers the rational y.
    fn solved_rational_point(&self, x: f64) -> std::result::Result<Point2D, Step> {
        if !x.is_finite() {
            return Err(Step::NotFound);
        }
        if !in_closed_interval(x, self.start().x, self.end().x, INTERVAL_TOLERANCE) {
            return Err(Step::AtEnd(self.end()));
        }
        let y = self.rational_y(x);
        if !y.is_finite() {
            return Err(Step::NotFound);
        }
        Ok(Point2D::new(x, y))
    }

    /// A negative discriminant during the update means the step circle left
    /// the conic's real domain. An estimate past the span means the segment
    /// is exhausted; anything else yields no point.
    fn diverged(&self, estimate: f64) -> Step {
        if estimate.is_finite()
            && !in_closed_interval(estimate, self.start().x, self.end().x, INTERVAL_TOLERANCE)
        {
            Step::AtEnd(self.end())
        } else {
            Step::NotFound
        }
    }
}

/// Newton update on x for quadratic spans: seeks the intersection of the
/// conic's root branch with the circle of radius `interval` around
/// `center`, seeded one unit from the center toward the segment's travel
/// direction. `Err` carries the estimate at which the discriminant went
/// negative.
fn conic_circle_x(
    segment: &ConicSegment,
    center: &Point2D,
    interval: f64,
) -> std::result::Result<f64, f64> {
    let [a, b, c, d, e, f] = segment.coeffs();
    let end_x = segment.end().x;
    let toward_end = end_x - segment.start().x;
    if 1.0 > (end_x - center.x).abs() {
        return Ok(end_x);
    }
    let mut x = center.x + 1f64.copysign(toward_end);

    // fx(x) = (x - cx)² + (y(x) - cy)² - interval², with the branch root
    // y(x) = (-(c·x + e) + branch·√D) / 2b expanded and collected so each
    // iteration costs one square root.
    let branch = segment.branch();
    let b_inv = 1.0 / b;
    let b_inv_sq = b_inv * b_inv;
    let root_x = 0.5 * c * b_inv_sq;
    let root_0 = 0.5 * (e + 2.0 * b * center.y) * b_inv_sq;
    let quad = 1.0 + c * root_x - a * b_inv;
    let lin = c * e * b_inv_sq + c * b_inv * center.y - 2.0 * center.x - d * b_inv;
    let constant = center.x * center.x + center.y * center.y - interval * interval
        + 0.5 * e * e * b_inv_sq
        - f * b_inv
        + e * b_inv * center.y;
    let disc_lin = c * c - 4.0 * a * b;
    let disc_0 = c * e - 2.0 * b * d;

    for _ in 0..NEWTON_ITERATIONS {
        let linear = c * x + e;
        let disc = linear * linear - 4.0 * b * (a * x * x + d * x + f);
        if disc < 0.0 {
            return Err(x);
        }
        let sd = disc.sqrt();
        let fx = quad * x * x + lin * x - branch * (root_x * x + root_0) * sd + constant;
        let dfx = 2.0 * quad * x + lin
            - branch * (root_x * sd + (root_x * x + root_0) * (disc_lin * x + disc_0) / sd);
        x -= fx / dfx;
    }
    Ok(x)
}

/// Newton update on x for a straight span against the circle of radius
/// `interval` around `center`, seeded at `seed`.
fn line_circle_x(segment: &ConicSegment, seed: f64, center: &Point2D, interval: f64) -> f64 {
    let [_a, _b, _c, d, e, f] = segment.coeffs();
    let slope = d / e;
    let offset = f / e;
    let mut x = seed;
    for _ in 0..NEWTON_ITERATIONS {
        let rise = slope * x + offset + center.y;
        let fx = (x - center.x).powi(2) + rise * rise - interval * interval;
        let dfx = 2.0 * ((1.0 + slope * slope) * x + slope * (offset + center.y) - center.x);
        x -= fx / dfx;
    }
    x
}

/// Newton update on x for a rational span against the circle of radius
/// `interval` around `center`, seeded five units past `seed`.
fn rational_circle_x(segment: &ConicSegment, seed: f64, center: &Point2D, interval: f64) -> f64 {
    let [a, _b, c, d, e, f] = segment.coeffs();
    let mut x = seed + 5.0;
    for _ in 0..NEWTON_ITERATIONS {
        let div = 1.0 / (c * x + e);
        let ratio = (a * x * x + d * x + f) * div;
        let rise = ratio + center.y;
        let fx = (x - center.x).powi(2) + rise * rise - interval * interval;
        let dratio = (a * c * x * x + 2.0 * a * e * x + d * e - c * f) * div * div;
        let dfx = 2.0 * (x - center.x) + 2.0 * rise * dratio;
        x -= fx / dfx;
    }
    x
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn vertical(start_y: f64, end_y: f64) -> ConicSegment {
        ConicSegment::new(
            Point2D::new(0.0, start_y),
            Point2D::new(0.0, end_y),
            [0.0, 0.0, 0.0, -1.0, 0.0, 0.0],
        )
        .unwrap()
    }

    fn upper_circle_1000() -> ConicSegment {
        ConicSegment::new(
            Point2D::new(-600.0, 800.0),
            Point2D::new(600.0, 800.0),
            [1.0, 1.0, 0.0, 0.0, 0.0, -1_000_000.0],
        )
        .unwrap()
    }

    /// Quarter arc of the circle centered at (2000, 0) with radius 1200,
    /// from the x apex up to the top.
    fn quarter_circle_1200() -> ConicSegment {
        ConicSegment::new(
            Point2D::new(800.0, 0.0),
            Point2D::new(2000.0, 1200.0),
            [1.0, 1.0, 0.0, -4000.0, 0.0, 2_560_000.0],
        )
        .unwrap()
    }

    #[test]
    fn unset_cursor_starts_at_the_segment_start() {
        let segment = vertical(0.0, 1000.0);
        assert_eq!(
            segment.next_point(None, 100.0),
            Step::AtStart(Point2D::new(0.0, 0.0))
        );
        assert_eq!(
            segment.next_point_ref(None, &Point2D::new(50.0, 50.0), 120.0),
            Step::AtStart(Point2D::new(0.0, 0.0))
        );
    }

    #[test]
    fn vertical_walk_steps_to_the_exact_end() {
        let segment = vertical(0.0, 1000.0);
        let mut cursor = None;
        let mut seen = Vec::new();
        loop {
            let step = segment.next_point(cursor, 100.0);
            match step {
                Step::AtStart(p) | Step::InMiddle(p) => {
                    seen.push(p);
                    cursor = Some(p);
                }
                Step::AtEnd(p) => {
                    seen.push(p);
                    break;
                }
                Step::NotFound => panic!("walk lost the segment"),
            }
        }
        assert_eq!(seen.len(), 11);
        assert_eq!(seen[0], Point2D::new(0.0, 0.0));
        assert_eq!(seen[5], Point2D::new(0.0, 500.0));
        assert_eq!(seen[10], Point2D::new(0.0, 1000.0));
    }

    #[test]
    fn descending_vertical_uses_the_negative_branch() {
        let segment = vertical(500.0, -500.0);
        assert_relative_eq!(segment.branch(), -1.0);
        let step = segment.next_point(Some(Point2D::new(0.0, 500.0)), 100.0);
        assert_eq!(step, Step::InMiddle(Point2D::new(0.0, 400.0)));
    }

    #[test]
    fn zero_interval_stalls_into_not_found() {
        let segment = vertical(0.0, 1000.0);
        assert_eq!(
            segment.next_point(Some(Point2D::new(0.0, 500.0)), 0.0),
            Step::NotFound
        );
    }

    #[test]
    fn vertical_reference_step_is_exact() {
        let segment = vertical(0.0, 500.0);
        let reference = Point2D::new(50.0, 130.0);
        let step = segment.next_point_ref(Some(Point2D::new(0.0, 10.0)), &reference, 120.0);
        let expected_y = 130.0 - 11_900f64.sqrt();
        match step {
            Step::InMiddle(p) => {
                assert_relative_eq!(p.x, 0.0);
                assert_relative_eq!(p.y, expected_y, max_relative = 1e-12);
                assert_relative_eq!(p.distance(&reference), 120.0, max_relative = 1e-12);
            }
            other => panic!("expected InMiddle, got {other:?}"),
        }
    }

    #[test]
    fn vertical_reference_too_far_sideways_has_no_point() {
        let segment = vertical(0.0, 500.0);
        let step = segment.next_point_ref(
            Some(Point2D::new(0.0, 10.0)),
            &Point2D::new(200.0, 0.0),
            120.0,
        );
        assert_eq!(step, Step::NotFound);
    }

    #[test]
    fn vertical_reference_clamps_at_the_span_end() {
        let segment = vertical(0.0, 500.0);
        let step = segment.next_point_ref(
            Some(Point2D::new(0.0, 100.0)),
            &Point2D::new(0.0, 700.0),
            120.0,
        );
        assert_eq!(step, Step::AtEnd(Point2D::new(0.0, 500.0)));
    }

    #[test]
    fn stationary_reference_reproduces_the_same_point() {
        let segment = vertical(0.0, 500.0);
        let reference = Point2D::new(50.0, 130.0);
        let first = segment.next_point_ref(Some(Point2D::new(0.0, 10.0)), &reference, 120.0);
        let p = first.point().unwrap();
        let second = segment.next_point_ref(Some(p), &reference, 120.0);
        assert_eq!(second, Step::InMiddle(p));
    }

    #[test]
    fn diagonal_line_steps_by_exact_arc_length() {
        let segment = ConicSegment::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(300.0, 300.0),
            [0.0, 0.0, 0.0, 1.0, -1.0, 0.0],
        )
        .unwrap();
        let step = segment.next_point(Some(Point2D::new(0.0, 0.0)), 100.0);
        match step {
            Step::InMiddle(p) => {
                assert_relative_eq!(p.x, 100.0 / 2f64.sqrt(), max_relative = 1e-12);
                assert_relative_eq!(p.y, p.x);
                assert_relative_eq!(p.distance(&Point2D::ORIGIN), 100.0, max_relative = 1e-12);
            }
            other => panic!("expected InMiddle, got {other:?}"),
        }

        let near_end = Point2D::new(282.84, 282.84);
        assert_eq!(
            segment.next_point(Some(near_end), 100.0),
            Step::AtEnd(Point2D::new(300.0, 300.0))
        );
    }

    #[test]
    fn line_reference_newton_closes_on_the_circle() {
        // horizontal line through the origin
        let segment = ConicSegment::new(
            Point2D::new(0.0, 0.0),
            Point2D::new(1000.0, 0.0),
            [0.0, 0.0, 0.0, 0.0, -1.0, 0.0],
        )
        .unwrap();
        let reference = Point2D::new(900.0, 0.0);
        let step = segment.next_point_ref(Some(Point2D::new(700.0, 0.0)), &reference, 300.0);
        match step {
            Step::InMiddle(p) => {
                // two iterations approach the trailing root at x = 600
                assert!((p.x - 599.04).abs() < 0.1, "x was {}", p.x);
                assert!((p.distance(&reference) - 300.0).abs() < 1.0);
            }
            other => panic!("expected InMiddle, got {other:?}"),
        }
    }

    #[test]
    fn conic_step_stays_on_curve_and_makes_progress() {
        let segment = upper_circle_1000();
        let start = Point2D::new(-600.0, 800.0);
        let step = segment.next_point(Some(start), 10.0);
        match step {
            Step::InMiddle(p) => {
                assert!(segment.evaluate(&p).abs() < 1e-3);
                assert!(p.x > start.x);
                let travelled = p.distance(&start);
                assert!(
                    travelled > 5.0 && travelled < 45.0,
                    "travelled {travelled}"
                );
            }
            other => panic!("expected InMiddle, got {other:?}"),
        }
    }

    #[test]
    fn conic_step_past_the_span_clamps_to_the_end() {
        let segment = upper_circle_1000();
        let near_end = Point2D::new(599.0, 641_199f64.sqrt());
        assert_eq!(
            segment.next_point(Some(near_end), 10.0),
            Step::AtEnd(Point2D::new(600.0, 800.0))
        );
    }

    #[test]
    fn conic_seed_bailout_lands_on_the_end_point() {
        // circle of radius 100: x² + y² = 100², upper arc
        let segment = ConicSegment::new(
            Point2D::new(-60.0, 80.0),
            Point2D::new(60.0, 80.0),
            [1.0, 1.0, 0.0, 0.0, 0.0, -10_000.0],
        )
        .unwrap();
        // the seed offset of one unit already overshoots the remaining span
        let near_end = Point2D::new(59.5, segment.solve_y(1.0, 59.5));
        assert_eq!(
            segment.next_point(Some(near_end), 10.0),
            Step::AtEnd(Point2D::new(60.0, 80.0))
        );
    }

    #[test]
    fn conic_reference_converges_in_the_steep_region() {
        let segment = quarter_circle_1200();
        // front axle up the departure direction, rear trailing on the arc
        let reference = Point2D::new(810.0, 1354.3);
        let step =
            segment.next_point_ref(Some(Point2D::new(815.0, 190.0)), &reference, 1200.0);
        match step {
            Step::InMiddle(p) => {
                assert!(segment.evaluate(&p).abs() < 1.0);
                assert!((p.distance(&reference) - 1200.0).abs() < 0.5);
            }
            other => panic!("expected InMiddle, got {other:?}"),
        }
    }

    #[test]
    fn conic_reference_divergence_clamps_to_the_end() {
        let segment = quarter_circle_1200();
        // a reference past the top sends the update outside the real domain
        let reference = Point2D::new(2100.0, 1900.0);
        let step =
            segment.next_point_ref(Some(Point2D::new(1900.0, 1195.8)), &reference, 1200.0);
        assert_eq!(step, Step::AtEnd(Point2D::new(2000.0, 1200.0)));
    }

    #[test]
    fn rational_step_keeps_the_interval() {
        // x·y = 10000
        let segment = ConicSegment::new(
            Point2D::new(90.0, 10_000.0 / 90.0),
            Point2D::new(400.0, 25.0),
            [0.0, 0.0, 1.0, 0.0, 0.0, -10_000.0],
        )
        .unwrap();
        let current = Point2D::new(100.0, 100.0);
        let step = segment.next_point(Some(current), 10.0);
        match step {
            Step::InMiddle(p) => {
                assert!(segment.evaluate(&p).abs() < 1e-6);
                assert!((p.distance(&current) - 10.0).abs() < 0.1);
                assert!(p.x > current.x);
            }
            other => panic!("expected InMiddle, got {other:?}"),
        }
    }

    #[test]
    fn rational_reference_step_keeps_the_interval() {
        let segment = ConicSegment::new(
            Point2D::new(90.0, 10_000.0 / 90.0),
            Point2D::new(400.0, 25.0),
            [0.0, 0.0, 1.0, 0.0, 0.0, -10_000.0],
        )
        .unwrap();
        let reference = Point2D::new(120.0, 80.0);
        let step = segment.next_point_ref(Some(Point2D::new(100.0, 100.0)), &reference, 30.0);
        match step {
            Step::InMiddle(p) => {
                assert!(segment.evaluate(&p).abs() < 1e-6);
                assert!((p.distance(&reference) - 30.0).abs() < 0.5);
            }
            other => panic!("expected InMiddle, got {other:?}"),
        }
    }

    #[test]
    fn step_point_helper_unwraps_all_carrying_variants() {
        let p = Point2D::new(1.0, 2.0);
        assert_eq!(Step::AtStart(p).point(), Some(p));
        assert_eq!(Step::InMiddle(p).point(), Some(p));
        assert_eq!(Step::AtEnd(p).point(), Some(p));
        assert_eq!(Step::NotFound.point(), None);
        assert!(Step::AtEnd(p).is_at_end());
        assert!(!Step::InMiddle(p).is_at_end());
    }
}
