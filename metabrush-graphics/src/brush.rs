//! Pen validation.
//!
//! A pen (brush) is a closed knot ring forming a strictly convex,
//! counter-clockwise polygon. [`brush_make`] verifies both properties and
//! materializes the explicit cubic control points used during
//! convolution.

use std::f64::consts::PI;

use kurbo::Point;

use crate::error::BrushError;
use crate::math::reduce_angle;
use crate::ring::Ring;
use crate::types::Side;

/// Slack on the total-turning test, in radians.
const WINDING_SLACK: f64 = 1e-9;

/// Verify a pen ring and initialize its control points.
///
/// Walks the ring once, accumulating the turning angle between
/// consecutive edge directions. Each turn must be a strict left turn
/// (collinear edges are rejected too), and the total turning may not
/// exceed one full revolution. Along the way every edge gets explicit
/// control points on the 1/3–2/3 chord.
///
/// # Errors
///
/// - [`BrushError::DuplicatePoint`] if two adjacent points coincide.
/// - [`BrushError::NonLeftTurn`] if any turn is zero or clockwise.
/// - [`BrushError::TooManyTurns`] if the ring winds more than once.
pub fn brush_make(pen: &mut Ring) -> Result<(), BrushError> {
    let mut alpha = 0.0;

    // Direction vector of the edge ending in the current knot.
    let mut dir = pen.knot(0).point - pen.knot(pen.pred(0)).point;
    if dir.x == 0.0 && dir.y == 0.0 {
        return Err(BrushError::DuplicatePoint);
    }

    let mut p = 0;
    loop {
        let q = pen.succ(p);
        let from = pen.knot(p).point;
        let to = pen.knot(q).point;
        let edge = to - from;

        pen.knot_mut(p).right = Side::Explicit(from + edge / 3.0);
        pen.knot_mut(q).left = Side::Explicit(to - edge / 3.0);

        if edge.x == 0.0 && edge.y == 0.0 {
            return Err(BrushError::DuplicatePoint);
        }
        let theta = reduce_angle(edge.atan2() - dir.atan2());
        if theta <= 0.0 {
            return Err(BrushError::NonLeftTurn);
        }
        alpha += theta;

        dir = edge;
        p = q;
        if p == 0 {
            break;
        }
    }

    // One full revolution is the most a simple convex ring can turn.
    // Rounding in the atan2 calls can push an exactly-full revolution a
    // few ulps past 2π; the slack keeps such pens legal while still
    // catching a second winding (4π).
    if alpha > 2.0f64.mul_add(PI, WINDING_SLACK) {
        return Err(BrushError::TooManyTurns);
    }
    Ok(())
}

/// A 1×1 square pen centered on the origin.
///
/// Built with the path builders, so its convexity and orientation hold by
/// construction and no validation pass is needed.
#[must_use]
pub fn unit_square() -> Ring {
    let mut pen = Ring::move_to(Point::new(0.5, 0.5));
    pen.line_to(Point::new(-0.5, 0.5));
    pen.line_to(Point::new(-0.5, -0.5));
    pen.line_to(Point::new(0.5, -0.5));
    pen.close();
    pen
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Knot;

    fn ring_of(points: &[(f64, f64)]) -> Ring {
        Ring {
            knots: points
                .iter()
                .map(|&(x, y)| Knot::new(Point::new(x, y)))
                .collect(),
        }
    }

    #[test]
    fn diamond_pen_is_accepted() {
        let mut pen = ring_of(&[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]);
        assert_eq!(brush_make(&mut pen), Ok(()));
    }

    #[test]
    fn accepted_pen_has_chord_controls() {
        let mut pen = ring_of(&[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]);
        brush_make(&mut pen).unwrap();

        for i in 0..pen.len() {
            let j = pen.succ(i);
            let from = pen.knot(i).point;
            let to = pen.knot(j).point;
            let one_third = pen.knot(i).right.explicit().unwrap();
            let two_thirds = pen.knot(j).left.explicit().unwrap();
            assert!(
                (one_third - from.lerp(to, 1.0 / 3.0)).hypot() < crate::types::EPSILON,
                "outgoing control of knot {i}: {one_third:?}"
            );
            assert!(
                (two_thirds - from.lerp(to, 2.0 / 3.0)).hypot() < crate::types::EPSILON,
                "incoming control of knot {j}: {two_thirds:?}"
            );
        }
    }

    #[test]
    fn clockwise_pen_is_rejected() {
        let mut pen = ring_of(&[(1.0, 0.0), (0.0, -1.0), (-1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(brush_make(&mut pen), Err(BrushError::NonLeftTurn));
    }

    #[test]
    fn reversal_flips_acceptance() {
        let mut pen = ring_of(&[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]);
        assert_eq!(brush_make(&mut pen), Ok(()));
        pen.reverse();
        assert_eq!(brush_make(&mut pen), Err(BrushError::NonLeftTurn));
    }

    #[test]
    fn bigon_is_rejected() {
        let mut pen = ring_of(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(brush_make(&mut pen), Err(BrushError::NonLeftTurn));
    }

    #[test]
    fn duplicate_adjacent_points_are_rejected() {
        let mut pen = ring_of(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        assert_eq!(brush_make(&mut pen), Err(BrushError::DuplicatePoint));

        let mut pen = ring_of(&[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(brush_make(&mut pen), Err(BrushError::DuplicatePoint));
    }

    #[test]
    fn collinear_points_are_rejected() {
        let mut pen = ring_of(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(brush_make(&mut pen), Err(BrushError::NonLeftTurn));
    }

    #[test]
    fn double_winding_is_rejected() {
        let mut pen = ring_of(&[
            (1.0, 0.0),
            (0.0, 1.0),
            (-1.0, 0.0),
            (0.0, -1.0),
            (1.0, 0.0),
            (0.0, 1.0),
            (-1.0, 0.0),
            (0.0, -1.0),
        ]);
        assert_eq!(brush_make(&mut pen), Err(BrushError::TooManyTurns));
    }

    #[test]
    fn unit_square_passes_validation() {
        let mut pen = unit_square();
        assert_eq!(brush_make(&mut pen), Ok(()));
    }

    #[test]
    fn triangle_pen_is_accepted() {
        let mut pen = ring_of(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
        assert_eq!(brush_make(&mut pen), Ok(()));
    }
}
