//! Pen-path convolution.
//!
//! The convolver sweeps a validated pen around each path segment and
//! emits the cubic pieces bounding the inked region, four points per
//! piece, into a flat trace buffer. Two kinds of pieces are produced:
//!
//! - a **pen edge** translated to a path point, wherever the edge's
//!   direction falls inside the path's turning arc at that point (this
//!   fills the joints), and
//! - a **path segment** translated to a pen vertex, wherever the
//!   segment's direction falls inside the pen's turning arc at that
//!   vertex (this traces the sides of the stroke).
//!
//! Emission order is canonical: path segments in ring succession, pen
//! knots in ring succession within each, edge-piece before side-piece
//! for every pair. Downstream consumers rely on it being deterministic.

use kurbo::{Point, Vec2};

use crate::ring::Ring;
use crate::types::Side;

/// Near-collinear clamp for turn classification.
///
/// Cross products smaller than this count as clockwise, which biases
/// joint emission to *include* boundary cases; without it, axis-aligned
/// pens drop pieces at exactly-parallel tangents.
const SMALL: f64 = 1e-12;

/// Whether the turn from `a` to `b` is a left turn or straight
/// (`cross(a, b) >= 0`), with the near-collinear clamp.
fn clockwise(a: Vec2, b: Vec2) -> bool {
    let d = a.cross(b);
    if d.abs() < SMALL {
        return true;
    }
    d >= 0.0
}

/// Whether `v3` lies inside the convex angular arc swept from `v1` to
/// `v2` counter-clockwise.
fn within_turn(v1: Vec2, v2: Vec2, v3: Vec2) -> bool {
    if !clockwise(v1, v2) {
        // v1 -> v2 is a strict right turn
        return clockwise(v2, v3) && clockwise(v3, v1);
    }
    clockwise(v1, v3) && clockwise(v3, v2)
}

/// Append the segment from knot `p` of `ring`, translated by `offset`,
/// to the trace: start, first control, second control, end.
fn make_move(trace: &mut Vec<Point>, ring: &Ring, p: usize, offset: Vec2) {
    let q = ring.succ(p);
    let kp = ring.knot(p);
    let kq = ring.knot(q);

    trace.push(kp.point + offset);
    trace.push(kp.right_control() + offset);
    trace.push(kq.left_control() + offset);
    trace.push(kq.point + offset);
}

/// Convolve one path knot with one pen knot.
///
/// `v1` is the incoming tangent at the path knot, `v2` the outgoing
/// tangent, `v3` the chord to the next path knot. The pen knot `r`
/// contributes its incoming edge `v4` and outgoing edge `v5`.
#[expect(
    clippy::too_many_arguments,
    reason = "the turn test needs all three path vectors plus both rings"
)]
fn convolve(
    path: &Ring,
    p: usize,
    v1: Vec2,
    v2: Vec2,
    v3: Vec2,
    pen: &Ring,
    r: usize,
    trace: &mut Vec<Point>,
) {
    let rp = pen.knot(r).point;
    let v4 = rp - pen.knot(pen.pred(r)).point;
    let v5 = pen.knot(pen.succ(r)).point - rp;

    if within_turn(v1, v2, v5) {
        make_move(trace, pen, r, path.knot(p).point.to_vec2());
    }
    if within_turn(v4, v5, v3) {
        make_move(trace, path, p, rp.to_vec2());
    }
}

/// Sweep `pen` along every segment of `path`, returning the trace.
///
/// The path must carry explicit outgoing controls on every knot up to
/// its boundary (builders and [`split_at_tees`](crate::subdivide::split_at_tees)
/// guarantee this); the pen must have passed
/// [`brush_make`](crate::brush::brush_make). Neither ring is modified.
#[must_use]
pub fn convolve_all(path: &Ring, pen: &Ring) -> Vec<Point> {
    let mut trace = Vec::new();
    let mut p = 0;

    loop {
        let q = path.succ(p);
        let kp = path.knot(p);

        let v2 = kp.right_control() - kp.point;
        // Dead-end convention: with no incoming control, the incoming
        // tangent points straight back.
        let v1 = match kp.left {
            Side::Explicit(c) => kp.point - c,
            _ => -v2,
        };
        let v3 = path.knot(q).point - kp.point;

        for r in 0..pen.len() {
            convolve(path, p, v1, v2, v3, pen, r, &mut trace);
        }

        p = q;
        if p == 0 || path.knot(p).right.is_regular() {
            break;
        }
    }

    trace
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{brush_make, unit_square};

    fn square_pen() -> Ring {
        let mut pen = unit_square();
        brush_make(&mut pen).unwrap();
        pen
    }

    fn horizontal_line() -> Ring {
        let mut path = Ring::move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        path
    }

    #[test]
    fn clockwise_basics() {
        let right = Vec2::new(1.0, 0.0);
        let up = Vec2::new(0.0, 1.0);
        assert!(clockwise(right, up)); // left turn passes
        assert!(!clockwise(up, right)); // strict right turn fails
        // Collinear clamps to true either way.
        assert!(clockwise(right, right));
        assert!(clockwise(right, -right));
        // A strict right turn below the tolerance is clamped to true.
        assert!(clockwise(right, Vec2::new(1.0, -1e-13)));
    }

    #[test]
    fn within_turn_left_turn_arc() {
        let v1 = Vec2::new(1.0, 0.0);
        let v2 = Vec2::new(0.0, 1.0);
        assert!(within_turn(v1, v2, Vec2::new(1.0, 1.0)));
        assert!(!within_turn(v1, v2, Vec2::new(-1.0, -1.0)));
        // The arc boundary itself is in (collinear clamp).
        assert!(within_turn(v1, v2, v1));
        assert!(within_turn(v1, v2, v2));
    }

    #[test]
    fn within_turn_right_turn_arc() {
        // A right turn flips the test to the complementary arc.
        let v1 = Vec2::new(0.0, -1.0);
        let v2 = Vec2::new(-1.0, 0.0);
        assert!(within_turn(v1, v2, Vec2::new(-1.0, -1.0)));
        assert!(!within_turn(v1, v2, Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn straight_line_emission() {
        let trace = convolve_all(&horizontal_line(), &square_pen());

        // Three pen edges at the start cap, then the path segment from
        // each of the two bottom pen vertices: five pieces.
        assert_eq!(trace.len(), 5 * 4);

        // The first piece is the pen's top edge parked at the origin.
        assert_eq!(trace[0], Point::new(0.5, 0.5));
        assert_eq!(trace[3], Point::new(-0.5, 0.5));

        // The last piece is the full segment shifted to (0.5, -0.5).
        let last = &trace[16..20];
        assert_eq!(last[0], Point::new(0.5, -0.5));
        assert_eq!(last[1], Point::new(3.5, -0.5));
        assert_eq!(last[2], Point::new(7.5, -0.5));
        assert_eq!(last[3], Point::new(10.5, -0.5));
    }

    #[test]
    fn reversed_line_emits_the_other_side() {
        let mut path = horizontal_line();
        path.reverse();
        let trace = convolve_all(&path, &square_pen());

        assert_eq!(trace.len(), 5 * 4);
        // Side pieces now ride the top pen vertices.
        let ys: Vec<f64> = trace.iter().map(|p| p.y).collect();
        assert!(ys.contains(&0.5));
        // The reversed segment runs right to left along y = +0.5.
        let side = &trace[4..8];
        assert_eq!(side[0], Point::new(10.5, 0.5));
        assert_eq!(side[3], Point::new(0.5, 0.5));
    }

    #[test]
    fn emission_is_deterministic() {
        let path = horizontal_line();
        let pen = square_pen();
        let a = convolve_all(&path, &pen);
        let b = convolve_all(&path, &pen);
        assert_eq!(a, b);
    }

    #[test]
    fn right_angle_path_emits_joint_and_sides() {
        let mut path = Ring::move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(5.0, 0.0));
        path.line_to(Point::new(5.0, 5.0));
        let trace = convolve_all(&path, &square_pen());

        // First segment: 3 cap edges + 2 side pieces; second segment:
        // 2 joint edges + 2 side pieces.
        assert_eq!(trace.len(), 9 * 4);

        // The outer corner contributes the pen's right edge at (5, 0).
        let corner_edge: Vec<Point> = vec![
            Point::new(4.5, -0.5),
            Point::new(4.5 + 1.0 / 3.0, -0.5),
            Point::new(5.5 - 1.0 / 3.0, -0.5),
            Point::new(5.5, -0.5),
        ];
        let found = trace
            .chunks_exact(4)
            .any(|piece| piece == corner_edge.as_slice());
        assert!(found, "missing bottom joint edge in {trace:?}");
    }

    #[test]
    fn closed_path_visits_every_segment() {
        let mut path = Ring::move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        path.line_to(Point::new(10.0, 10.0));
        path.line_to(Point::new(0.0, 10.0));
        path.close();

        let trace = convolve_all(&path, &square_pen());
        assert!(trace.len() % 4 == 0);
        // Every segment must produce at least one side piece; with the
        // square pen each side of the square shows up shifted outward.
        let pieces: Vec<&[Point]> = trace.chunks_exact(4).collect();
        assert!(pieces
            .iter()
            .any(|p| p[0] == Point::new(0.5, -0.5) && p[3] == Point::new(10.5, -0.5)));
        assert!(pieces
            .iter()
            .any(|p| p[0] == Point::new(10.5, 0.5) && p[3] == Point::new(10.5, 10.5)));
    }
}
