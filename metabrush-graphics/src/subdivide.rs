//! Curve subdivision at inflections and pen-slope tees.
//!
//! Before convolution every path segment is split at its *tees*: the
//! parameters t in (0, 1) where the segment has an inflection or where
//! its tangent is parallel to one of the pen's edges. Splitting there
//! makes each sub-segment turn monotonically relative to the pen, which
//! is what lets the convolver pick pen offsets per whole segment.

use crate::math::{solve_bezier, solve_quadratic};
use crate::ring::Ring;
use crate::types::{Knot, Scalar, Side};

/// Push the inflection parameters of the segment starting at knot `p`
/// onto `tees`.
///
/// The segment is translated so its start is the origin and rotated so
/// the chord lies on the +x axis; the inflection condition then reduces
/// to a quadratic in t (the formula comes from Pomax, "A Primer on
/// Bezier Curves"). Roots may land outside (0, 1); the caller filters.
pub fn inflection_tees(path: &Ring, p: usize, tees: &mut Vec<Scalar>) {
    let q = path.succ(p);
    let kp = path.knot(p);
    let kq = path.knot(q);

    let origin = kp.point;
    let c1 = kp.right_control() - origin;
    let c2 = kq.left_control() - origin;
    let chord = kq.point - origin;

    // Rotate right by the chord angle: (u, v) -> (u·x + v·y, v·x - u·y)
    // with (x, y) the unit chord. The chord itself maps onto (|chord|, 0).
    let m = chord.hypot();
    let ux = chord.x / m;
    let uy = chord.y / m;
    let x1 = c1.x.mul_add(ux, c1.y * uy);
    let y1 = c1.y.mul_add(ux, -(c1.x * uy));
    let x2 = c2.x.mul_add(ux, c2.y * uy);
    let y2 = c2.y.mul_add(ux, -(c2.x * uy));
    let x3 = chord.x.mul_add(ux, chord.y * uy);

    let a = x2 * y1;
    let b = x3 * y1;
    let c = x1 * y2;
    let d = x3 * y2;

    // 18(3a - b - 3c)t² ... with the middle coefficient passed as -b/2.
    let t2 = 18.0 * (3.0f64.mul_add(c, 2.0f64.mul_add(b, -3.0 * a)) - d);
    let t1 = 9.0 * (3.0f64.mul_add(c, b) - 3.0 * a);
    let t0 = 18.0 * (c - a);

    solve_quadratic(t2, t1, t0, tees);
}

/// Push the parameters where the segment's tangent is parallel to a pen
/// edge onto `tees`, for every edge of `pen`.
///
/// The segment's first derivative is a quadratic Bezier with control
/// vectors d0, d1, d2; crossing each with the pen edge direction gives a
/// Bernstein quadratic whose roots are the slope matches.
pub fn pen_tees(path: &Ring, p: usize, pen: &Ring, tees: &mut Vec<Scalar>) {
    let q = path.succ(p);
    let kp = path.knot(p);
    let kq = path.knot(q);

    let d0 = kp.right_control() - kp.point;
    let d1 = kq.left_control() - kp.right_control();
    let d2 = kq.point - kq.left_control();

    let mut r = 0;
    loop {
        let s = pen.succ(r);
        let edge = pen.knot(s).point - pen.knot(r).point;

        solve_bezier(edge.cross(d0), edge.cross(d1), edge.cross(d2), tees);

        r = s;
        if r == 0 {
            break;
        }
    }
}

/// Split the segment starting at knot `p` at parameter `t` in (0, 1).
///
/// A de Casteljau split: the new middle knot carries explicit control
/// points on both sides and the neighbors' controls are tightened onto
/// the two halves. Returns the index of the inserted knot.
pub fn cubic_split(path: &mut Ring, p: usize, t: Scalar) -> usize {
    let q = path.succ(p);
    let kp = *path.knot(p);
    let kq = *path.knot(q);

    let u0 = kp.point.lerp(kp.right_control(), t);
    let u1 = kp.right_control().lerp(kq.left_control(), t);
    let u2 = kq.left_control().lerp(kq.point, t);
    let v0 = u0.lerp(u1, t);
    let v1 = u1.lerp(u2, t);
    let w = v0.lerp(v1, t);

    path.knot_mut(p).right = Side::Explicit(u0);
    path.knot_mut(q).left = Side::Explicit(u2);
    path.insert_after(p, Knot::with_controls(w, v0, v1))
}

/// Split every segment of `path` at all of its tees.
///
/// Tees outside the open interval (0, 1) are dropped, the rest are
/// sorted ascending and applied left to right; each split renormalizes
/// the remaining parameters into the right-hand sub-segment. A tee equal
/// to the previous split position is skipped. Traversal stops at the
/// path boundary (or after one full cycle on a closed path).
#[expect(
    clippy::float_cmp,
    reason = "duplicate tees from symmetric pen edges are bitwise equal"
)]
pub fn split_at_tees(path: &mut Ring, pen: &Ring) {
    let mut tees: Vec<Scalar> = Vec::new();
    let mut p = 0;

    loop {
        tees.clear();
        inflection_tees(path, p, &mut tees);
        pen_tees(path, p, pen, &mut tees);

        tees.retain(|&t| t > 0.0 && t < 1.0);
        tees.sort_unstable_by(Scalar::total_cmp);

        let mut s = 0.0;
        for &x in &tees {
            if s != x {
                p = cubic_split(path, p, (x - s) / (1.0 - s));
                s = x;
            }
        }

        p = path.succ(p);
        if p == 0 || path.knot(p).right.is_regular() {
            break;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
