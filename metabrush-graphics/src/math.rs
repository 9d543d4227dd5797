//! Numerical kernels: angle reduction and stable quadratic roots.

use std::f64::consts::PI;

use crate::types::Scalar;

/// Reduce an angle into (-π, π].
///
/// Single-shot: the input is assumed to lie within [-2π, 2π], which is
/// all a difference of two `atan2` results can produce.
#[must_use]
pub fn reduce_angle(angle: Scalar) -> Scalar {
    if angle > PI {
        return angle - 2.0 * PI;
    }
    if angle < -PI {
        return angle + 2.0 * PI;
    }
    angle
}

/// Solve `a·x² + b·x + c = 0`, pushing real roots onto `roots`.
///
/// The caller passes `half_b = -b/2`, which every call site here can
/// produce without a multiplication:
///
/// ```text
/// x = (-b ± sqrt(b² - 4ac)) / 2a  =  (B ± sqrt(B² - ac)) / a    with B = -b/2
/// x = 2c / (-b ± sqrt(b² - 4ac))  =   c / (B ± sqrt(B² - ac))
/// ```
///
/// When the discriminant is positive, the root pair is taken from the
/// branch whose addition cannot cancel (`B - d` for negative `B`,
/// `B + d` otherwise), one root in each of the two forms above. The
/// naive `(-b ± sqrt(D)) / 2a` loses most of its digits when `b²`
/// dwarfs `ac`; see <http://people.csail.mit.edu/bkph/articles/Quadratics.pdf>.
///
/// Returns the number of roots pushed (0 to 2).
pub fn solve_quadratic(a: Scalar, half_b: Scalar, c: Scalar, roots: &mut Vec<Scalar>) -> usize {
    let b = half_b;

    if a == 0.0 {
        if b != 0.0 {
            roots.push(c / (2.0 * b));
            return 1;
        }
        return 0;
    }
    if c == 0.0 {
        roots.push(0.0);
        if b != 0.0 {
            roots.push(2.0 * b / a);
            return 2;
        }
        return 1;
    }
    let d = b.mul_add(b, -(a * c));
    if d < 0.0 {
        return 0;
    }
    let d = d.sqrt();
    if d == 0.0 {
        roots.push(b / a);
        return 1;
    }
    if b < 0.0 {
        roots.push(c / (b - d));
        roots.push((b - d) / a);
    } else {
        roots.push(c / (b + d));
        roots.push((b + d) / a);
    }
    2
}

/// Roots of a quadratic in Bernstein form with weights `u`, `v`, `w`:
///
/// ```text
/// u(1-t)² + 2v(1-t)t + wt²  =  t²(u - 2v + w) + 2t(v - u) + u
/// ```
///
/// which hands `B = -b/2 = u - v` straight to [`solve_quadratic`].
pub fn solve_bezier(u: Scalar, v: Scalar, w: Scalar, roots: &mut Vec<Scalar>) -> usize {
    solve_quadratic(u - v - v + w, u - v, u, roots)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
