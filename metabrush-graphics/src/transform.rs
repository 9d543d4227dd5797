//! Affine transforms for pen rings.
//!
//! Pens are transformed before validation or drawing: scaled, rotated,
//! sheared, reflected, or parked at a target position. Transforms move
//! the knot positions and then re-derive each explicit control from the
//! transformed neighbor positions, which keeps polygonal pen edges
//! straight without transforming control points separately.

use kurbo::{Affine, Point, Vec2};

use crate::ring::Ring;
use crate::types::Side;

/// Per-axis selector for scale, shear and reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Both,
}

/// Apply `affine` to every knot of `pen`.
///
/// Explicit side controls are snapped to the transformed neighbor
/// positions: for each edge p → q, p's outgoing control becomes q's
/// position and q's incoming control becomes p's position. The edge
/// still traces the straight chord (with nonuniform speed), which is
/// all a polygonal pen needs.
pub fn transform(pen: &mut Ring, affine: Affine) {
    for k in &mut pen.knots {
        k.point = affine * k.point;
    }
    let n = pen.len();
    for p in 0..n {
        let q = pen.succ(p);
        let from = pen.knot(p).point;
        let to = pen.knot(q).point;
        if pen.knot(p).right.explicit().is_some() {
            pen.knot_mut(p).right = Side::Explicit(to);
        }
        if pen.knot(q).left.explicit().is_some() {
            pen.knot_mut(q).left = Side::Explicit(from);
        }
    }
}

/// Bounding-box center of the pen's knot positions.
#[must_use]
pub fn center(pen: &Ring) -> Point {
    let first = pen.knot(0).point;
    let mut min = first;
    let mut max = first;
    for k in &pen.knots {
        min.x = min.x.min(k.point.x);
        min.y = min.y.min(k.point.y);
        max.x = max.x.max(k.point.x);
        max.y = max.y.max(k.point.y);
    }
    min.midpoint(max)
}

/// Translate the pen so its bounding-box center lands on `dest`.
pub fn translate_to(pen: &mut Ring, dest: Point) {
    let delta = dest - center(pen);
    transform(pen, Affine::translate(delta));
}

/// Rotate the pen by `degrees` counter-clockwise about the origin.
pub fn rotate(pen: &mut Ring, degrees: f64) {
    transform(pen, Affine::rotate(degrees.to_radians()));
}

/// Scale the pen by `factor` along the chosen axis (or both).
pub fn scale(pen: &mut Ring, factor: f64, axis: Axis) {
    let (sx, sy) = match axis {
        Axis::X => (factor, 1.0),
        Axis::Y => (1.0, factor),
        Axis::Both => (factor, factor),
    };
    transform(pen, Affine::scale_non_uniform(sx, sy));
}

/// Shear the pen along the chosen axis.
///
/// `Axis::X` slants x by y (`x' = x + factor·y`); `Axis::Y` slants y
/// by x. `Axis::Both` applies the x shear.
pub fn shear(pen: &mut Ring, factor: f64, axis: Axis) {
    let affine = match axis {
        Axis::Y => Affine::new([1.0, factor, 0.0, 1.0, 0.0, 0.0]),
        Axis::X | Axis::Both => Affine::new([1.0, 0.0, factor, 1.0, 0.0, 0.0]),
    };
    transform(pen, affine);
}

/// Reflect the pen across the chosen axis.
///
/// Mirroring flips the ring's orientation, so the ring is reversed
/// first to keep the knot order counter-clockwise for validation.
pub fn reflect(pen: &mut Ring, axis: Axis) {
    let affine = match axis {
        Axis::X => Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, 0.0]),
        Axis::Y => Affine::new([-1.0, 0.0, 0.0, 1.0, 0.0, 0.0]),
        Axis::Both => Affine::new([-1.0, 0.0, 0.0, -1.0, 0.0, 0.0]),
    };
    if !matches!(axis, Axis::Both) {
        pen.reverse();
    }
    transform(pen, affine);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
