//! Core types shared across the `Metabrush` system.

pub use kurbo::{Point, Vec2};

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// Convenience alias. All geometry is IEEE-754 double precision.
pub type Scalar = f64;

/// Tolerance for floating-point comparisons in tests and queries.
pub const EPSILON: Scalar = 1e-9;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Blend two colors linearly, component-wise.
    ///
    /// `weight = 1` returns `self`, `weight = 0` returns `other`;
    /// intermediate values round to the nearest component.
    #[must_use]
    pub fn mix(self, other: Self, weight: Scalar) -> Self {
        Self {
            r: mix_component(self.r, other.r, weight),
            g: mix_component(self.g, other.g, weight),
            b: mix_component(self.b, other.b, weight),
            a: mix_component(self.a, other.a, weight),
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the blend of two u8 components rounds back into u8 range"
)]
fn mix_component(a: u8, b: u8, weight: Scalar) -> u8 {
    f64::from(a).mul_add(weight, f64::from(b) * (1.0 - weight)).round() as u8
}

// ---------------------------------------------------------------------------
// Side — per-side knot descriptor
// ---------------------------------------------------------------------------

/// Descriptor for one side (incoming or outgoing) of a knot.
///
/// The convolution core reads only `Regular`, `Open` and `Explicit`.
/// `Given` and `Curl` exist for spline-solver front ends and are accepted
/// but never produced here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Side {
    /// A path endpoint: the boundary of the segment sequence.
    Regular,
    /// Undefined direction; used transiently during construction and
    /// reversal.
    #[default]
    Open,
    /// An explicit cubic control point for this side.
    Explicit(Point),
    /// A direction angle in radians with a tension value.
    Given { tension: Scalar, angle: Scalar },
    /// A curl parameter with a tension value.
    Curl { tension: Scalar, curl: Scalar },
}

impl Side {
    /// The explicit control point, if this side carries one.
    #[must_use]
    pub const fn explicit(&self) -> Option<Point> {
        match self {
            Self::Explicit(p) => Some(*p),
            _ => None,
        }
    }

    /// Whether this side marks a path boundary.
    #[must_use]
    pub const fn is_regular(&self) -> bool {
        matches!(self, Self::Regular)
    }
}

// ---------------------------------------------------------------------------
// Knot
// ---------------------------------------------------------------------------

/// A single knot on a path or pen ring.
///
/// Carries the on-curve point plus the incoming (`left`) and outgoing
/// (`right`) side descriptors. Ring linkage lives in the owning
/// [`Ring`](crate::ring::Ring), not in the knot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knot {
    pub point: Point,
    pub left: Side,
    pub right: Side,
}

impl Knot {
    /// Create a knot with undefined directions on both sides.
    #[must_use]
    pub const fn new(point: Point) -> Self {
        Self {
            point,
            left: Side::Open,
            right: Side::Open,
        }
    }

    /// Create a knot with explicit control points on both sides.
    #[must_use]
    pub const fn with_controls(point: Point, left_cp: Point, right_cp: Point) -> Self {
        Self {
            point,
            left: Side::Explicit(left_cp),
            right: Side::Explicit(right_cp),
        }
    }

    /// The incoming control point, falling back to the on-curve point.
    #[must_use]
    pub fn left_control(&self) -> Point {
        self.left.explicit().unwrap_or(self.point)
    }

    /// The outgoing control point, falling back to the on-curve point.
    #[must_use]
    pub fn right_control(&self) -> Point {
        self.right.explicit().unwrap_or(self.point)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_full_weights() {
        let red = Color::new(255, 0, 0, 255);
        let blue = Color::new(0, 0, 255, 255);
        assert_eq!(red.mix(blue, 1.0), red);
        assert_eq!(red.mix(blue, 0.0), blue);
    }

    #[test]
    fn mix_halfway_rounds() {
        let a = Color::new(255, 0, 100, 255);
        let b = Color::new(0, 0, 101, 255);
        let m = a.mix(b, 0.5);
        assert_eq!(m.r, 128); // 127.5 rounds up
        assert_eq!(m.g, 0);
        assert_eq!(m.b, 101); // 100.5 rounds up
        assert_eq!(m.a, 255);
    }

    #[test]
    fn knot_defaults() {
        let k = Knot::new(Point::new(1.0, 2.0));
        assert_eq!(k.left, Side::Open);
        assert_eq!(k.right, Side::Open);
        assert_eq!(k.left_control(), k.point);
    }

    #[test]
    fn explicit_control_lookup() {
        let k = Knot::with_controls(
            Point::new(0.0, 0.0),
            Point::new(-1.0, 0.0),
            Point::new(1.0, 0.0),
        );
        assert_eq!(k.left.explicit(), Some(Point::new(-1.0, 0.0)));
        assert_eq!(k.right_control(), Point::new(1.0, 0.0));
        assert!(!k.right.is_regular());
    }
}
