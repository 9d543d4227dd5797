//! Cyclic knot rings and path construction.
//!
//! A [`Ring`] is a nonempty cyclic sequence of knots stored in traversal
//! order in an owned `Vec`. Index 0 is the traversal start; successor and
//! predecessor are modular. An open path keeps `Side::Regular` on the
//! outgoing side of its **last** knot, which is where segment traversal
//! stops; a closed path has no `Regular` side at all.
//!
//! Construction mirrors the classic builder set: `move_to` starts a ring,
//! `line_to`/`curve_to` append segments, `close` adds the closing straight
//! segment. Straight segments get explicit control points at 0.3 and 0.7
//! of the chord.

use kurbo::{Point, Vec2};

use crate::types::{Knot, Side};

/// A cyclic ring of knots; used for both paths and pens.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub knots: Vec<Knot>,
}

impl Ring {
    /// Number of knots on the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Index of the knot after `i` in traversal order.
    #[must_use]
    pub fn succ(&self, i: usize) -> usize {
        (i + 1) % self.knots.len()
    }

    /// Index of the knot before `i` in traversal order.
    #[must_use]
    pub fn pred(&self, i: usize) -> usize {
        (i + self.knots.len() - 1) % self.knots.len()
    }

    /// The knot at index `i`.
    #[must_use]
    pub fn knot(&self, i: usize) -> &Knot {
        &self.knots[i]
    }

    /// Mutable access to the knot at index `i`.
    pub fn knot_mut(&mut self, i: usize) -> &mut Knot {
        &mut self.knots[i]
    }

    /// Insert `knot` immediately after index `i`; returns its index.
    ///
    /// Indices of knots after the insertion point shift by one.
    pub fn insert_after(&mut self, i: usize, knot: Knot) -> usize {
        self.knots.insert(i + 1, knot);
        i + 1
    }

    /// Reverse the traversal direction in place.
    ///
    /// Every knot's `left` and `right` payloads are swapped. If the ring
    /// has a knot with `right = Regular` (an open path), that knot becomes
    /// the new traversal start, its incoming side is cleared to `Open`,
    /// and the new last knot becomes the boundary. A fully closed ring
    /// keeps its starting knot.
    pub fn reverse(&mut self) {
        let boundary = self.knots.iter().position(|k| k.right.is_regular());

        for k in &mut self.knots {
            std::mem::swap(&mut k.left, &mut k.right);
        }

        let n = self.knots.len();
        match boundary {
            Some(h) => {
                // Rotate so the old boundary knot comes first, then flip
                // the order to walk the ring backwards.
                self.knots.rotate_left((h + 1) % n);
                self.knots.reverse();
                self.knots[0].left = Side::Open;
                self.knots[n - 1].right = Side::Regular;
            }
            None => {
                // Closed ring: same starting knot, opposite direction.
                self.knots.reverse();
                self.knots.rotate_right(1);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Start a new path at `point`.
    #[must_use]
    pub fn move_to(point: Point) -> Self {
        Self {
            knots: vec![Knot {
                point,
                left: Side::Open,
                right: Side::Regular,
            }],
        }
    }

    /// Start a new path displaced by `delta` from the last knot of `self`.
    #[must_use]
    pub fn r_move_to(&self, delta: Vec2) -> Self {
        let last = self.knots[self.knots.len() - 1].point;
        Self::move_to(last + delta)
    }

    /// Append a straight segment to `point`.
    ///
    /// The previous tail gets an outgoing control at 0.3 of the chord and
    /// the new knot an incoming control at 0.7; the new knot becomes the
    /// path boundary.
    pub fn line_to(&mut self, point: Point) {
        let tail = self.knots.len() - 1;
        let from = self.knots[tail].point;
        let chord = point - from;

        self.knots[tail].right = Side::Explicit(from + chord * 0.3);
        self.knots.push(Knot {
            point,
            left: Side::Explicit(from + chord * 0.7),
            right: Side::Regular,
        });
    }

    /// Append a straight segment displaced by `delta` from the tail.
    pub fn r_line_to(&mut self, delta: Vec2) {
        let last = self.knots[self.knots.len() - 1].point;
        self.line_to(last + delta);
    }

    /// Append a cubic segment with explicit control points.
    pub fn curve_to(&mut self, control1: Point, control2: Point, end: Point) {
        let tail = self.knots.len() - 1;
        self.knots[tail].right = Side::Explicit(control1);
        self.knots.push(Knot {
            point: end,
            left: Side::Explicit(control2),
            right: Side::Regular,
        });
    }

    /// Close the path with a straight segment from the tail back to the
    /// start. A single-knot ring is left unchanged.
    pub fn close(&mut self) {
        let tail = self.knots.len() - 1;
        if tail == 0 {
            return;
        }
        let from = self.knots[tail].point;
        let to = self.knots[0].point;
        let chord = to - from;

        self.knots[tail].right = Side::Explicit(from + chord * 0.3);
        self.knots[0].left = Side::Explicit(from + chord * 0.7);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn open_polyline() -> Ring {
        let mut ring = Ring::move_to(Point::new(0.0, 0.0));
        ring.line_to(Point::new(10.0, 0.0));
        ring.line_to(Point::new(10.0, 10.0));
        ring
    }

    #[test]
    fn move_to_single_knot() {
        let ring = Ring::move_to(Point::new(1.0, 2.0));
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.knot(0).left, Side::Open);
        assert!(ring.knot(0).right.is_regular());
    }

    #[test]
    fn line_to_places_chord_controls() {
        let mut ring = Ring::move_to(Point::new(0.0, 0.0));
        ring.line_to(Point::new(10.0, 0.0));

        assert_eq!(ring.len(), 2);
        assert_eq!(ring.knot(0).right.explicit(), Some(Point::new(3.0, 0.0)));
        assert_eq!(ring.knot(1).left.explicit(), Some(Point::new(7.0, 0.0)));
        assert!(ring.knot(1).right.is_regular());
    }

    #[test]
    fn r_line_to_is_relative_to_tail() {
        let mut ring = Ring::move_to(Point::new(5.0, 5.0));
        ring.r_line_to(Vec2::new(0.0, -5.0));
        assert_eq!(ring.knot(1).point, Point::new(5.0, 0.0));
    }

    #[test]
    fn close_removes_boundary() {
        let mut ring = open_polyline();
        ring.close();

        assert!(ring.knots.iter().all(|k| !k.right.is_regular()));
        // Closing segment (10,10) -> (0,0): controls at 0.3 and 0.7
        assert_eq!(ring.knot(2).right.explicit(), Some(Point::new(7.0, 7.0)));
        assert_eq!(ring.knot(0).left.explicit(), Some(Point::new(3.0, 3.0)));
    }

    #[test]
    fn succ_pred_are_inverse() {
        let ring = open_polyline();
        for i in 0..ring.len() {
            assert_eq!(ring.pred(ring.succ(i)), i);
            assert_eq!(ring.succ(ring.pred(i)), i);
        }
    }

    #[test]
    fn insert_after_links_in_order() {
        let mut ring = open_polyline();
        let idx = ring.insert_after(0, Knot::new(Point::new(5.0, 0.0)));
        assert_eq!(idx, 1);
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.knot(1).point, Point::new(5.0, 0.0));
        assert_eq!(ring.knot(2).point, Point::new(10.0, 0.0));
    }

    #[test]
    fn reverse_open_path_swaps_ends() {
        let mut ring = open_polyline();
        ring.reverse();

        assert_eq!(ring.knot(0).point, Point::new(10.0, 10.0));
        assert_eq!(ring.knot(0).left, Side::Open);
        assert_eq!(ring.knot(2).point, Point::new(0.0, 0.0));
        assert!(ring.knot(2).right.is_regular());
        // Old incoming control of the tail becomes its outgoing control.
        assert_eq!(ring.knot(0).right.explicit(), Some(Point::new(10.0, 7.0)));
    }

    #[test]
    fn reverse_is_involution() {
        let original = open_polyline();
        let mut ring = original.clone();
        ring.reverse();
        ring.reverse();
        assert_eq!(ring, original);

        let mut closed = original.clone();
        closed.close();
        let snapshot = closed.clone();
        closed.reverse();
        closed.reverse();
        assert_eq!(closed, snapshot);
    }

    #[test]
    fn reverse_closed_ring_keeps_start() {
        let mut ring = open_polyline();
        ring.close();
        ring.reverse();
        assert_eq!(ring.knot(0).point, Point::new(0.0, 0.0));
        assert_eq!(ring.knot(1).point, Point::new(10.0, 10.0));
    }

    #[test]
    fn r_move_to_starts_from_tail() {
        let ring = open_polyline();
        let fresh = ring.r_move_to(Vec2::new(1.0, 1.0));
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh.knot(0).point, Point::new(11.0, 11.0));
    }
}
