//! Stroke assembly and the high-level drawing driver.
//!
//! A [`Stroke`] is what the convolver ultimately produces: an ordered
//! list of cubic Bezier pieces bounding the inked region, plus a color.
//! [`draw_shape`] runs the whole pipeline — validate the pen, subdivide
//! the path, convolve both directions — and is what rendering front
//! ends call.

use kurbo::Point;

use crate::brush::brush_make;
use crate::convolve::convolve_all;
use crate::error::BrushError;
use crate::ring::Ring;
use crate::subdivide::split_at_tees;
use crate::transform::translate_to;
use crate::types::{Color, Scalar};

// ---------------------------------------------------------------------------
// Cubic
// ---------------------------------------------------------------------------

/// One cubic Bezier piece of a stroke outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub start: Point,
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

impl Cubic {
    /// Evaluate the curve at parameter `t` in [0, 1].
    #[must_use]
    pub fn eval(&self, t: Scalar) -> Point {
        let s = 1.0 - t;
        let a = s * s * s;
        let b = 3.0 * s * s * t;
        let c = 3.0 * s * t * t;
        let d = t * t * t;
        Point::new(
            d.mul_add(
                self.end.x,
                a.mul_add(self.start.x, b.mul_add(self.c1.x, c * self.c2.x)),
            ),
            d.mul_add(
                self.end.y,
                a.mul_add(self.start.y, b.mul_add(self.c1.y, c * self.c2.y)),
            ),
        )
    }

    /// Axis-aligned bounding box of the control hull.
    #[must_use]
    pub fn bbox(&self) -> BoundingBox {
        let mut bb = BoundingBox::EMPTY;
        for p in [self.start, self.c1, self.c2, self.end] {
            bb.include(p);
        }
        bb
    }
}

// ---------------------------------------------------------------------------
// BoundingBox
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: Scalar,
    pub min_y: Scalar,
    pub max_x: Scalar,
    pub max_y: Scalar,
}

impl BoundingBox {
    /// The empty box: grows to fit the first included point.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Whether the box contains at least one point.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Grow to include `p`.
    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Whether two boxes overlap (touching counts).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.max_x < other.min_x
            || other.max_x < self.min_x
            || self.max_y < other.min_y
            || other.max_y < self.min_y)
    }
}

// ---------------------------------------------------------------------------
// Stroke
// ---------------------------------------------------------------------------

/// A finished brush stroke: cubic outline pieces plus a color.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub beziers: Vec<Cubic>,
    pub color: Color,
}

impl Stroke {
    /// An empty stroke of the given color.
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self {
            beziers: Vec::new(),
            color,
        }
    }

    /// Number of cubic pieces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.beziers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.beziers.is_empty()
    }
}

/// Package a trace buffer into cubic pieces appended to `stroke`.
///
/// The trace holds four points per piece in emission order; anything
/// short of a full 4-tuple at the end is ignored.
pub fn show_segments(trace: &[Point], stroke: &mut Stroke) {
    stroke.beziers.reserve(trace.len() / 4);
    for piece in trace.chunks_exact(4) {
        stroke.beziers.push(Cubic {
            start: piece[0],
            c1: piece[1],
            c2: piece[2],
            end: piece[3],
        });
    }
}

/// Bounding box over all control points of all pieces.
///
/// An empty stroke yields the (invalid) empty box.
#[must_use]
pub fn bounding_box(stroke: &Stroke) -> BoundingBox {
    let mut bb = BoundingBox::EMPTY;
    for cubic in &stroke.beziers {
        bb.include(cubic.start);
        bb.include(cubic.c1);
        bb.include(cubic.c2);
        bb.include(cubic.end);
    }
    bb
}

// ---------------------------------------------------------------------------
// Conservative set operations
// ---------------------------------------------------------------------------

/// Union of several strokes: all pieces concatenated in order, first
/// stroke's color. Returns `None` for an empty input.
#[must_use]
pub fn union_strokes(strokes: &[Stroke]) -> Option<Stroke> {
    let first = strokes.first()?;
    let mut result = Stroke::new(first.color);
    result
        .beziers
        .reserve(strokes.iter().map(Stroke::len).sum());
    for stroke in strokes {
        result.beziers.extend_from_slice(&stroke.beziers);
    }
    Some(result)
}

/// Conservative intersection of several strokes.
///
/// Pairwise over the list: pieces of the running result survive when
/// their bounding box overlaps the bounding box of some piece of the
/// next stroke. This is a bounding-box filter, not a geometric boolean
/// operation — it may keep pieces that only nearly intersect, never
/// drops pieces that do. Returns `None` for an empty input, and an
/// empty stroke when nothing overlaps.
#[must_use]
pub fn intersect_strokes(strokes: &[Stroke]) -> Option<Stroke> {
    let first = strokes.first()?;
    let mut result = first.clone();

    for other in &strokes[1..] {
        result = intersect_two(&result, other);
        if result.is_empty() {
            break;
        }
    }
    Some(result)
}

fn intersect_two(a: &Stroke, b: &Stroke) -> Stroke {
    let mut result = Stroke::new(a.color);

    // Whole-stroke reject first.
    if !bounding_box(a).overlaps(&bounding_box(b)) {
        return result;
    }
    let b_boxes: Vec<BoundingBox> = b.beziers.iter().map(Cubic::bbox).collect();

    for cubic in &a.beziers {
        let bb = cubic.bbox();
        if b_boxes.iter().any(|other| bb.overlaps(other)) {
            result.beziers.push(*cubic);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Draw `path` with `brush`, producing the full stroke outline.
///
/// Validates the brush, parks it on the origin, subdivides the path at
/// its tees, then convolves the path in both directions so that both
/// edges of the stroke are traced. The path is consumed (subdivision
/// mutates it); the brush keeps its initialized control points and can
/// be reused.
///
/// # Errors
///
/// Propagates [`BrushError`] from validation; nothing is emitted for an
/// invalid brush.
pub fn draw_shape(mut path: Ring, brush: &mut Ring, color: Color) -> Result<Stroke, BrushError> {
    brush_make(brush)?;

    // The convolver expects the pen centered on the origin.
    translate_to(brush, Point::ORIGIN);

    let mut stroke = Stroke::new(color);

    split_at_tees(&mut path, brush);
    let trace = convolve_all(&path, brush);
    show_segments(&trace, &mut stroke);

    let mut return_path = path.clone();
    return_path.reverse();
    let trace = convolve_all(&return_path, brush);
    show_segments(&trace, &mut stroke);

    Ok(stroke)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "exact float comparisons are intentional in tests"
)]
mod tests {
    use super::*;
    use crate::brush::unit_square;
    use crate::types::EPSILON;

    fn line_stroke() -> Stroke {
        let mut path = Ring::move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        draw_shape(path, &mut unit_square(), Color::BLACK).unwrap()
    }

    #[test]
    fn show_segments_groups_by_four() {
        let trace = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 1.0),
            Point::new(3.0, 1.0),
        ];
        let mut stroke = Stroke::new(Color::BLACK);
        show_segments(&trace, &mut stroke);

        assert_eq!(stroke.len(), 2);
        assert_eq!(stroke.beziers[0].start, Point::new(0.0, 0.0));
        assert_eq!(stroke.beziers[0].end, Point::new(3.0, 0.0));
        assert_eq!(stroke.beziers[1].c1, Point::new(1.0, 1.0));
    }

    #[test]
    fn straight_stroke_pieces_and_bounds() {
        let stroke = line_stroke();

        // Five pieces per sweep direction.
        assert_eq!(stroke.len(), 10);

        let bb = bounding_box(&stroke);
        assert!(bb.is_valid());
        assert!((bb.min_x + 0.5).abs() < EPSILON);
        assert!((bb.max_x - 10.5).abs() < EPSILON);
        assert!((bb.min_y + 0.5).abs() < EPSILON);
        assert!((bb.max_y - 0.5).abs() < EPSILON);
    }

    #[test]
    fn straight_stroke_covers_both_sides() {
        // Full-length side pieces (the caps' pen edges are short).
        let stroke = line_stroke();
        let lower = stroke
            .beziers
            .iter()
            .filter(|c| c.start.y == -0.5 && c.end.x - c.start.x == 10.0)
            .count();
        let upper = stroke
            .beziers
            .iter()
            .filter(|c| c.start.y == 0.5 && c.end.x - c.start.x == -10.0)
            .count();
        assert_eq!(lower, 2, "lower side pieces: {:?}", stroke.beziers);
        assert_eq!(upper, 2, "upper side pieces: {:?}", stroke.beziers);
    }

    #[test]
    fn right_angle_stroke_piece_count() {
        let mut path = Ring::move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(5.0, 0.0));
        path.line_to(Point::new(5.0, 5.0));
        let stroke = draw_shape(path, &mut unit_square(), Color::BLACK).unwrap();

        // Nine pieces forward, nine on the return sweep.
        assert_eq!(stroke.len(), 18);
    }

    #[test]
    fn invalid_brush_emits_nothing() {
        let mut path = Ring::move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));

        // Clockwise square: rejected before any geometry is produced.
        let mut brush = Ring::move_to(Point::new(0.5, 0.5));
        brush.line_to(Point::new(0.5, -0.5));
        brush.line_to(Point::new(-0.5, -0.5));
        brush.line_to(Point::new(-0.5, 0.5));
        brush.close();

        assert_eq!(
            draw_shape(path, &mut brush, Color::BLACK),
            Err(BrushError::NonLeftTurn)
        );
    }

    #[test]
    fn draw_shape_is_deterministic() {
        let a = line_stroke();
        let b = line_stroke();
        assert_eq!(a, b);
    }

    #[test]
    fn cubic_eval_endpoints_and_midpoint() {
        let c = Cubic {
            start: Point::new(0.0, 0.0),
            c1: Point::new(10.0 / 3.0, 0.0),
            c2: Point::new(20.0 / 3.0, 0.0),
            end: Point::new(10.0, 0.0),
        };
        assert!((c.eval(0.0) - c.start).hypot() < EPSILON);
        assert!((c.eval(1.0) - c.end).hypot() < EPSILON);
        assert!((c.eval(0.5).x - 5.0).abs() < EPSILON);
    }

    #[test]
    fn union_concatenates_in_order() {
        let a = line_stroke();
        let b = line_stroke();
        let u = union_strokes(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(u.len(), a.len() + b.len());
        assert_eq!(u.color, a.color);
        assert_eq!(&u.beziers[..a.len()], &a.beziers[..]);
        assert!(union_strokes(&[]).is_none());
    }

    #[test]
    fn intersection_of_disjoint_is_empty() {
        let a = line_stroke();

        let mut far_path = Ring::move_to(Point::new(100.0, 100.0));
        far_path.line_to(Point::new(110.0, 100.0));
        let b = draw_shape(far_path, &mut unit_square(), Color::WHITE).unwrap();

        let i = intersect_strokes(&[a, b]).unwrap();
        assert!(i.is_empty());
    }

    #[test]
    fn intersection_keeps_overlapping_pieces() {
        let a = line_stroke();

        // Crosses the first stroke near x = 5.
        let mut cross_path = Ring::move_to(Point::new(5.0, -5.0));
        cross_path.line_to(Point::new(5.0, 5.0));
        let b = draw_shape(cross_path, &mut unit_square(), Color::WHITE).unwrap();

        let i = intersect_strokes(&[a.clone(), b]).unwrap();
        assert!(!i.is_empty());
        assert!(i.len() < a.len(), "filter kept everything");
        assert_eq!(i.color, a.color);
    }

    #[test]
    fn self_intersection_is_identity() {
        let a = line_stroke();
        let i = intersect_strokes(std::slice::from_ref(&a)).unwrap();
        assert_eq!(i, a);
    }

    #[test]
    fn bbox_overlap_cases() {
        let mut a = BoundingBox::EMPTY;
        assert!(!a.is_valid());
        a.include(Point::new(0.0, 0.0));
        a.include(Point::new(2.0, 2.0));

        let mut b = BoundingBox::EMPTY;
        b.include(Point::new(2.0, 2.0));
        b.include(Point::new(3.0, 3.0));
        assert!(a.overlaps(&b)); // touching counts

        let mut c = BoundingBox::EMPTY;
        c.include(Point::new(5.0, 5.0));
        assert!(!a.overlaps(&c));
    }
}
