//! SVG renderer for `Metabrush` strokes.
//!
//! Converts stroke outlines into an SVG [`Document`] using the `svg`
//! crate. Key design points:
//!
//! - Stroke coordinates have Y pointing **up**; SVG has Y pointing
//!   **down**. All Y coordinates are negated at render time so no
//!   global transform is needed.
//! - A stroke's cubic pieces already bound the inked region, so each
//!   stroke becomes one *filled* `<path>` (nonzero rule), not an SVG
//!   stroked center-line. Consecutive pieces that share an endpoint are
//!   chained into a single `M … C …` run.
//! - Path data is built as raw `d` strings to keep `f64` precision.

use metabrush_graphics::stroke::{bounding_box, BoundingBox, Stroke};
use metabrush_graphics::types::{Color, Point, Scalar};
use svg::node::element::Path as SvgPath;
use svg::Document;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Options controlling SVG output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Extra margin around the bounding box. Default: 1.0.
    pub margin: Scalar,
    /// Number of decimal places for coordinates. Default: 4.
    pub precision: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 1.0,
            precision: 4,
        }
    }
}

/// Render strokes to an SVG [`Document`] with default options.
#[must_use]
pub fn render(strokes: &[Stroke]) -> Document {
    render_with_options(strokes, &RenderOptions::default())
}

/// Render strokes to an SVG string.
#[must_use]
pub fn render_to_string(strokes: &[Stroke]) -> String {
    render(strokes).to_string()
}

/// Render strokes to an SVG [`Document`].
///
/// The `viewBox` is derived from the union of the strokes' bounding
/// boxes plus the margin; strokes render in order, one `<path>` each.
#[must_use]
pub fn render_with_options(strokes: &[Stroke], opts: &RenderOptions) -> Document {
    let mut bb = BoundingBox::EMPTY;
    for stroke in strokes {
        let sb = bounding_box(stroke);
        if sb.is_valid() {
            bb.include(Point::new(sb.min_x, sb.min_y));
            bb.include(Point::new(sb.max_x, sb.max_y));
        }
    }

    let mut doc = document_with_viewbox(&bb, opts);
    for stroke in strokes {
        if !stroke.is_empty() {
            doc = doc.add(render_stroke(stroke, opts));
        }
    }
    doc
}

// ---------------------------------------------------------------------------
// Stroke → <path>
// ---------------------------------------------------------------------------

fn render_stroke(stroke: &Stroke, opts: &RenderOptions) -> SvgPath {
    SvgPath::new()
        .set("d", stroke_to_d(stroke, opts.precision))
        .set("fill", color_to_svg(stroke.color))
        .set("fill-rule", "nonzero")
        .set("stroke", "none")
}

/// Build the `d` attribute for a stroke.
///
/// Pieces whose start coincides with the previous end continue the
/// current subpath; others begin a new `M` run. Y is negated.
fn stroke_to_d(stroke: &Stroke, precision: usize) -> String {
    let mut d = String::with_capacity(stroke.len() * 60);
    let mut cursor = None;

    for cubic in &stroke.beziers {
        if cursor != Some(cubic.start) {
            d.push('M');
            write_point(&mut d, cubic.start.x, -cubic.start.y, precision);
        }
        d.push('C');
        write_point(&mut d, cubic.c1.x, -cubic.c1.y, precision);
        d.push(' ');
        write_point(&mut d, cubic.c2.x, -cubic.c2.y, precision);
        d.push(' ');
        write_point(&mut d, cubic.end.x, -cubic.end.y, precision);
        cursor = Some(cubic.end);
    }
    d
}

/// Write "x,y" with the given precision, normalizing negative zero.
fn write_point(d: &mut String, x: Scalar, y: Scalar, precision: usize) {
    use std::fmt::Write;
    let x = if x == 0.0 { 0.0 } else { x };
    let y = if y == 0.0 { 0.0 } else { y };
    let _ = write!(d, "{x:.precision$},{y:.precision$}");
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn color_to_svg(c: Color) -> String {
    if c.r == 0 && c.g == 0 && c.b == 0 {
        "black".to_owned()
    } else if c.r == 255 && c.g == 255 && c.b == 255 {
        "white".to_owned()
    } else {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    }
}

fn document_with_viewbox(bb: &BoundingBox, opts: &RenderOptions) -> Document {
    let m = opts.margin;

    let (vb_x, vb_y, vb_w, vb_h) = if bb.is_valid() {
        (
            bb.min_x - m,
            -bb.max_y - m, // stroke max_y → SVG min_y (negated)
            2.0f64.mul_add(m, bb.max_x - bb.min_x),
            2.0f64.mul_add(m, bb.max_y - bb.min_y),
        )
    } else {
        (0.0, 0.0, 100.0, 100.0)
    };

    Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set(
            "viewBox",
            format!(
                "{} {} {} {}",
                fmt_scalar(vb_x, opts.precision),
                fmt_scalar(vb_y, opts.precision),
                fmt_scalar(vb_w, opts.precision),
                fmt_scalar(vb_h, opts.precision),
            ),
        )
        .set("width", format!("{}pt", fmt_scalar(vb_w, opts.precision)))
        .set("height", format!("{}pt", fmt_scalar(vb_h, opts.precision)))
}

/// Format a scalar to the given precision, stripping trailing zeros.
fn fmt_scalar(v: Scalar, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        s
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
