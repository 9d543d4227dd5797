//! Stroke rasterization.
//!
//! Each cubic piece of a stroke is sampled at a fixed number of steps
//! and the sample polyline is walked with Bresenham's algorithm, one
//! single-pixel span per visited cell. Overlapping spans are merged at
//! the end. The fixed step count keeps output deterministic across
//! strokes of any size; resolution scales coordinates to pixels.

use metabrush_graphics::stroke::{Cubic, Stroke};
use metabrush_graphics::types::{Color, Scalar};

use crate::error::RasterError;
use crate::span::{Span, SpanList};

/// Samples per cubic piece.
const STEPS: u32 = 100;

/// Rasterize a stroke's outline into spans at `resolution` pixels per
/// coordinate unit.
///
/// # Errors
///
/// [`RasterError::InvalidResolution`] if `resolution` is not positive.
pub fn rasterize(stroke: &Stroke, resolution: Scalar) -> Result<SpanList, RasterError> {
    if resolution <= 0.0 {
        return Err(RasterError::InvalidResolution);
    }

    let mut spans = SpanList::new();
    for cubic in &stroke.beziers {
        rasterize_cubic(cubic, stroke.color, resolution, &mut spans);
    }
    spans.merge();
    Ok(spans)
}

fn rasterize_cubic(cubic: &Cubic, color: Color, resolution: Scalar, spans: &mut SpanList) {
    let mut prev = cubic.eval(0.0);

    for i in 1..=STEPS {
        let t = f64::from(i) / f64::from(STEPS);
        let curr = cubic.eval(t);

        let (x0, y0) = to_pixel(prev.x * resolution, prev.y * resolution);
        let (x1, y1) = to_pixel(curr.x * resolution, curr.y * resolution);
        bresenham(x0, y0, x1, y1, color, spans);

        prev = curr;
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "pixel coordinates of practical images fit i32"
)]
fn to_pixel(x: Scalar, y: Scalar) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

/// Walk the line cell by cell, emitting a single-pixel span for each.
fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32, color: Color, spans: &mut SpanList) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let (mut x, mut y) = (x0, y0);
    loop {
        spans.push(Span {
            x_start: x,
            x_end: x,
            y,
            color,
        });
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
