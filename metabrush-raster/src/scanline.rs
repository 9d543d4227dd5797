//! Even-odd scanline polygon fill.

use metabrush_graphics::types::{Color, Point};

use crate::image::Image;

/// Fill a closed polygon into `image` using the even-odd rule.
///
/// For every scanline, the crossings with the polygon edges are
/// collected, sorted, and the pixels between successive pairs painted.
/// Vertices are handled by the half-open rule (an edge covers
/// `[min_y, max_y)`), so shared corners are not counted twice.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "crossing coordinates are clamped to the image, which fits i32"
)]
pub fn fill_polygon(points: &[Point], image: &mut Image, fill: Color) {
    if points.len() < 3 {
        return;
    }

    let mut crossings: Vec<f64> = Vec::new();

    for y in 0..image.height() {
        let scan = f64::from(y);
        crossings.clear();

        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];

            if (a.y <= scan && b.y > scan) || (b.y <= scan && a.y > scan) {
                let t = (scan - a.y) / (b.y - a.y);
                crossings.push(t.mul_add(b.x - a.x, a.x));
            }
        }
        crossings.sort_unstable_by(f64::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let x0 = pair[0].ceil() as i32;
            let x1 = pair[1].floor() as i32;
            for x in x0..=x1 {
                image.set_pixel(x, y as i32, fill);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
