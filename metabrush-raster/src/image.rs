//! RGBA pixel buffer.

use metabrush_graphics::types::Color;

use crate::span::SpanList;

/// An RGBA8 image, row-major from the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Create an image initialized to transparent black.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, 4 per pixel.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Fill the whole image with one color.
    pub fn fill(&mut self, color: Color) {
        for pixel in self.data.chunks_exact_mut(4) {
            pixel[0] = color.r;
            pixel[1] = color.g;
            pixel[2] = color.b;
            pixel[3] = color.a;
        }
    }

    /// Set one pixel; coordinates outside the image are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(i) = self.index(x, y) else { return };
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
        self.data[i + 3] = color.a;
    }

    /// Read one pixel; transparent black outside the image.
    #[must_use]
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        match self.index(x, y) {
            Some(i) => Color::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]),
            None => Color::TRANSPARENT,
        }
    }

    /// Paint every span onto the image, clipped to the bounds.
    pub fn render_spans(&mut self, spans: &SpanList) {
        for span in &spans.spans {
            for x in span.x_start..=span.x_end {
                self.set_pixel(x, span.y, span.color);
            }
        }
    }

    #[expect(clippy::cast_sign_loss, reason = "negative coordinates are rejected first")]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
