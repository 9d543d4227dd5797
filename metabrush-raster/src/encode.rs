//! Image file writers: PNG, BMP and PPM.
//!
//! PNG goes through the `png` crate (RGBA8, no interlacing). BMP is
//! written by hand as a classic 54-byte-header, 24-bit bottom-up file;
//! PPM as ASCII `P3`. Alpha is dropped by the latter two.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::RasterError;
use crate::image::Image;

/// Write the image as an RGBA PNG.
///
/// # Errors
///
/// I/O and encoder failures are returned as [`RasterError`].
pub fn write_png(image: &Image, path: &Path) -> Result<(), RasterError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(image.data())?;
    Ok(())
}

/// Write the image as a 24-bit uncompressed BMP.
///
/// Rows are stored bottom-up in BGR order, padded to four bytes.
///
/// # Errors
///
/// I/O failures are returned as [`RasterError`].
pub fn write_bmp(image: &Image, path: &Path) -> Result<(), RasterError> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let row_size = (width * 3).div_ceil(4) * 4;
    let image_size = row_size * height;
    let file_size = 54 + image_size;

    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    // File header: signature, size, reserved, pixel data offset.
    out.write_all(b"BM")?;
    out.write_all(&u32_le(file_size))?;
    out.write_all(&[0; 4])?;
    out.write_all(&u32_le(54))?;

    // DIB header (BITMAPINFOHEADER).
    out.write_all(&u32_le(40))?;
    out.write_all(&u32_le(width))?;
    out.write_all(&u32_le(height))?;
    out.write_all(&[1, 0])?; // planes
    out.write_all(&[24, 0])?; // bits per pixel
    out.write_all(&u32_le(0))?; // compression
    out.write_all(&u32_le(image_size))?;
    out.write_all(&[0; 16])?; // resolution and palette fields

    let data = image.data();
    let mut row = vec![0u8; row_size];
    for y in (0..height).rev() {
        row.fill(0);
        for x in 0..width {
            let src = (y * width + x) * 4;
            let dst = x * 3;
            row[dst] = data[src + 2];
            row[dst + 1] = data[src + 1];
            row[dst + 2] = data[src];
        }
        out.write_all(&row)?;
    }
    out.flush()?;
    Ok(())
}

/// Write the image as an ASCII `P3` PPM, one row per line.
///
/// # Errors
///
/// I/O failures are returned as [`RasterError`].
pub fn write_ppm(image: &Image, path: &Path) -> Result<(), RasterError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width(), image.height())?;
    writeln!(out, "255")?;

    let width = image.width() as usize;
    for row in image.data().chunks_exact(width * 4) {
        let mut line = String::with_capacity(width * 12);
        for pixel in row.chunks_exact(4) {
            line.push_str(&format!("{} {} {} ", pixel[0], pixel[1], pixel[2]));
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    out.flush()?;
    Ok(())
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "file sizes of practical images fit u32; BMP cannot hold more anyway"
)]
fn u32_le(v: usize) -> [u8; 4] {
    (v as u32).to_le_bytes()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
