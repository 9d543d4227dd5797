//! `Metabrush` CLI — draw demo scenarios and write image files.

use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use metabrush_graphics::brush::unit_square;
use metabrush_graphics::ring::Ring;
use metabrush_graphics::stroke::{
    bounding_box, draw_shape, intersect_strokes, union_strokes, Stroke,
};
use metabrush_graphics::transform::{rotate, scale, shear, translate_to, Axis};
use metabrush_graphics::types::{Color, Point, Vec2};
use metabrush_raster::encode::{write_bmp, write_png, write_ppm};
use metabrush_raster::image::Image;
use metabrush_raster::raster::rasterize;

const SCENARIOS: &[&str] = &["sharp", "letter", "transform", "boolean"];

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: metabrush <scenario|all> [--output <dir>] [--format png|bmp|ppm|svg]");
        eprintln!("Scenarios: {}", SCENARIOS.join(", "));
        process::exit(1);
    }

    let config = parse_args(&args);
    let scenarios: Vec<&str> = if config.scenario == "all" {
        SCENARIOS.to_vec()
    } else if SCENARIOS.contains(&config.scenario.as_str()) {
        vec![config.scenario.as_str()]
    } else {
        eprintln!("Unknown scenario: {}", config.scenario);
        process::exit(1);
    };

    for name in scenarios {
        if let Err(e) = run_scenario(name, &config) {
            eprintln!("Error in scenario {name}: {e}");
            process::exit(1);
        }
    }
}

struct Config {
    scenario: String,
    output_dir: PathBuf,
    format: String,
}

fn parse_args(args: &[String]) -> Config {
    let mut output_dir = PathBuf::from(".");
    let mut format = String::from("png");
    let scenario = args[1].clone();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_dir = PathBuf::from(&args[i]);
                }
            }
            "--format" | "-f" => {
                i += 1;
                if i < args.len() {
                    format.clone_from(&args[i]);
                }
            }
            other => {
                eprintln!("Ignoring unknown argument: {other}");
            }
        }
        i += 1;
    }

    Config {
        scenario,
        output_dir,
        format,
    }
}

fn run_scenario(name: &str, config: &Config) -> Result<(), Box<dyn Error>> {
    let strokes = match name {
        "sharp" => sharp(),
        "letter" => letter(),
        "transform" => transformed(),
        "boolean" => boolean(),
        other => return Err(format!("unknown scenario: {other}").into()),
    }?;

    fs::create_dir_all(&config.output_dir)?;
    let out = config
        .output_dir
        .join(format!("{name}.{}", config.format));
    write_strokes(&strokes, &out, &config.format)?;
    println!("Wrote {}", out.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Scenarios (sized in image pixels; resolution 1)
// ---------------------------------------------------------------------------

type Strokes = Result<Vec<Stroke>, Box<dyn Error>>;

/// A polyline with a sharp 90° corner.
fn sharp() -> Strokes {
    let mut path = Ring::move_to(Point::new(20.0, 20.0));
    path.line_to(Point::new(70.0, 20.0));
    path.r_line_to(Vec2::new(0.0, 50.0));

    let mut pen = unit_square();
    scale(&mut pen, 8.0, Axis::Both);

    Ok(vec![draw_shape(path, &mut pen, Color::BLACK)?])
}

/// A blue letter L from two perpendicular strokes.
fn letter() -> Strokes {
    let blue = Color::new(0, 0, 255, 255);

    let mut upright = Ring::move_to(Point::new(25.0, 75.0));
    upright.line_to(Point::new(25.0, 20.0));
    let mut pen = unit_square();
    scale(&mut pen, 10.0, Axis::Both);
    let vertical = draw_shape(upright, &mut pen, blue)?;

    let mut foot = Ring::move_to(Point::new(25.0, 20.0));
    foot.line_to(Point::new(65.0, 20.0));
    let mut pen = unit_square();
    scale(&mut pen, 10.0, Axis::Both);
    let horizontal = draw_shape(foot, &mut pen, blue)?;

    let combined = union_strokes(&[vertical, horizontal]).ok_or("empty union")?;
    Ok(vec![combined])
}

/// A curved path drawn with a rotated, sheared pen.
fn transformed() -> Strokes {
    let mut path = Ring::move_to(Point::new(15.0, 30.0));
    path.curve_to(
        Point::new(35.0, 80.0),
        Point::new(60.0, -10.0),
        Point::new(80.0, 50.0),
    );

    let mut pen = unit_square();
    scale(&mut pen, 12.0, Axis::X);
    scale(&mut pen, 4.0, Axis::Y);
    rotate(&mut pen, 30.0);
    shear(&mut pen, 0.3, Axis::X);
    translate_to(&mut pen, Point::ORIGIN);

    Ok(vec![draw_shape(path, &mut pen, Color::new(200, 30, 30, 255))?])
}

/// Union and conservative intersection of two crossing bars.
fn boolean() -> Strokes {
    let mut across = Ring::move_to(Point::new(15.0, 45.0));
    across.line_to(Point::new(80.0, 45.0));
    let mut pen = unit_square();
    scale(&mut pen, 10.0, Axis::Both);
    let horizontal = draw_shape(across, &mut pen, Color::new(0, 128, 0, 255))?;

    let mut down = Ring::move_to(Point::new(45.0, 15.0));
    down.line_to(Point::new(45.0, 80.0));
    let mut pen = unit_square();
    scale(&mut pen, 10.0, Axis::Both);
    let vertical = draw_shape(down, &mut pen, Color::new(128, 0, 128, 255))?;

    let blended = horizontal.color.mix(vertical.color, 0.5);
    let both = [horizontal, vertical];
    let union = union_strokes(&both).ok_or("empty union")?;
    let mut crossing = intersect_strokes(&both).ok_or("empty intersection")?;
    crossing.color = blended;

    Ok(vec![union, crossing])
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn write_strokes(strokes: &[Stroke], out: &Path, format: &str) -> Result<(), Box<dyn Error>> {
    if format == "svg" {
        fs::write(out, metabrush_svg::render_to_string(strokes))?;
        return Ok(());
    }

    let image = render_to_image(strokes);
    match format {
        "png" => write_png(&image, out)?,
        "bmp" => write_bmp(&image, out)?,
        "ppm" => write_ppm(&image, out)?,
        other => return Err(format!("unknown format: {other}").into()),
    }
    Ok(())
}

/// Rasterize all strokes onto one image sized to fit them.
fn render_to_image(strokes: &[Stroke]) -> Image {
    let mut width: u32 = 100;
    let mut height: u32 = 100;
    for stroke in strokes {
        let bb = bounding_box(stroke);
        if bb.is_valid() {
            width = width.max(ceil_u32(bb.max_x) + 10);
            height = height.max(ceil_u32(bb.max_y) + 10);
        }
    }

    let mut image = Image::new(width, height);
    image.fill(Color::WHITE);
    for stroke in strokes {
        match rasterize(stroke, 1.0) {
            Ok(spans) => image.render_spans(&spans),
            Err(e) => eprintln!("rasterization failed: {e}"),
        }
    }
    image
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "scenario geometry is small and positive"
)]
fn ceil_u32(v: f64) -> u32 {
    v.max(0.0).ceil() as u32
}
