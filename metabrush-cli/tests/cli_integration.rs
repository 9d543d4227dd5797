use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path = std::env::temp_dir().join(format!(
            "metabrush_cli_{tag}_{}_{ts}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_metabrush(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_metabrush"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run metabrush")
}

#[test]
fn no_args_prints_usage() {
    let dir = TestDir::new("usage");
    let output = run_metabrush(&[], &dir.path);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"), "missing usage text: {stderr}");
}

#[test]
fn unknown_scenario_fails() {
    let dir = TestDir::new("unknown");
    let output = run_metabrush(&["frobnicate"], &dir.path);
    assert!(!output.status.success());
}

#[test]
fn sharp_scenario_writes_png() {
    let dir = TestDir::new("sharp_png");
    let output = run_metabrush(&["sharp", "-o", "out"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");

    let png_path = dir.path.join("out/sharp.png");
    assert!(png_path.is_file(), "expected output at {png_path:?}");
    let bytes = fs::read(&png_path).expect("read png output");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn boolean_scenario_writes_bmp() {
    let dir = TestDir::new("boolean_bmp");
    let output = run_metabrush(&["boolean", "-o", "out", "-f", "bmp"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");

    let bytes = fs::read(dir.path.join("out/boolean.bmp")).expect("read bmp output");
    assert_eq!(&bytes[..2], b"BM");
}

#[test]
fn letter_scenario_writes_svg() {
    let dir = TestDir::new("letter_svg");
    let output = run_metabrush(&["letter", "-o", "out", "-f", "svg"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");

    let svg = fs::read_to_string(dir.path.join("out/letter.svg")).expect("read svg output");
    assert!(svg.contains("<svg"), "expected svg root element");
    assert!(svg.contains("<path"), "expected rendered path element");
    assert!(svg.contains("#0000ff"), "expected blue fill");
}

#[test]
fn all_scenarios_write_ppm() {
    let dir = TestDir::new("all_ppm");
    let output = run_metabrush(&["all", "-o", "out", "-f", "ppm"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");

    for name in ["sharp", "letter", "transform", "boolean"] {
        let path = dir.path.join(format!("out/{name}.ppm"));
        let text = fs::read_to_string(&path).expect("read ppm output");
        assert!(text.starts_with("P3\n"), "bad ppm header in {path:?}");
    }
}
