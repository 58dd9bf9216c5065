//! End-to-end runs against real files with the `image`-crate codec.
//!
//! Each test stages synthetic images in a temp directory, runs a chain, and
//! inspects what ended up on disk.

use image::GenericImageView;
use regex::Regex;
use shackles::config::RunnerConfig;
use shackles::rules::{Crop, Duplicate, Grayscale, Resize};
use shackles::{Chain, ChainBuilder, ChainError, ChainRunner, Settings};
use std::path::Path;
use tempfile::TempDir;

fn create_jpeg(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    });
    img.save_with_format(path, image::ImageFormat::Jpeg).unwrap();
}

fn dimensions(path: &Path) -> (u32, u32) {
    image::open(path).unwrap().dimensions()
}

/// Runner on a fresh directory holding `5639.jpg` at the given size.
fn staged(width: u32, height: u32, template: &str) -> (TempDir, ChainRunner) {
    let tmp = TempDir::new().unwrap();
    create_jpeg(&tmp.path().join("5639.jpg"), width, height);
    let mut runner = ChainRunner::new();
    runner
        .init(tmp.path())
        .unwrap()
        .write_as(template)
        .process("5639.jpg", 90)
        .unwrap();
    (tmp, runner)
}

// =========================================================================
// Crop
// =========================================================================

#[test]
fn crop_auto_box_yields_exact_size() {
    let (tmp, mut runner) = staged(1024, 768, "{NAME}");
    let chain = Chain::new().then(Crop::new(
        Settings::new().with("width", 200).with("height", 100),
    ));

    runner.run(&chain).unwrap();

    assert_eq!(dimensions(&tmp.path().join("5639.jpg")), (200, 100));
}

#[test]
fn crop_portrait_source_yields_exact_size() {
    let (tmp, mut runner) = staged(480, 800, "{NAME}");
    let chain = Chain::new().then(Crop::new(
        Settings::new().with("width", 200).with("height", 100),
    ));

    runner.run(&chain).unwrap();

    assert_eq!(dimensions(&tmp.path().join("5639.jpg")), (200, 100));
}

#[test]
fn crop_with_explicit_box() {
    let (tmp, mut runner) = staged(1024, 768, "{NAME}");
    let chain = Chain::new().then(Crop::new(
        Settings::new()
            .with("width", 500)
            .with("height", 250)
            .with("crop-box-width", 640)
            .with("x", 0)
            .with("y", 0),
    ));

    runner.run(&chain).unwrap();

    assert_eq!(dimensions(&tmp.path().join("5639.jpg")), (500, 250));
}

#[test]
fn crop_zero_height_is_rejected_before_touching_the_file() {
    let (tmp, mut runner) = staged(64, 48, "{NAME}");
    let before = std::fs::read(tmp.path().join("5639.jpg")).unwrap();
    let chain = Chain::new().then(Crop::new(
        Settings::new().with("width", 200).with("height", 0),
    ));

    let err = runner.run(&chain).map(|_| ()).unwrap_err();

    assert!(matches!(err, ChainError::InvalidDimensions(_)));
    assert_eq!(err.to_string(), "Invalid crop dimensions");
    assert_eq!(std::fs::read(tmp.path().join("5639.jpg")).unwrap(), before);
}

// =========================================================================
// Resize
// =========================================================================

#[test]
fn resize_keeps_aspect_ratio() {
    let (tmp, mut runner) = staged(600, 400, "{NAME}");
    let chain = Chain::new().then(Resize::new(Settings::new().with("width", 300)));

    runner.run(&chain).unwrap();

    assert_eq!(dimensions(&tmp.path().join("5639.jpg")), (300, 200));
}

#[test]
fn resize_portrait_bounded_by_max_height() {
    let (tmp, mut runner) = staged(400, 800, "{NAME}");
    let chain = Chain::new().then(Resize::new(
        Settings::new().with("width", 300).with("max-height", 200),
    ));

    runner.run(&chain).unwrap();

    assert_eq!(dimensions(&tmp.path().join("5639.jpg")), (100, 200));
}

// =========================================================================
// Grayscale + naming
// =========================================================================

#[test]
fn grayscale_then_rename() {
    let (tmp, mut runner) = staged(64, 48, "gs-{NAME}");
    let chain = Chain::new().then(Grayscale::default());

    let name = runner.run(&chain).unwrap().name.clone();

    assert_eq!(name, "gs-5639.jpg");
    assert!(!tmp.path().join("5639.jpg").exists());
    let img = image::open(tmp.path().join("gs-5639.jpg")).unwrap().to_rgb8();
    for image::Rgb([r, g, b]) in img.pixels() {
        // JPEG chroma noise keeps channels within a few levels of each other
        assert!(r.abs_diff(*g) <= 4 && g.abs_diff(*b) <= 4, "{r} {g} {b}");
    }
}

#[test]
fn png_stays_png() {
    let tmp = TempDir::new().unwrap();
    let source = image::RgbaImage::from_fn(32, 16, |x, _| image::Rgba([x as u8 * 8, 0, 0, 128]));
    source
        .save_with_format(tmp.path().join("logo.png"), image::ImageFormat::Png)
        .unwrap();

    let mut runner = ChainRunner::new();
    runner
        .init(tmp.path())
        .unwrap()
        .process("logo.png", 0)
        .unwrap()
        .run(&Chain::new().then(Grayscale::default()))
        .unwrap();

    let bytes = std::fs::read(tmp.path().join("logo.png")).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0[3], 128);
}

// =========================================================================
// Builder-driven runs
// =========================================================================

#[test]
fn document_run_with_default_format() {
    let tmp = TempDir::new().unwrap();
    create_jpeg(&tmp.path().join("5639.jpg"), 1024, 768);
    let builder = ChainBuilder::new();
    let chain = builder
        .convert(
            r#"[
                {"rule": "duplicate", "settings": []},
                {"rule": "crop", "settings": {"width": 200, "height": 100}}
            ]"#,
        )
        .unwrap();

    let mut runner = builder
        .new_runner(&RunnerConfig::with_source(tmp.path()))
        .unwrap();
    let name = runner
        .process("5639.jpg", 0)
        .unwrap()
        .run(&chain)
        .unwrap()
        .name
        .clone();

    let pattern = Regex::new(r"^5639-[A-Z0-9]{4}-x\.jpg$").unwrap();
    assert!(pattern.is_match(&name), "got {name}");
    assert_eq!(dimensions(&tmp.path().join(&name)), (200, 100));
    // duplicate left the source alone
    assert_eq!(dimensions(&tmp.path().join("5639.jpg")), (1024, 768));

    let leftovers: Vec<String> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.contains(".dup"))
        .collect();
    assert!(leftovers.is_empty(), "copy was renamed away: {leftovers:?}");
}

#[test]
fn runner_reused_across_files() {
    let tmp = TempDir::new().unwrap();
    create_jpeg(&tmp.path().join("a.jpg"), 300, 200);
    create_jpeg(&tmp.path().join("b.jpg"), 200, 300);
    let chain = Chain::new().then(Resize::new(Settings::new().with("width", 100)));

    let mut runner = ChainRunner::new();
    runner.init(tmp.path()).unwrap().write_as("small-{NAME}");
    for file in ["a.jpg", "b.jpg"] {
        runner.process(file, 0).unwrap().run(&chain).unwrap();
    }

    assert_eq!(dimensions(&tmp.path().join("small-a.jpg")), (100, 67));
    assert_eq!(dimensions(&tmp.path().join("small-b.jpg")), (100, 150));
}

#[test]
fn non_image_file_is_unidentified() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("notes.txt"), "not an image").unwrap();

    let mut runner = ChainRunner::new();
    runner.init(tmp.path()).unwrap().process("notes.txt", 0).unwrap();
    assert_eq!(runner.image().unwrap().mime_type, "application/octet-stream");

    let err = runner
        .run(&Chain::new().then(Grayscale::default()))
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(err, ChainError::Codec(_)));
    assert_eq!(err.to_string(), "Unidentified Image File");
}

#[test]
fn duplicate_only_chain_keeps_both_files() {
    let (tmp, mut runner) = staged(40, 30, "{NAME}-copy");
    let name = runner
        .run(&Chain::new().then(Duplicate::default()))
        .unwrap()
        .name
        .clone();

    assert_eq!(name, "5639-copy.jpg");
    assert!(tmp.path().join("5639.jpg").exists());
    assert_eq!(dimensions(&tmp.path().join("5639-copy.jpg")), (40, 30));
}
