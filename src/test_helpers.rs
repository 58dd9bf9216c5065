//! Shared test utilities for the shackles test suite.
//!
//! Synthetic image writers plus a [`RuleHarness`] that wires a rule to a
//! temp-dir filesystem and a [`MockCodec`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut harness = RuleHarness::new(MockCodec::with_source(1024, 768));
//! harness.apply(&Crop::new(settings)).unwrap();
//! assert_eq!(harness.codec.resamples().len(), 1);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::chain::Chain;
use crate::error::Result;
use crate::fs::LocalFileSystem;
use crate::imaging::codec::tests::MockCodec;
use crate::imaging::formats;
use crate::naming::NameFormatter;
use crate::record::Image;
use crate::rule::{Rule, RuleContext};

// =========================================================================
// Synthetic images
// =========================================================================

/// Write a gradient JPEG of the given size.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let mut writer = std::io::BufWriter::new(file);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, 90);
    img.write_with_encoder(encoder).unwrap();
}

/// Write a gradient PNG of the given size.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 64, 255])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Temp directory holding one JPEG per `(name, width, height)` entry.
pub fn fixture_dir(files: &[(&str, u32, u32)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, width, height) in files {
        create_test_jpeg(&tmp.path().join(name), *width, *height);
    }
    tmp
}

// =========================================================================
// Rule harness
// =========================================================================

/// Everything a rule needs, rooted in a fresh temp directory.
///
/// The staged image is `5639.jpg` with mime `image/jpeg`. The file itself is
/// not created: mock-codec tests never read it. Call
/// [`write_source`](Self::write_source) for rules that touch the disk.
pub struct RuleHarness {
    pub tmp: TempDir,
    pub fs: LocalFileSystem,
    pub codec: MockCodec,
    pub names: NameFormatter,
    pub image: Image,
}

impl RuleHarness {
    pub fn new(codec: MockCodec) -> Self {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFileSystem::new(tmp.path()).unwrap();
        let mut image = Image::new(tmp.path(), "5639.jpg");
        image.mime_type = formats::JPEG.to_string();
        Self {
            tmp,
            fs,
            codec,
            names: NameFormatter::seeded(5639),
            image,
        }
    }

    /// Write raw bytes to the staged image's current path.
    pub fn write_source(&self, bytes: &[u8]) {
        std::fs::write(self.image.full_path(), bytes).unwrap();
    }

    pub fn apply(&mut self, rule: &dyn Rule) -> Result<()> {
        let mut ctx = RuleContext {
            fs: &self.fs,
            codec: &self.codec,
            names: &mut self.names,
        };
        rule.process(&mut self.image, &mut ctx)
    }

    pub fn run_chain(&mut self, chain: &Chain) -> Result<()> {
        let mut ctx = RuleContext {
            fs: &self.fs,
            codec: &self.codec,
            names: &mut self.names,
        };
        chain.process(&mut self.image, &mut ctx)
    }
}
