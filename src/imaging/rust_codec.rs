//! Pure Rust codec built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, WebP) | `image::ImageReader` with the format forced from the mime type |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with the image's quality |
//! | Encode → PNG, GIF, WebP | `DynamicImage::save_with_format` (lossless) |
//! | Resample | `crop_imm` + `resize_exact` with the `Lanczos3` filter |

use super::codec::{CodecError, ImageCodec};
use super::formats;
use super::params::{Quality, Region};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::path::Path;

/// Codec backed by the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn format_for(mime_type: &str) -> Result<ImageFormat, CodecError> {
    formats::format_for_mime(mime_type).ok_or_else(|| CodecError::Unidentified {
        mime_type: mime_type.to_string(),
    })
}

/// Encode as JPEG. The encoder has no alpha channel, so flatten to RGB first.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), CodecError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality.value() as u8);
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| CodecError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}

impl ImageCodec for RustCodec {
    fn decode(&self, path: &Path, mime_type: &str) -> Result<DynamicImage, CodecError> {
        let format = format_for(mime_type)?;
        let mut reader = ImageReader::open(path)?;
        reader.set_format(format);
        reader.decode().map_err(|e| {
            CodecError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
    }

    fn encode(
        &self,
        image: &DynamicImage,
        path: &Path,
        mime_type: &str,
        quality: Quality,
    ) -> Result<(), CodecError> {
        match format_for(mime_type)? {
            ImageFormat::Jpeg => save_jpeg(image, path, quality),
            format => image.save_with_format(path, format).map_err(|e| {
                CodecError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
            }),
        }
    }

    fn resample(
        &self,
        source: &DynamicImage,
        region: &Region,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, CodecError> {
        let (src_w, src_h) = source.dimensions();
        if width == 0 || height == 0 || src_w == 0 || src_h == 0 {
            return Err(CodecError::ProcessingFailed(format!(
                "Cannot resample {}x{} into {}x{}",
                src_w, src_h, width, height
            )));
        }
        let (x, y, w, h) = region.clip_to(src_w, src_h);
        let sampled = source.crop_imm(x, y, w, h);
        Ok(sampled.resize_exact(width, height, FilterType::Lanczos3))
    }
}
