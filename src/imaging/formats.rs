//! Mime types the pipeline understands and their `image` crate formats.

use image::ImageFormat;
use std::path::Path;

pub const JPEG: &str = "image/jpeg";
pub const PNG: &str = "image/png";
pub const GIF: &str = "image/gif";
pub const WEBP: &str = "image/webp";
/// Reported for files whose content and extension are both unrecognised.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Formats with a decoder and encoder compiled in, keyed by extension.
const CANDIDATES: &[(&str, ImageFormat, &str)] = &[
    ("jpg", ImageFormat::Jpeg, JPEG),
    ("jpeg", ImageFormat::Jpeg, JPEG),
    ("png", ImageFormat::Png, PNG),
    ("gif", ImageFormat::Gif, GIF),
    ("webp", ImageFormat::WebP, WEBP),
];

/// Image file extensions the codec can read and write.
pub fn supported_extensions() -> impl Iterator<Item = &'static str> {
    CANDIDATES.iter().map(|(ext, _, _)| *ext)
}

pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| supported_extensions().any(|s| s.eq_ignore_ascii_case(e)))
}

pub fn format_for_mime(mime_type: &str) -> Option<ImageFormat> {
    CANDIDATES
        .iter()
        .find(|(_, _, mime)| *mime == mime_type)
        .map(|(_, format, _)| *format)
}

pub fn mime_for_format(format: ImageFormat) -> Option<&'static str> {
    CANDIDATES
        .iter()
        .find(|(_, f, _)| *f == format)
        .map(|(_, _, mime)| *mime)
}

pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    CANDIDATES
        .iter()
        .find(|(e, _, _)| e.eq_ignore_ascii_case(ext))
        .map(|(_, _, mime)| *mime)
}
