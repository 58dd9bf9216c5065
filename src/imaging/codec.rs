//! Image codec capability trait and shared types.
//!
//! The [`ImageCodec`] trait defines the three pixel operations rules rely on:
//! decode a file into a buffer, encode a buffer back to a file, and resample
//! a source region into an output of exact size.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_codec::RustCodec), built on the `image` crate.
//! Rules only ever see `&dyn ImageCodec`, so tests swap in a recording mock.

use super::params::{Quality, Region};
use image::{DynamicImage, GenericImageView};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The mime type has no decoder/encoder compiled in.
    #[error("Unidentified Image File")]
    Unidentified { mime_type: String },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }
}

/// Trait for image codecs.
pub trait ImageCodec {
    /// Decode the file at `path` into a pixel buffer.
    fn decode(&self, path: &Path, mime_type: &str) -> Result<DynamicImage, CodecError>;

    /// Encode `image` to `path`, replacing any existing file.
    ///
    /// `quality` only applies to lossy formats.
    fn encode(
        &self,
        image: &DynamicImage,
        path: &Path,
        mime_type: &str,
        quality: Quality,
    ) -> Result<(), CodecError>;

    /// Sample `region` of `source` and scale it into exactly `width x height`.
    fn resample(
        &self,
        source: &DynamicImage,
        region: &Region,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, CodecError>;
}
