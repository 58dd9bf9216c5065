//! Crop geometry: derive the source region to sample for a target size.
//!
//! A crop is described by its final output size. The ratio
//! `final_height / final_width` drives everything else:
//!
//! ```text
//! ratio        = final_height / final_width
//! orientation  = landscape if 100 > 100 * ratio, else portrait
//! ```
//!
//! ## Auto box
//!
//! Without an explicit box width, the box covers 95% of the source. The
//! height-first pass always runs; landscape targets then recompute from the
//! width side and replace it:
//!
//! ```text
//! height-first:  w = ceil(src_w * 0.95)   h = ceil(src_w * ratio)
//!                if h > src_h:  h = ceil(src_h * 0.95), w = ceil(h / ratio)
//! landscape:     w = ceil(src_h / ratio)  h = ceil(src_h * 0.95)
//!                if w > src_w:  w = ceil(src_w * 0.95), h = ceil(w * ratio)
//! ```
//!
//! The box is then centered on the source. Offsets are not clamped here: a
//! box bigger than the source produces negative offsets, and the codec clips
//! the region when it samples (see [`Region::clip_to`]).
//!
//! ## Explicit box
//!
//! `crop-box-width` fixes the box width and derives the height from the
//! ratio. The box sits at the explicit `(x, y)` when both are given and is
//! centered otherwise.
//!
//! All functions here are pure and testable without any I/O or images.

use super::codec::Dimensions;
use super::params::Region;
use thiserror::Error;

/// Fraction of the source covered by an automatically derived box.
pub const COVERAGE: f64 = 0.95;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid crop dimensions")]
pub struct InvalidDimensionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Final output size of a crop, with its ratio multiplier precomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropTarget {
    width: u32,
    height: u32,
    ratio: f64,
}

/// Caller-supplied box: a width and an optional top-left anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub width: f64,
    pub anchor: Option<(f64, f64)>,
}

impl CropTarget {
    pub fn new(width: u32, height: u32) -> Result<Self, InvalidDimensionError> {
        if width == 0 || height == 0 {
            return Err(InvalidDimensionError);
        }
        Ok(Self {
            width,
            height,
            ratio: height as f64 / width as f64,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Height per unit of width.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn orientation(&self) -> Orientation {
        let unit_width = 100.0;
        let unit_height = unit_width * self.ratio;
        if unit_width > unit_height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Box size derived from the source when no explicit box is given.
    pub fn auto_box(&self, source: Dimensions) -> (f64, f64) {
        let src_w = source.width as f64;
        let src_h = source.height as f64;
        let ratio = self.ratio;

        let mut width = (src_w * COVERAGE).ceil();
        let mut height = (src_w * ratio).ceil();
        if height > src_h {
            height = (src_h * COVERAGE).ceil();
            width = (height / ratio).ceil();
        }

        if self.orientation() == Orientation::Landscape {
            width = (src_h / ratio).ceil();
            height = (src_h * COVERAGE).ceil();
            if width > src_w {
                width = (src_w * COVERAGE).ceil();
                height = (width * ratio).ceil();
            }
        }

        (width, height)
    }

    /// Region of the source to sample for this target.
    pub fn plan(&self, source: Dimensions, crop_box: Option<CropBox>) -> Region {
        let Some(crop_box) = crop_box else {
            let (width, height) = self.auto_box(source);
            let (x, y) = centered(source, width, height);
            return Region {
                x,
                y,
                width,
                height,
            };
        };

        let width = crop_box.width;
        let height = width * self.ratio;
        let (x, y) = crop_box
            .anchor
            .unwrap_or_else(|| centered(source, width, height));
        Region {
            x,
            y,
            width,
            height,
        }
    }
}

/// Top-left corner that centers a `width x height` box on the source.
fn centered(source: Dimensions, width: f64, height: f64) -> (f64, f64) {
    (
        source.width as f64 / 2.0 - width / 2.0,
        source.height as f64 / 2.0 - height / 2.0,
    )
}
