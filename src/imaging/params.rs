//! Parameter types for image operations.
//!
//! These structs describe *what* the codec should do, not *how*. Rules and the
//! crop solver produce them; the [`codec`](super::codec) consumes them.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 60).
//! - [`Region`]: A source rectangle to sample, in source pixel space. Values
//!   are `f64` and may be fractional or lie partly outside the source.

use crate::error::{ChainError, Result};

/// Quality setting for lossy JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 100;

    /// Build a quality value, clamping into range.
    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Build a quality value, rejecting anything outside 1-100.
    pub fn try_new(value: u32) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ChainError::validation(
                "Invalid JPG output quality set. Values should be from 1 - 100",
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(60)
    }
}

/// Source-space rectangle to sample and rescale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    /// Whole-image region for a source of the given size.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f64,
            height: height as f64,
        }
    }

    /// Snap to whole pixels and clip against a `width x height` source.
    ///
    /// The result always has at least one pixel in each direction, so the
    /// codec can sample it even when the requested box lies entirely outside.
    pub fn clip_to(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let max_x = width.saturating_sub(1) as f64;
        let max_y = height.saturating_sub(1) as f64;
        let x = self.x.round().clamp(0.0, max_x) as u32;
        let y = self.y.round().clamp(0.0, max_y) as u32;
        let w = (self.width.round().max(1.0) as u32).min(width - x);
        let h = (self.height.round().max(1.0) as u32).min(height - y);
        (x, y, w.max(1), h.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_60() {
        assert_eq!(Quality::default().value(), 60);
    }

    #[test]
    fn quality_try_new_rejects_out_of_range() {
        assert!(Quality::try_new(0).is_err());
        assert!(Quality::try_new(101).is_err());
        let err = Quality::try_new(150).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid JPG output quality set. Values should be from 1 - 100"
        );
        assert_eq!(Quality::try_new(100).unwrap().value(), 100);
        assert_eq!(Quality::try_new(1).unwrap().value(), 1);
    }

    #[test]
    fn region_inside_source_is_unchanged() {
        let region = Region {
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 50.0,
        };
        assert_eq!(region.clip_to(640, 480), (10, 20, 100, 50));
    }

    #[test]
    fn region_rounds_fractional_offsets() {
        let region = Region {
            x: 25.5,
            y: 140.4,
            width: 973.0,
            height: 487.0,
        };
        assert_eq!(region.clip_to(1024, 768), (26, 140, 973, 487));
    }

    #[test]
    fn region_larger_than_source_is_clipped() {
        // Negative offsets come from centering a box wider than the source
        let region = Region {
            x: -50.0,
            y: -10.0,
            width: 740.0,
            height: 500.0,
        };
        assert_eq!(region.clip_to(640, 480), (0, 0, 640, 480));
    }

    #[test]
    fn region_outside_source_keeps_one_pixel() {
        let region = Region {
            x: 900.0,
            y: 900.0,
            width: 10.0,
            height: 10.0,
        };
        assert_eq!(region.clip_to(640, 480), (639, 479, 1, 1));
    }

    #[test]
    fn full_region_covers_source() {
        assert_eq!(Region::full(64, 48).clip_to(64, 48), (0, 0, 64, 48));
    }
}
