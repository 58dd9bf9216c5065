use crate::error::{ChainError, Result};
use crate::imaging::{Dimensions, Region, calculate_resize_dimensions};
use crate::record::Image;
use crate::rule::{Rule, RuleContext, Settings};

/// Aspect-preserving resize to a target width.
///
/// `width` is required. `max-height` bounds portrait images by height
/// instead; see [`calculate_resize_dimensions`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resize {
    settings: Settings,
}

impl Resize {
    pub const KIND: &'static str = "resize";

    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    fn width(&self) -> Result<u32> {
        if !self.settings.has("width") {
            return Err(ChainError::validation("Resize rule needs a width to work"));
        }
        self.settings
            .get_f64("width")
            .filter(|w| w.is_finite() && *w >= 1.0)
            .map(|w| w.round() as u32)
            .ok_or_else(|| ChainError::validation("Resize width must be a positive number"))
    }

    fn max_height(&self) -> u32 {
        self.settings
            .get_f64("max-height")
            .filter(|h| h.is_finite() && *h > 0.0)
            .map_or(0, |h| h.round() as u32)
    }
}

impl Rule for Resize {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn process(&self, image: &mut Image, ctx: &mut RuleContext<'_>) -> Result<()> {
        let width = self.width()?;

        let path = image.full_path();
        let source = ctx.codec.decode(&path, &image.mime_type)?;
        let Dimensions {
            width: src_w,
            height: src_h,
        } = Dimensions::of(&source);
        let (out_w, out_h) = calculate_resize_dimensions((src_w, src_h), width, self.max_height());
        tracing::debug!(src_w, src_h, out_w, out_h, "resize");

        let resized = ctx
            .codec
            .resample(&source, &Region::full(src_w, src_h), out_w, out_h)?;
        ctx.codec
            .encode(&resized, &path, &image.mime_type, image.jpg_quality)?;
        Ok(())
    }
}
