use crate::error::{ChainError, Result};
use crate::imaging::{CropBox, CropTarget, Dimensions};
use crate::record::Image;
use crate::rule::{Rule, RuleContext, Settings};

/// Crop to an exact output size.
///
/// | key | meaning |
/// |---|---|
/// | `width`, `height` | final output size, both required and positive |
/// | `crop-box-width` | width of the source box; height follows the output ratio |
/// | `x`, `y` | top-left of the source box; both needed, else the box is centered |
///
/// Without `crop-box-width` the box is derived from the source, see
/// [`CropTarget::auto_box`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Crop {
    settings: Settings,
}

impl Crop {
    pub const KIND: &'static str = "crop";

    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Positive dimension setting, or `0` when absent or not positive.
    fn dimension(&self, key: &str) -> u32 {
        self.settings
            .get_f64(key)
            .filter(|v| v.is_finite() && *v > 0.0)
            .map_or(0, |v| v.round() as u32)
    }

    /// Explicit source box, if `crop-box-width` is set. A value that is set
    /// but not a positive number is an error, not a fallback to auto crop.
    fn crop_box(&self) -> Result<Option<CropBox>> {
        if !self.settings.has("crop-box-width") {
            return Ok(None);
        }
        let width = self
            .settings
            .get_f64("crop-box-width")
            .filter(|w| w.is_finite() && *w > 0.0)
            .ok_or_else(|| ChainError::validation("Crop box width must be a positive number"))?;
        let anchor = self
            .settings
            .get_f64("x")
            .zip(self.settings.get_f64("y"));
        Ok(Some(CropBox { width, anchor }))
    }
}

impl Rule for Crop {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn process(&self, image: &mut Image, ctx: &mut RuleContext<'_>) -> Result<()> {
        let target = CropTarget::new(self.dimension("width"), self.dimension("height"))?;
        let crop_box = self.crop_box()?;

        let path = image.full_path();
        let source = ctx.codec.decode(&path, &image.mime_type)?;
        let region = target.plan(Dimensions::of(&source), crop_box);
        tracing::debug!(
            x = region.x,
            y = region.y,
            width = region.width,
            height = region.height,
            "crop region"
        );

        let cropped = ctx
            .codec
            .resample(&source, &region, target.width(), target.height())?;
        ctx.codec
            .encode(&cropped, &path, &image.mime_type, image.jpg_quality)?;
        Ok(())
    }
}
