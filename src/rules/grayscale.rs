use crate::error::Result;
use crate::record::Image;
use crate::rule::{Rule, RuleContext, Settings};
use image::{DynamicImage, Rgba};

/// Replace every pixel with the mean of its colour channels.
///
/// Alpha is kept. Takes no settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grayscale {
    settings: Settings,
}

impl Grayscale {
    pub const KIND: &'static str = "grayscale";

    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

/// Channel mean, rounded to nearest. A third never lands on .5.
fn mean(Rgba([r, g, b, a]): Rgba<u8>) -> Rgba<u8> {
    let v = ((r as u16 + g as u16 + b as u16 + 1) / 3) as u8;
    Rgba([v, v, v, a])
}

pub fn desaturate(image: &DynamicImage) -> DynamicImage {
    let mut buffer = image.to_rgba8();
    for pixel in buffer.pixels_mut() {
        *pixel = mean(*pixel);
    }
    DynamicImage::ImageRgba8(buffer)
}

impl Rule for Grayscale {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn process(&self, image: &mut Image, ctx: &mut RuleContext<'_>) -> Result<()> {
        let path = image.full_path();
        let source = ctx.codec.decode(&path, &image.mime_type)?;
        ctx.codec
            .encode(&desaturate(&source), &path, &image.mime_type, image.jpg_quality)?;
        Ok(())
    }
}
