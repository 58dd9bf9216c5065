use crate::error::Result;
use crate::record::Image;
use crate::rule::{Rule, RuleContext, Settings};

/// Name template for copies; the image extension is appended.
const COPY_TEMPLATE: &str = "{NAME}-{####}.dup";

/// Copy the current file and carry on with the copy.
///
/// Later rules in the chain write to the duplicate, so the file the image was
/// staged from is never modified. Takes no settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Duplicate {
    settings: Settings,
}

impl Duplicate {
    pub const KIND: &'static str = "duplicate";

    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl Rule for Duplicate {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn process(&self, image: &mut Image, ctx: &mut RuleContext<'_>) -> Result<()> {
        let copy = ctx.names.image_name(COPY_TEMPLATE, image);
        ctx.fs.copy(&image.name, &copy)?;
        tracing::debug!(from = %image.name, to = %copy, "duplicated");
        image.name = copy;
        Ok(())
    }
}
