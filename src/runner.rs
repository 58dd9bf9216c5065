//! Runs chains against one staged image and names the result.
//!
//! ```text
//! init(dir)            bind the filesystem rooted at `dir`
//! write_as(template)   naming template (default "{NAME}")
//! process(file, q)     stage `file`, optional JPG quality override
//! run(chain)           rules in order → evaluate template → rename
//! ```
//!
//! After every chain the runner evaluates the naming template for the image
//! and renames the current file when the name changed. A later chain in the
//! same `run_all` call starts from the renamed file.
//!
//! Errors abort the run where they happen. Files already written or renamed
//! by earlier rules and chains stay as they are.

use crate::chain::Chain;
use crate::error::{ChainError, Result};
use crate::fs::{FileSystem, LocalFileSystem};
use crate::imaging::{ImageCodec, Quality, RustCodec};
use crate::naming::NameFormatter;
use crate::record::Image;
use crate::rule::RuleContext;
use std::path::Path;
use std::sync::Arc;

/// Template that keeps the source name.
pub const DEFAULT_TEMPLATE: &str = "{NAME}";

const NO_BASE_DIRECTORY: &str = "Base directory is required for the runner to work.";
const MISSING_BASE_DIRECTORY: &str = "Base directory does not exists";
const NO_IMAGE: &str = "Unable to run rules on chain. No image found";

pub struct ChainRunner {
    fs: Option<LocalFileSystem>,
    codec: Arc<dyn ImageCodec>,
    names: NameFormatter,
    template: String,
    jpg_quality: Quality,
    image: Option<Image>,
}

impl ChainRunner {
    /// Runner with no base directory yet; call [`init`](Self::init) first.
    pub fn new() -> Self {
        Self {
            fs: None,
            codec: Arc::new(RustCodec::new()),
            names: NameFormatter::new(),
            template: DEFAULT_TEMPLATE.to_string(),
            jpg_quality: Quality::default(),
            image: None,
        }
    }

    pub fn with_codec(mut self, codec: Arc<dyn ImageCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_names(mut self, names: NameFormatter) -> Self {
        self.names = names;
        self
    }

    /// Quality used when `process` is called without an override.
    pub fn with_jpg_quality(mut self, quality: Quality) -> Self {
        self.jpg_quality = quality;
        self
    }

    /// Bind the runner to `base_directory`.
    pub fn init(&mut self, base_directory: impl AsRef<Path>) -> Result<&mut Self> {
        let base = base_directory.as_ref();
        if base.as_os_str().is_empty() {
            return Err(ChainError::configuration(NO_BASE_DIRECTORY));
        }
        if !base.exists() {
            return Err(ChainError::configuration(MISSING_BASE_DIRECTORY));
        }
        self.fs = Some(LocalFileSystem::new(base)?);
        tracing::debug!(base = %base.display(), "runner initialised");
        Ok(self)
    }

    pub fn write_as(&mut self, template: impl Into<String>) -> &mut Self {
        self.template = template.into();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn base_directory(&self) -> Option<&Path> {
        self.fs.as_ref().map(|fs| fs.root())
    }

    /// Stage `file_name` (relative to the base directory) for the next run.
    ///
    /// `jpg_quality` of `0` keeps the runner's quality. Anything else must be
    /// within 1-100 and becomes the runner's quality for this and every later
    /// image.
    #[tracing::instrument(skip(self))]
    pub fn process(&mut self, file_name: &str, jpg_quality: u32) -> Result<&mut Self> {
        if jpg_quality != 0 {
            self.jpg_quality = Quality::try_new(jpg_quality)?;
        }
        let quality = self.jpg_quality;
        let fs = self
            .fs
            .as_ref()
            .ok_or_else(|| ChainError::state(NO_BASE_DIRECTORY))?;

        let mut image = Image::new(fs.root(), file_name);
        image.mime_type = fs.mime_type(file_name)?;
        image.jpg_quality = quality;
        tracing::debug!(mime_type = %image.mime_type, quality = quality.value(), "image staged");

        self.image = Some(image);
        Ok(self)
    }

    /// Run a single chain. See [`run_all`](Self::run_all).
    pub fn run(&mut self, chain: &Chain) -> Result<&Image> {
        self.run_all([chain])
    }

    /// Run `chains` in order against the staged image.
    #[tracing::instrument(skip_all)]
    pub fn run_all<'c>(&mut self, chains: impl IntoIterator<Item = &'c Chain>) -> Result<&Image> {
        let fs = self
            .fs
            .as_ref()
            .ok_or_else(|| ChainError::state(NO_BASE_DIRECTORY))?;
        let image = self
            .image
            .as_mut()
            .ok_or_else(|| ChainError::state(NO_IMAGE))?;

        for chain in chains {
            let mut ctx = RuleContext {
                fs,
                codec: &*self.codec,
                names: &mut self.names,
            };
            chain.process(image, &mut ctx)?;

            let new_name = self.names.image_name(&self.template, image);
            if new_name != image.name {
                fs.rename(&image.name, &new_name)?;
                tracing::info!(from = %image.name, to = %new_name, "renamed");
            }
            image.name = new_name;
        }

        Ok(image)
    }

    /// The staged image, if any.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }
}

impl Default for ChainRunner {
    fn default() -> Self {
        Self::new()
    }
}
