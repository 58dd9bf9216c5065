//! The image record a run carries through its chains.
//!
//! An [`Image`] is a handle on one file under the runner's base directory
//! plus what the pipeline knows about it. Rules receive it by `&mut` and may
//! change any public field: `duplicate` points `name` at a copy, the runner
//! points it at the renamed output after each chain. `source_name` is fixed
//! when the image is staged and is what naming templates see as `NAME`.

use crate::imaging::Quality;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Current file name, relative to `directory`.
    pub name: String,
    /// Extension of the staged file, without the dot. May be empty.
    pub extension: String,
    pub mime_type: String,
    /// Directory the file lives in.
    pub directory: PathBuf,
    pub jpg_quality: Quality,
    source_name: String,
}

impl Image {
    /// Stage `name` inside `directory`.
    ///
    /// The extension is taken from the name; the mime type starts empty and
    /// is filled in by whoever can inspect the file.
    pub fn new(directory: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let name = name.into();
        let extension = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        Self {
            source_name: name.clone(),
            name,
            extension,
            mime_type: String::new(),
            directory: directory.into(),
            jpg_quality: Quality::default(),
        }
    }

    /// File name the image was staged with.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Source name without its extension, e.g. `5639` for `5639.jpg`.
    pub fn source_stem(&self) -> &str {
        Path::new(&self.source_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.source_name)
    }

    /// Location of the current file: directory joined with the current name.
    pub fn full_path(&self) -> PathBuf {
        self.directory.join(&self.name)
    }

    /// Append this image's extension to a generated base name.
    pub fn with_extension(&self, base: &str) -> String {
        if self.extension.is_empty() {
            base.to_string()
        } else {
            format!("{}.{}", base, self.extension)
        }
    }
}
