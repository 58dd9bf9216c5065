//! Filesystem capability rooted at a base directory.
//!
//! Rules and the runner address files by name relative to the root; nothing
//! outside the root is reachable through this interface. [`LocalFileSystem`]
//! is the production implementation over `std::fs`.
//!
//! `copy` and `rename` never overwrite: if the destination already exists the
//! call fails with [`FsError::AlreadyExists`] and the source is left alone.

use crate::imaging::formats;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File not found at path: {}", .0.display())]
    NotFound(PathBuf),
    #[error("File already exists at path: {}", .0.display())]
    AlreadyExists(PathBuf),
}

pub trait FileSystem {
    /// Directory every relative path is resolved against.
    fn root(&self) -> &Path;

    /// Absolute location of `path` under the root.
    fn resolve(&self, path: &str) -> PathBuf {
        self.root().join(path)
    }

    fn exists(&self, path: &str) -> bool;

    fn read(&self, path: &str) -> Result<Vec<u8>, FsError>;

    fn copy(&self, from: &str, to: &str) -> Result<(), FsError>;

    fn rename(&self, from: &str, to: &str) -> Result<(), FsError>;

    /// Mime type of the file, detected from content, then extension.
    fn mime_type(&self, path: &str) -> Result<String, FsError>;
}

/// [`FileSystem`] over the local disk.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, FsError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(FsError::NotFound(root));
        }
        Ok(Self { root })
    }

    fn existing(&self, path: &str) -> Result<PathBuf, FsError> {
        let full = self.resolve(path);
        if !full.exists() {
            return Err(FsError::NotFound(full));
        }
        Ok(full)
    }

    fn absent(&self, path: &str) -> Result<PathBuf, FsError> {
        let full = self.resolve(path);
        if full.exists() {
            return Err(FsError::AlreadyExists(full));
        }
        Ok(full)
    }
}

impl FileSystem for LocalFileSystem {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, FsError> {
        let full = self.existing(path)?;
        Ok(std::fs::read(full)?)
    }

    fn copy(&self, from: &str, to: &str) -> Result<(), FsError> {
        let source = self.existing(from)?;
        let target = self.absent(to)?;
        std::fs::copy(source, target)?;
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), FsError> {
        let source = self.existing(from)?;
        let target = self.absent(to)?;
        std::fs::rename(source, target)?;
        Ok(())
    }

    fn mime_type(&self, path: &str) -> Result<String, FsError> {
        let bytes = self.read(path)?;
        let sniffed = image::guess_format(&bytes)
            .ok()
            .and_then(formats::mime_for_format);
        let by_extension = || {
            Path::new(path)
                .extension()
                .and_then(|e| e.to_str())
                .and_then(formats::mime_for_extension)
        };
        Ok(sniffed
            .or_else(by_extension)
            .unwrap_or(formats::OCTET_STREAM)
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_jpeg, create_test_png};
    use tempfile::TempDir;

    fn setup() -> (TempDir, LocalFileSystem) {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFileSystem::new(tmp.path()).unwrap();
        (tmp, fs)
    }

    #[test]
    fn missing_root_is_rejected() {
        let result = LocalFileSystem::new("/nonexistent/shackles-root");
        assert!(matches!(result, Err(FsError::NotFound(_))));
    }

    #[test]
    fn resolve_joins_root() {
        let (tmp, fs) = setup();
        assert_eq!(fs.resolve("a.jpg"), tmp.path().join("a.jpg"));
    }

    #[test]
    fn copy_keeps_source() {
        let (tmp, fs) = setup();
        std::fs::write(tmp.path().join("a.txt"), "hello").unwrap();

        fs.copy("a.txt", "b.txt").unwrap();

        assert!(fs.exists("a.txt"));
        assert_eq!(fs.read("b.txt").unwrap(), b"hello");
    }

    #[test]
    fn rename_moves_file() {
        let (tmp, fs) = setup();
        std::fs::write(tmp.path().join("a.txt"), "hello").unwrap();

        fs.rename("a.txt", "b.txt").unwrap();

        assert!(!fs.exists("a.txt"));
        assert!(fs.exists("b.txt"));
    }

    #[test]
    fn rename_refuses_to_overwrite() {
        let (tmp, fs) = setup();
        std::fs::write(tmp.path().join("a.txt"), "a").unwrap();
        std::fs::write(tmp.path().join("b.txt"), "b").unwrap();

        let result = fs.rename("a.txt", "b.txt");

        assert!(matches!(result, Err(FsError::AlreadyExists(_))));
        assert_eq!(fs.read("b.txt").unwrap(), b"b");
        assert!(fs.exists("a.txt"));
    }

    #[test]
    fn copy_missing_source_errors() {
        let (_tmp, fs) = setup();
        assert!(matches!(
            fs.copy("missing.jpg", "copy.jpg"),
            Err(FsError::NotFound(_))
        ));
    }

    #[test]
    fn mime_type_sniffs_content() {
        let (tmp, fs) = setup();
        // PNG bytes behind a .jpg extension: content wins
        create_test_png(&tmp.path().join("actually-png.jpg"), 8, 8);
        create_test_jpeg(&tmp.path().join("photo.jpg"), 8, 8);

        assert_eq!(fs.mime_type("actually-png.jpg").unwrap(), "image/png");
        assert_eq!(fs.mime_type("photo.jpg").unwrap(), "image/jpeg");
    }

    #[test]
    fn mime_type_falls_back_to_extension_then_octet_stream() {
        let (tmp, fs) = setup();
        std::fs::write(tmp.path().join("empty.gif"), b"").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), b"plain text").unwrap();

        assert_eq!(fs.mime_type("empty.gif").unwrap(), "image/gif");
        assert_eq!(
            fs.mime_type("notes.txt").unwrap(),
            "application/octet-stream"
        );
    }
}
