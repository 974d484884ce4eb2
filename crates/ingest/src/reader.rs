use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::LoaderError;

/// Default maximum file size: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

#[cfg(feature = "pdf")]
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown", "pdf"];
#[cfg(not(feature = "pdf"))]
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Markdown,
    #[cfg(feature = "pdf")]
    Pdf,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = extension_of(path);
        match ext.as_str() {
            "txt" | "text" => Some(Self::PlainText),
            "md" | "markdown" => Some(Self::Markdown),
            #[cfg(feature = "pdf")]
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Markdown => "text/markdown",
            #[cfg(feature = "pdf")]
            Self::Pdf => "application/pdf",
        }
    }
}

/// Lower-cased file extension, empty when there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Supported files found under a directory, in path order.
#[derive(Debug, Default)]
pub struct DirectoryListing {
    pub files: Vec<PathBuf>,
    pub unsupported: usize,
}

pub struct FileReader {
    max_file_size: u64,
}

impl Default for FileReader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}

impl FileReader {
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Read a file and return its raw extracted text.
    pub async fn read_file(&self, path: &Path) -> Result<String, LoaderError> {
        let format = DocumentFormat::from_path(path)
            .ok_or_else(|| LoaderError::UnsupportedFormat(extension_of(path)))?;

        let meta = fs::metadata(path)
            .await
            .map_err(|e| LoaderError::io(path, e))?;
        if meta.len() > self.max_file_size {
            return Err(LoaderError::FileTooLarge {
                path: path.to_path_buf(),
                size: meta.len(),
                limit: self.max_file_size,
            });
        }

        match format {
            DocumentFormat::PlainText | DocumentFormat::Markdown => {
                let bytes = fs::read(path)
                    .await
                    .map_err(|e| LoaderError::io(path, e))?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            #[cfg(feature = "pdf")]
            DocumentFormat::Pdf => {
                let path_buf = path.to_path_buf();
                tokio::task::spawn_blocking(move || {
                    pdf_extract::extract_text(&path_buf).map_err(|e| LoaderError::Pdf {
                        path: path_buf.clone(),
                        message: e.to_string(),
                    })
                })
                .await?
            }
        }
    }

    /// List supported files under `dir`. Hidden entries are ignored and
    /// symlinks are followed, so a linked exam counts like a regular file.
    pub fn list_directory(&self, dir: &Path, recursive: bool) -> Result<DirectoryListing, LoaderError> {
        let mut listing = DirectoryListing::default();
        let max_depth = if recursive { usize::MAX } else { 1 };

        let walker = WalkDir::new(dir)
            .max_depth(max_depth)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if DocumentFormat::from_path(entry.path()).is_some() {
                listing.files.push(entry.into_path());
            } else {
                debug!(path = %entry.path().display(), "Skipping unsupported file");
                listing.unsupported += 1;
            }
        }

        Ok(listing)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
