use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("source is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk source directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("file too large: {} is {size} bytes (limit {limit})", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[cfg(feature = "pdf")]
    #[error("PDF extraction failed for {}: {message}", .path.display())]
    Pdf { path: PathBuf, message: String },

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl LoaderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
