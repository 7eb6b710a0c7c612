//! Error type for sitemap builds.
//!
//! Filesystem failures are not split further (disk full, permission denied,
//! etc.): every one of them is an `Io` error carrying the path it hit.

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, SitemapError>;

#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// Builder configuration rejected before any file is touched.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A record or document could not be represented as sitemap XML.
    #[error("cannot serialize {}: {reason}", path.display())]
    Serialization { path: PathBuf, reason: String },

    /// Create/write/read/rename/delete failed.
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SitemapError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        SitemapError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn serialization(path: &Path, reason: impl Into<String>) -> Self {
        SitemapError::Serialization {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// True for errors raised by `Builder::new`.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SitemapError::InvalidConfiguration(_))
    }
}
