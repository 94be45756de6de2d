//! Error taxonomy for the bundling pipeline.
//!
//! Every variant is fatal: the run stops and no document is written.
//! Non-UTF-8 files are not errors, see [`crate::gather::Gathered::Skipped`].

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// The target resolves to a location outside the repository root.
    #[error("Target {target:?} escapes repository root")]
    PathEscape { target: String },

    /// The target exists inside the root but is not a direct child of it.
    #[error("Target {target:?} must live in repository root")]
    InvalidTarget { target: String },

    #[error("Target {target:?} does not exist")]
    TargetNotFound { target: String },

    /// Neither a regular file nor a directory (fifo, socket, dangling link...).
    #[error("Unsupported path type: {}", path.display())]
    UnsupportedPathType { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),
}

impl BundleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BundleError::Io {
            path: path.into(),
            source,
        }
    }
}
