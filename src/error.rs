use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a discovery run. None are retried or downgraded to a skip.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Unable to process directory at {}.", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read license file at {path}.")]
    UnreadableLicenseFile {
        /// Path relative to the scanned directory.
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read Swift Package file at {}: {reason}", path.display())]
    UnreadableLockfile { path: PathBuf, reason: String },

    #[error("Unable to locate the package cache directory; pass --spmcache to set it.")]
    CacheLocationUnavailable,
}

/// Fieldless discriminant of [`DiscoveryError`], for callers that branch on
/// the failure without inspecting paths or messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DirectoryUnavailable,
    UnreadableLicenseFile,
    UnreadableLockfile,
    CacheLocationUnavailable,
}

impl DiscoveryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DiscoveryError::DirectoryUnavailable { .. } => ErrorKind::DirectoryUnavailable,
            DiscoveryError::UnreadableLicenseFile { .. } => ErrorKind::UnreadableLicenseFile,
            DiscoveryError::UnreadableLockfile { .. } => ErrorKind::UnreadableLockfile,
            DiscoveryError::CacheLocationUnavailable => ErrorKind::CacheLocationUnavailable,
        }
    }
}
