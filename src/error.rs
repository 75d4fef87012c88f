//! Error types for memocache
//!
//! All modules use `CacheResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// All errors that can occur while loading or persisting a cache entry
#[derive(Error, Debug)]
pub enum CacheError {
    // Storage failures
    #[error("Failed to create cache folder {path}: {source}")]
    FolderCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid unique ID {id:?}: must not contain a path separator")]
    InvalidId { id: String },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode cache entry {id:?}: {reason}")]
    Encode { id: String, reason: String },

    // Corruption: the entry file exists but cannot be decoded. Never
    // downgraded to a cache miss.
    #[error("Corrupt cache entry at {path}: {reason}")]
    CorruptEntry { path: PathBuf, reason: String },

    // Generation failures propagate the generator's own error verbatim
    #[error("Generator failed for cache entry {id:?}")]
    Generation {
        id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Wrap a generator failure for the given entry ID
    pub fn generation(
        id: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Generation {
            id: id.into(),
            source,
        }
    }

    /// Whether this error indicates a damaged entry file rather than a
    /// storage or generation problem
    pub fn is_corrupt_entry(&self) -> bool {
        matches!(self, Self::CorruptEntry { .. })
    }

    /// Whether this error originated in the caller's generator
    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation { .. })
    }
}
