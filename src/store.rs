//! Durable storage for cache entries
//!
//! One file per `(folder, unique_id)` pair. Every overwrite goes through a
//! temporary file in the target folder followed by an atomic rename, so a
//! reader never observes a partially written entry and a failed write
//! leaves the previous entry untouched.

use crate::codec::{Codec, JsonCodec};
use crate::error::{CacheError, CacheResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A stored `(state, object)` pair as read back from disk
#[derive(Debug, Deserialize)]
pub struct Entry<S, T> {
    /// The input that produced `object`
    pub state: S,

    /// The computed result
    pub object: T,

    /// When the entry was last written
    pub written_at: DateTime<Utc>,
}

/// Write-side view of an entry. Field names must match [`Entry`] so the
/// record round-trips through the codec.
#[derive(Serialize)]
struct EntryRecord<'a, S, T> {
    state: &'a S,
    object: &'a T,
    written_at: DateTime<Utc>,
}

/// Filesystem-backed store, one entry file per unique ID
#[derive(Debug)]
pub struct Store<C = JsonCodec> {
    folder: PathBuf,
    codec: C,
}

impl Store<JsonCodec> {
    /// Create a store rooted at `folder` using the default JSON codec
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self::with_codec(folder, JsonCodec)
    }
}

impl<C: Codec> Store<C> {
    /// Create a store rooted at `folder` with a custom codec
    pub fn with_codec(folder: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            folder: folder.into(),
            codec,
        }
    }

    /// The folder this store persists into
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Derived entry file path for a unique ID
    ///
    /// IDs containing a path separator would escape the folder namespace,
    /// so they are rejected. The empty ID is legal; its file name is just
    /// the codec extension.
    pub fn entry_path(&self, unique_id: &str) -> CacheResult<PathBuf> {
        if unique_id.contains(['/', '\\']) {
            return Err(CacheError::InvalidId {
                id: unique_id.to_string(),
            });
        }
        Ok(self
            .folder
            .join(format!("{}.{}", unique_id, self.codec.extension())))
    }

    /// Create the store folder (and parents) if absent; idempotent
    pub fn ensure_folder(&self) -> CacheResult<()> {
        std::fs::create_dir_all(&self.folder).map_err(|e| CacheError::FolderCreate {
            path: self.folder.clone(),
            source: e,
        })
    }

    /// Read the entry for `unique_id`, or `None` if no file exists
    ///
    /// A file that exists but fails to decode is a corrupt entry, not a
    /// miss; masking it would hide storage damage behind a regeneration.
    pub fn read<S, T>(&self, unique_id: &str) -> CacheResult<Option<Entry<S, T>>>
    where
        S: DeserializeOwned,
        T: DeserializeOwned,
    {
        let path = self.entry_path(unique_id)?;
        if !path.exists() {
            debug!("No cache entry at {}", path.display());
            return Ok(None);
        }

        let bytes = std::fs::read(&path)
            .map_err(|e| CacheError::io(format!("reading cache entry {}", path.display()), e))?;

        let entry = self
            .codec
            .decode(&bytes)
            .map_err(|e| CacheError::CorruptEntry {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        debug!("Read cache entry {}", path.display());
        Ok(Some(entry))
    }

    /// Persist `(state, object)` for `unique_id`, replacing any previous
    /// entry atomically
    pub fn write<S, T>(&self, unique_id: &str, state: &S, object: &T) -> CacheResult<()>
    where
        S: Serialize,
        T: Serialize,
    {
        let path = self.entry_path(unique_id)?;
        self.ensure_folder()?;

        let record = EntryRecord {
            state,
            object,
            written_at: Utc::now(),
        };
        let bytes = self.codec.encode(&record).map_err(|e| CacheError::Encode {
            id: unique_id.to_string(),
            reason: e.to_string(),
        })?;

        // Staged in the target folder so the rename never crosses
        // filesystems. Dropped (and removed) if the rename doesn't happen.
        let mut tmp = NamedTempFile::new_in(&self.folder).map_err(|e| {
            CacheError::io(
                format!("creating temporary file in {}", self.folder.display()),
                e,
            )
        })?;
        tmp.write_all(&bytes)
            .map_err(|e| CacheError::io("writing temporary cache entry", e))?;
        tmp.flush()
            .map_err(|e| CacheError::io("flushing temporary cache entry", e))?;
        tmp.persist(&path).map_err(|e| {
            CacheError::io(format!("replacing cache entry {}", path.display()), e.error)
        })?;

        debug!("Wrote cache entry {}", path.display());
        Ok(())
    }
}
