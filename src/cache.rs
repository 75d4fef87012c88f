//! The load routine: cache lookup, validity check, regeneration
//!
//! Each call re-reads the entry from disk, asks the reload logic whether
//! the generator must run, and on regeneration persists the new
//! `(state, object)` pair before returning. Nothing is cached in memory,
//! so external changes to the folder between calls are observed.

use crate::codec::{Codec, JsonCodec};
use crate::error::{CacheError, CacheResult};
use crate::reload::{decide, state_changed, Decision};
use crate::store::Store;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Error type a generator may surface
pub type GenerateError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a load call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult<T> {
    /// The object to use, either stored or freshly generated
    pub object: T,

    /// True iff the generator ran during this call
    pub generated: bool,

    /// True iff regeneration was triggered by the reload predicate
    /// detecting a difference (never on first creation or forced update)
    pub state_change: bool,
}

/// Persistent memoization cache rooted at one folder
///
/// Entries under different folders are fully independent namespaces; two
/// caches never share any resource.
#[derive(Debug)]
pub struct Cache<C = JsonCodec> {
    store: Store<C>,
}

impl Cache<JsonCodec> {
    /// Create a cache rooted at `folder` using the default JSON codec.
    /// The folder is created on first write, not here.
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            store: Store::new(folder),
        }
    }
}

impl<C: Codec> Cache<C> {
    /// Create a cache with a custom entry codec
    pub fn with_codec(folder: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            store: Store::with_codec(folder, codec),
        }
    }

    /// The underlying entry store
    pub fn store(&self) -> &Store<C> {
        &self.store
    }

    /// Load the object for `unique_id`, regenerating when the state
    /// differs from the one stored alongside the previous result
    pub fn load<S, T, G>(&self, state: S, unique_id: &str, generate: G) -> CacheResult<LoadResult<T>>
    where
        S: Serialize + DeserializeOwned + PartialEq,
        T: Serialize + DeserializeOwned,
        G: FnOnce(&S) -> Result<T, GenerateError>,
    {
        self.load_with(state, unique_id, generate, state_changed, false)
    }

    /// Load with a caller-supplied reload predicate and force flag
    ///
    /// The predicate receives `(previous_state, new_state)` and returns
    /// true to demand regeneration. `force_update` bypasses the predicate
    /// entirely and always regenerates.
    pub fn load_with<S, T, G, R>(
        &self,
        state: S,
        unique_id: &str,
        generate: G,
        reload: R,
        force_update: bool,
    ) -> CacheResult<LoadResult<T>>
    where
        S: Serialize + DeserializeOwned,
        T: Serialize + DeserializeOwned,
        G: FnOnce(&S) -> Result<T, GenerateError>,
        R: FnOnce(&S, &S) -> bool,
    {
        let previous = self.store.read::<S, T>(unique_id)?;
        let decision = decide(
            previous.as_ref().map(|e| &e.state),
            &state,
            reload,
            force_update,
        );
        debug!("Decision for {:?}: {:?}", unique_id, decision);

        match (decision, previous) {
            (Decision::Reuse, Some(entry)) => Ok(LoadResult {
                object: entry.object,
                generated: false,
                state_change: false,
            }),
            (decision, _) => {
                // Generate first, persist second: a failing generator must
                // leave the previous entry untouched.
                let object =
                    generate(&state).map_err(|e| CacheError::generation(unique_id, e))?;
                self.store.write(unique_id, &state, &object)?;
                Ok(LoadResult {
                    object,
                    generated: true,
                    state_change: decision.state_change(),
                })
            }
        }
    }
}

/// One-shot load against `folder` with the default inequality predicate
/// and no forced regeneration
pub fn load<S, T, G>(
    state: S,
    generate: G,
    unique_id: &str,
    folder: impl AsRef<Path>,
) -> CacheResult<LoadResult<T>>
where
    S: Serialize + DeserializeOwned + PartialEq,
    T: Serialize + DeserializeOwned,
    G: FnOnce(&S) -> Result<T, GenerateError>,
{
    Cache::new(folder.as_ref()).load(state, unique_id, generate)
}
