//! memocache - persistent, state-aware memoization cache
//!
//! Stores one `(state, object)` pair per `(folder, unique_id)` slot and
//! re-runs the generator only when the reload predicate says the stored
//! state is out of date. Results survive process restarts; entries are
//! replaced atomically so a crash never leaves a torn file behind.

pub mod cache;
pub mod codec;
pub mod error;
pub mod reload;
pub mod store;

pub use cache::{load, Cache, GenerateError, LoadResult};
pub use codec::{Codec, CodecError, JsonCodec};
pub use error::{CacheError, CacheResult};
pub use reload::{state_changed, Decision};
pub use store::{Entry, Store};
