//! Serialization backend for cache entries
//!
//! The store treats encoding as an opaque capability so the on-disk byte
//! layout is owned by the codec, not by the cache logic. The default codec
//! is JSON; anything serde can represent round-trips through it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Error raised when a value cannot be encoded or decoded
#[derive(Error, Debug)]
#[error("{message}")]
pub struct CodecError {
    message: String,
}

impl CodecError {
    /// Create a codec error from any displayable reason
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Encode/decode capability used by the cache store
pub trait Codec {
    /// File extension for entries written by this codec (without the dot)
    fn extension(&self) -> &'static str;

    /// Encode a value to bytes
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode a value from bytes
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// Default codec: human-readable JSON via serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec_pretty(value).map_err(|e| CodecError::new(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::new(e.to_string()))
    }
}
