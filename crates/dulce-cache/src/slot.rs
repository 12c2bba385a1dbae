//! Single-key storage slots with a schema version.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Cache, CacheError, KvStore};

/// Version reported for values written before envelopes existed.
pub const LEGACY_VERSION: u32 = 0;

/// On-disk layout of a slot value.
#[derive(Debug, Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// A value read back from a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    /// The decoded value.
    pub data: T,
    /// Schema version it was written with (`0` for unversioned legacy data).
    pub version: u32,
}

impl<T> Loaded<T> {
    /// Whether the value predates versioned envelopes.
    pub fn is_legacy(&self) -> bool {
        self.version == LEGACY_VERSION
    }
}

/// A durable slot holding one value of type `T` under a fixed key.
///
/// Values are wrapped as `{"version": N, "data": ...}`. A bare value with no
/// envelope is still accepted and reported as version 0, so data written by
/// older builds keeps loading. A version newer than the slot's own is refused
/// with [`CacheError::SchemaMismatch`] instead of being misread.
#[derive(Debug, Clone)]
pub struct Slot<S, T> {
    cache: Cache<S>,
    key: String,
    version: u32,
    _phantom: PhantomData<fn() -> T>,
}

impl<S, T> Slot<S, T>
where
    S: KvStore,
    T: Serialize + DeserializeOwned,
{
    /// Create a slot over `store` at `key`, writing schema `version`.
    pub fn new(store: S, key: impl Into<String>, version: u32) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
            version,
            _phantom: PhantomData,
        }
    }

    /// The slot's key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Schema version this slot writes.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Read the slot.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    pub fn load(&self) -> Result<Option<Loaded<T>>, CacheError> {
        let Some(bytes) = self.cache.get_raw(&self.key)? else {
            return Ok(None);
        };

        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        if is_envelope(&value) {
            let envelope: Envelope<T> = serde_json::from_value(value)?;
            if envelope.version > self.version {
                warn!(
                    key = %self.key,
                    found = envelope.version,
                    supported = self.version,
                    "slot written by a newer schema"
                );
                return Err(CacheError::SchemaMismatch {
                    key: self.key.clone(),
                    found: envelope.version,
                    supported: self.version,
                });
            }
            debug!(key = %self.key, version = envelope.version, "slot loaded");
            return Ok(Some(Loaded {
                data: envelope.data,
                version: envelope.version,
            }));
        }

        let data: T = serde_json::from_value(value)?;
        debug!(key = %self.key, "legacy slot loaded");
        Ok(Some(Loaded {
            data,
            version: LEGACY_VERSION,
        }))
    }

    /// Overwrite the slot with `data` at the current version.
    pub fn save(&self, data: &T) -> Result<(), CacheError> {
        self.cache.set(
            &self.key,
            &EnvelopeRef {
                version: self.version,
                data,
            },
        )
    }

    /// Remove the slot entirely.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }
}

fn is_envelope(value: &serde_json::Value) -> bool {
    match value.as_object() {
        Some(map) => map.len() == 2 && map.contains_key("version") && map.contains_key("data"),
        None => false,
    }
}
