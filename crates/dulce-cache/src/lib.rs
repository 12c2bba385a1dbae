//! Key-value storage slots for the Dulce Hogar storefront.
//!
//! The browser keeps the cart in a single local-storage slot. This crate
//! models that slot as a small stack:
//!
//! - [`KvStore`]: raw string-keyed byte store ([`MemoryStore`], [`FileStore`])
//! - [`Cache`]: typed JSON access on top of any store
//! - [`Slot`]: one key holding a schema-versioned value
//!
//! # Example
//!
//! ```rust,ignore
//! use dulce_cache::{MemoryStore, Slot};
//!
//! let slot: Slot<_, Vec<String>> = Slot::new(MemoryStore::new(), "dulceHogarCart", 1);
//! slot.save(&vec!["Medialunas".to_string()])?;
//!
//! let loaded = slot.load()?.unwrap();
//! assert_eq!(loaded.version, 1);
//! ```

mod error;
mod kv;
mod slot;

pub use error::CacheError;
pub use kv::{Cache, FileStore, KvStore, MemoryStore};
pub use slot::{Loaded, Slot};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, Loaded, MemoryStore, Slot};
}
