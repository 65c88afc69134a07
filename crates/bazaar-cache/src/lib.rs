//! Type-safe persisted key-value storage for the Bazaar client.
//!
//! Plays the role browser local storage plays for a web storefront: a small
//! string-keyed store that survives restarts, with automatic JSON
//! serialization. The bearer token lives here under a fixed key.
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_cache::Cache;
//!
//! let cache = Cache::open_dir(".bazaar")?;
//!
//! // Store a value
//! cache.set("token", &token)?;
//!
//! // Retrieve a value
//! let token: Option<String> = cache.get("token")?;
//!
//! // Delete a value
//! cache.delete("token")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvBackend};
}
