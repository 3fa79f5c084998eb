//! Short-term response caching.
//!
//! Two [`KvBackend`] implementations sit behind one contract: a networked
//! Redis-REST client and an in-process mutex-guarded map. [`CacheStore`]
//! composes them, preferring the network and absorbing its failures into the
//! fallback, and owns the serialize/deserialize boundary for typed values.

pub mod backend;
pub mod error;
pub mod memory;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod store;
pub mod types;


pub use backend::{KvBackend, RestBackend};
pub use error::{CacheError, CacheResult};
pub use memory::MemoryBackend;
#[cfg(any(test, feature = "mock"))]
pub use mock::UnreachableBackend;
pub use store::CacheStore;
pub use types::CachedComponent;
