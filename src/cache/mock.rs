//! Mock backends for exercising the degraded-persistence path.

use super::backend::KvBackend;
use super::error::{CacheError, CacheResult};

/// A networked backend that is permanently unreachable.
///
/// Wiring this into a [`super::CacheStore`] forces every operation through
/// the in-process fallback, which is exactly what a dead cache service does.
#[derive(Debug, Clone, Default)]
pub struct UnreachableBackend;

impl UnreachableBackend {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }

    fn refuse<T>(&self) -> CacheResult<T> {
        Err(CacheError::Unavailable {
            url: "mock://unreachable".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

impl KvBackend for UnreachableBackend {
    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> CacheResult<()> {
        self.refuse()
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        self.refuse()
    }

    async fn increment(&self, _key: &str, _amount: i64) -> CacheResult<i64> {
        self.refuse()
    }

    async fn hash_increment(&self, _key: &str, _field: &str, _amount: i64) -> CacheResult<i64> {
        self.refuse()
    }
}
