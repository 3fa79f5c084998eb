//! Dual-backend cache store.
//!
//! The store prefers the networked backend and falls back to the in-process
//! map when it is unreachable, so callers see degraded persistence instead of
//! errors: writes and counter bumps report success as a boolean, reads report
//! presence as an `Option`. Serialization of typed values happens here and
//! only here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use super::backend::{KvBackend, RestBackend};
use super::memory::MemoryBackend;
use super::types::CachedComponent;
use crate::decompose::DecompositionResult;

/// Self-describing envelope wrapped around every typed cache value.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    cached_at: DateTime<Utc>,
    payload: T,
}

/// Key/value cache with a networked primary and an in-process fallback.
pub struct CacheStore<B: KvBackend = RestBackend> {
    remote: Option<B>,
    memory: MemoryBackend,
    namespace: String,
}

impl<B: KvBackend> std::fmt::Debug for CacheStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("remote", &self.remote.is_some())
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl CacheStore<RestBackend> {
    /// Creates a store backed by the REST service at `base_url`.
    pub fn remote(base_url: &str, namespace: &str) -> Self {
        Self::with_backend(RestBackend::new(base_url), namespace)
    }
}

impl<B: KvBackend> CacheStore<B> {
    /// Creates a store with a networked primary backend.
    pub fn with_backend(remote: B, namespace: &str) -> Self {
        Self {
            remote: Some(remote),
            memory: MemoryBackend::new(),
            namespace: namespace.to_string(),
        }
    }

    /// Creates a store that only uses the in-process map.
    pub fn memory_only(namespace: &str) -> Self {
        Self {
            remote: None,
            memory: MemoryBackend::new(),
            namespace: namespace.to_string(),
        }
    }

    /// Returns the configured namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the in-process fallback store.
    pub fn memory(&self) -> &MemoryBackend {
        &self.memory
    }

    /// Stores a raw value. Returns `false` only if every backend refused it.
    pub async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> bool {
        if let Some(remote) = &self.remote {
            match remote.set(key, value, ttl_seconds).await {
                Ok(()) => return true,
                Err(e) => {
                    warn!(key, error = %e, "remote cache write failed, using in-process fallback");
                }
            }
        }
        self.memory.set(key, value, ttl_seconds).await.is_ok()
    }

    /// Fetches a raw value. A remote miss or failure falls through to the
    /// in-process map, where degraded-mode writes live.
    pub async fn get(&self, key: &str) -> Option<String> {
        if let Some(remote) = &self.remote {
            match remote.get(key).await {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {}
                Err(e) => {
                    warn!(key, error = %e, "remote cache read failed, using in-process fallback");
                }
            }
        }
        self.memory.get(key).await.ok().flatten()
    }

    /// Atomically bumps a counter. Returns `true` on success.
    pub async fn increment(&self, key: &str, amount: i64) -> bool {
        if let Some(remote) = &self.remote {
            match remote.increment(key, amount).await {
                Ok(_) => return true,
                Err(e) => {
                    warn!(key, error = %e, "remote counter bump failed, using in-process fallback");
                }
            }
        }
        self.memory.increment(key, amount).await.is_ok()
    }

    /// Atomically bumps a hash field. Returns `true` on success.
    pub async fn hash_increment(&self, key: &str, field: &str, amount: i64) -> bool {
        if let Some(remote) = &self.remote {
            match remote.hash_increment(key, field, amount).await {
                Ok(_) => return true,
                Err(e) => {
                    warn!(key, field, error = %e, "remote hash bump failed, using in-process fallback");
                }
            }
        }
        self.memory.hash_increment(key, field, amount).await.is_ok()
    }

    /// Caches a decomposition under its query hash.
    #[instrument(skip(self, decomposition), fields(key = key))]
    pub async fn cache_decomposition(
        &self,
        key: &str,
        decomposition: &DecompositionResult,
        ttl_seconds: u64,
    ) -> bool {
        match self.serialize(decomposition) {
            Some(value) => self.set(key, &value, ttl_seconds).await,
            None => false,
        }
    }

    /// Reads back a cached decomposition. Malformed entries count as misses.
    #[instrument(skip(self), fields(key = key))]
    pub async fn get_decomposition(&self, key: &str) -> Option<DecompositionResult> {
        let raw = self.get(key).await?;
        self.deserialize(key, &raw)
    }

    /// Caches one sub-response under its sub-request id.
    #[instrument(skip(self, component), fields(sub_request_id = id))]
    pub async fn cache_subresponse(
        &self,
        id: &str,
        component: &CachedComponent,
        ttl_seconds: u64,
    ) -> bool {
        match self.serialize(component) {
            Some(value) => self.set(&self.subresponse_key(id), &value, ttl_seconds).await,
            None => false,
        }
    }

    /// Reads back one sub-response. Malformed entries count as misses.
    #[instrument(skip(self), fields(sub_request_id = id))]
    pub async fn get_subresponse(&self, id: &str) -> Option<CachedComponent> {
        let key = self.subresponse_key(id);
        let raw = self.get(&key).await?;
        self.deserialize(&key, &raw)
    }

    /// Bumps the decomposition hit counters (global and per-user).
    pub async fn record_decomposition_hit(&self, user_id: u64) -> bool {
        let counter = format!("{}:stats:decomposition:hits", self.namespace);
        let users = format!("{}:stats:users", self.namespace);
        let ok = self.increment(&counter, 1).await;
        self.hash_increment(&users, &user_id.to_string(), 1).await && ok
    }

    /// Bumps the decomposition miss counter.
    pub async fn record_decomposition_miss(&self, user_id: u64) -> bool {
        let counter = format!("{}:stats:decomposition:misses", self.namespace);
        let users = format!("{}:stats:users", self.namespace);
        let ok = self.increment(&counter, 1).await;
        self.hash_increment(&users, &user_id.to_string(), 1).await && ok
    }

    fn subresponse_key(&self, id: &str) -> String {
        format!("{}:subresponse:{}", self.namespace, id)
    }

    fn serialize<T: Serialize>(&self, payload: &T) -> Option<String> {
        let envelope = Envelope {
            cached_at: Utc::now(),
            payload,
        };
        match serde_json::to_string(&envelope) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "failed to serialize cache value");
                None
            }
        }
    }

    fn deserialize<T: DeserializeOwned>(&self, key: &str, raw: &str) -> Option<T> {
        match serde_json::from_str::<Envelope<T>>(raw) {
            Ok(envelope) => {
                debug!(key, cached_at = %envelope.cached_at, "cache hit");
                Some(envelope.payload)
            }
            Err(e) => {
                warn!(key, error = %e, "malformed cache entry, treating as miss");
                None
            }
        }
    }
}
