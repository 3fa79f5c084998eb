//! In-process fallback backend.
//!
//! A plain map behind one coarse mutex. TTL expiry is checked lazily on
//! access; there is no background sweep. The serialization this lock imposes
//! under heavy concurrent load is accepted, since the fallback only runs when
//! the networked backend is unreachable.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::backend::KvBackend;
use super::error::{CacheError, CacheResult};

#[derive(Debug, Clone)]
enum Stored {
    Text(String),
    Counter(i64),
    Hash(HashMap<String, i64>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: Stored,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// Mutex-guarded in-memory key/value store with lazy TTL expiry.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryBackend {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (possibly expired but unswept) entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Stores `value` with a [`Duration`] TTL; `None` never expires.
    ///
    /// Used by [`KvBackend::set`] (whole seconds) and by tests that need
    /// sub-second expiry.
    pub fn set_with_ttl(&self, key: &str, value: &str, ttl: Option<Duration>) {
        let entry = Entry {
            value: Stored::Text(value.to_string()),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.lock().insert(key.to_string(), entry);
    }

    /// Removes the entry at `key` if it has expired.
    fn take_if_expired(entries: &mut HashMap<String, Entry>, key: &str, now: Instant) {
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }
    }
}

impl KvBackend for MemoryBackend {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let ttl = (ttl_seconds > 0).then(|| Duration::from_secs(ttl_seconds));
        self.set_with_ttl(key, value, ttl);
        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        Self::take_if_expired(&mut entries, key, now);

        match entries.get(key) {
            Some(Entry {
                value: Stored::Text(text),
                ..
            }) => Ok(Some(text.clone())),
            Some(Entry {
                value: Stored::Counter(n),
                ..
            }) => Ok(Some(n.to_string())),
            Some(Entry {
                value: Stored::Hash(_),
                ..
            }) => Err(CacheError::BadResponse {
                reason: format!("key '{key}' holds a hash, not a value"),
            }),
            None => Ok(None),
        }
    }

    async fn increment(&self, key: &str, amount: i64) -> CacheResult<i64> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        Self::take_if_expired(&mut entries, key, now);

        let entry = entries.entry(key.to_string()).or_insert(Entry {
            value: Stored::Counter(0),
            expires_at: None,
        });
        match &mut entry.value {
            Stored::Counter(n) => {
                *n += amount;
                Ok(*n)
            }
            _ => Err(CacheError::NotACounter {
                key: key.to_string(),
            }),
        }
    }

    async fn hash_increment(&self, key: &str, field: &str, amount: i64) -> CacheResult<i64> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        Self::take_if_expired(&mut entries, key, now);

        let entry = entries.entry(key.to_string()).or_insert(Entry {
            value: Stored::Hash(HashMap::new()),
            expires_at: None,
        });
        match &mut entry.value {
            Stored::Hash(fields) => {
                let counter = fields.entry(field.to_string()).or_insert(0);
                *counter += amount;
                Ok(*counter)
            }
            _ => Err(CacheError::NotACounter {
                key: key.to_string(),
            }),
        }
    }
}
