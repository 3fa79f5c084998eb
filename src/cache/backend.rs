//! Key/value backend contract and the networked implementation.

use serde_json::Value;

use super::error::{CacheError, CacheResult};

/// Minimal key/value contract the pipeline relies on: TTL'd set/get plus
/// atomic counter increments on plain keys and hash fields.
///
/// Values are opaque strings; serialization happens in the store, not here.
pub trait KvBackend: Send + Sync {
    /// Stores `value` under `key`, expiring after `ttl_seconds` (0 = never).
    fn set(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> impl std::future::Future<Output = CacheResult<()>> + Send;

    /// Fetches the value under `key`, if present and unexpired.
    fn get(&self, key: &str) -> impl std::future::Future<Output = CacheResult<Option<String>>> + Send;

    /// Atomically adds `amount` to the counter at `key`, returning the new value.
    fn increment(
        &self,
        key: &str,
        amount: i64,
    ) -> impl std::future::Future<Output = CacheResult<i64>> + Send;

    /// Atomically adds `amount` to `field` of the hash at `key`, returning
    /// the new field value.
    fn hash_increment(
        &self,
        key: &str,
        field: &str,
        amount: i64,
    ) -> impl std::future::Future<Output = CacheResult<i64>> + Send;
}

/// Networked backend speaking the Redis REST dialect (Upstash-compatible):
/// one command per request, `{"result": …}` JSON responses.
///
/// Single-key commands are atomic on the server side, which is all the
/// pipeline needs; it never performs a read-modify-write across requests.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
}

impl RestBackend {
    /// Creates a backend for the service at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn command(&self, path: &str, body: Option<String>) -> CacheResult<Value> {
        let url = format!("{}/{}", self.base_url, path);
        let request = match body {
            Some(body) => self.client.post(&url).body(body),
            None => self.client.get(&url),
        };

        let response = request
            .send()
            .await
            .map_err(|e| CacheError::Unavailable {
                url: self.base_url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::BadResponse {
                reason: format!("status {status}"),
            });
        }

        response.json().await.map_err(|e| CacheError::BadResponse {
            reason: e.to_string(),
        })
    }

    fn result_i64(value: Value) -> CacheResult<i64> {
        value
            .get("result")
            .and_then(Value::as_i64)
            .ok_or_else(|| CacheError::BadResponse {
                reason: "non-integer increment result".to_string(),
            })
    }
}

impl KvBackend for RestBackend {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        let path = if ttl_seconds > 0 {
            format!("set/{key}?EX={ttl_seconds}")
        } else {
            format!("set/{key}")
        };
        self.command(&path, Some(value.to_string())).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let value = self.command(&format!("get/{key}"), None).await?;
        match value.get("result") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Ok(Some(other.to_string())),
        }
    }

    async fn increment(&self, key: &str, amount: i64) -> CacheResult<i64> {
        let value = self.command(&format!("incrby/{key}/{amount}"), None).await?;
        Self::result_i64(value)
    }

    async fn hash_increment(&self, key: &str, field: &str, amount: i64) -> CacheResult<i64> {
        let value = self
            .command(&format!("hincrby/{key}/{field}/{amount}"), None)
            .await?;
        Self::result_i64(value)
    }
}
