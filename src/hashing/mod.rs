//! Query normalization and cache key derivation.
//!
//! Keys must be stable across process restarts and across queries that differ
//! only in whitespace or trailing punctuation, so normalization happens here
//! and nowhere else.

use crate::constants::KEY_HASH_HEX_LEN;

/// Normalizes a query for key derivation: collapse whitespace, strip trailing
/// `?`, `!` and `.` characters, lowercase.
///
/// `"  What is FlexNet?  "` and `"what is flexnet"` normalize identically.
pub fn normalize_query(query: &str) -> String {
    let collapsed = query.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(['?', '!', '.'])
        .trim_end()
        .to_lowercase()
}

/// Computes the truncated BLAKE3 digest of the normalized query.
///
/// # Truncation Rationale
///
/// Sixteen hex characters (64 bits) are kept. These keys index short-lived
/// cache entries, not content-addressed storage: a collision produces a stale
/// read that the TTL bounds and downstream relevance scoring discounts, so
/// the birthday-bound risk at realistic cache sizes is acceptable. Collision
/// resistance is not a security requirement here, only determinism.
#[inline]
pub fn query_digest(query: &str) -> String {
    let normalized = normalize_query(query);
    let hash = blake3::hash(normalized.as_bytes());
    hash.to_hex()[..KEY_HASH_HEX_LEN].to_string()
}

/// Composes the user-scoped cache key `<namespace>:<digest>:<user_id>`.
///
/// Two queries that normalize identically map to the same key for the same
/// user; distinct users never share a key.
#[inline]
pub fn cache_key(namespace: &str, query: &str, user_id: u64) -> String {
    format!("{}:{}:{}", namespace, query_digest(query), user_id)
}
