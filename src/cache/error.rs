use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by cache backends.
///
/// These never escape [`crate::cache::CacheStore`]: the store absorbs them
/// into its boolean/option results after falling back to the in-process map.
pub enum CacheError {
    /// The networked backend could not be reached.
    #[error("cache backend unreachable at {url}: {reason}")]
    Unavailable {
        /// Backend base URL.
        url: String,
        /// Error message.
        reason: String,
    },

    /// The backend answered, but not with what the protocol promises.
    #[error("unexpected cache backend response: {reason}")]
    BadResponse {
        /// Error message.
        reason: String,
    },

    /// A counter operation hit a key holding a non-counter value.
    #[error("key '{key}' does not hold a counter")]
    NotACounter {
        /// Offending key.
        key: String,
    },
}

/// Convenience result type for backend operations.
pub type CacheResult<T> = Result<T, CacheError>;
