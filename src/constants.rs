//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary values (keys, weights) from these rather than
//! re-declaring them in individual modules.

/// Key namespace prepended to every cache key when none is configured.
pub const DEFAULT_NAMESPACE: &str = "prism";

/// Upper bound on sub-requests produced by one decomposition.
pub const DEFAULT_MAX_SUB_REQUESTS: usize = 5;

/// Queries shorter than this many normalized tokens are never decomposed.
pub const DEFAULT_MIN_DECOMPOSE_TOKENS: usize = 15;

/// TTL for cached decompositions. Default: one hour.
pub const DEFAULT_DECOMPOSITION_TTL_SECS: u64 = 3_600;

/// TTL for cached sub-responses. Default: thirty minutes.
pub const DEFAULT_SUBRESPONSE_TTL_SECS: u64 = 1_800;

/// Number of hex characters kept from the query digest when composing keys.
pub const KEY_HASH_HEX_LEN: usize = 16;

/// Model routed to for simple lookups.
pub const DEFAULT_SIMPLE_MODEL: &str = "llama3.2:1b";

/// Model routed to for moderate analytical queries.
pub const DEFAULT_MODERATE_MODEL: &str = "llama3.1:8b";

/// Model routed to for complex design/troubleshooting queries.
pub const DEFAULT_COMPLEX_MODEL: &str = "llama3.1:70b";

/// Maximum number of sub-responses merged into one synthesized answer.
pub const MAX_SYNTHESIS_COMPONENTS: usize = 5;
