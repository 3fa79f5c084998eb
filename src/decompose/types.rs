//! Decomposition value objects.
//!
//! Everything here crosses the cache boundary, so the types derive serde and
//! stay free of borrowed data.

use serde::{Deserialize, Serialize};

use crate::classify::ComplexityLevel;

/// One decomposed unit of a larger query.
///
/// Created only by the decomposer and never mutated afterwards; its identity
/// lives exactly as long as the caching TTL of its response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRequest {
    /// Opaque unique identifier, generated at creation.
    pub id: String,
    /// The full query this sub-request was split from.
    pub original_query: String,
    /// The sub-query text to answer.
    pub sub_query: String,
    /// Complexity of the sub-query on its own.
    pub complexity: ComplexityLevel,
    /// Short heuristic label (leading words of the sub-query).
    pub topic: String,
    /// Split confidence in [0, 1].
    pub confidence: f32,
}

/// Output of decomposing one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionResult {
    /// User-scoped cache key for this decomposition.
    pub query_hash: String,
    /// The query as submitted.
    pub original_query: String,
    /// Overall complexity of the original query.
    pub complexity: ComplexityLevel,
    /// Sub-requests in presentation/processing order.
    pub sub_requests: Vec<SubRequest>,
    /// Always equals `sub_requests.len()`.
    pub total_sub_requests: usize,
    /// Whether the query was split at all.
    pub needs_decomposition: bool,
    /// Confidence in the decomposition, in [0.5, 1.0]; 1.0 when not split.
    pub decomposition_confidence: f32,
}
