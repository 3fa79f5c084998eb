//! Cache-edge value objects.

use serde::{Deserialize, Serialize};

use crate::decompose::SubRequest;

fn default_confidence() -> f32 {
    1.0
}

/// A sub-response read back from the cache, or a placeholder when no entry
/// exists yet.
///
/// Cache reads always produce fresh instances; nothing here is shared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedComponent {
    /// Matches the id of the [`SubRequest`] it answers.
    pub id: String,
    /// The sub-query that was answered.
    pub sub_query: String,
    /// Response text; empty while generation is still in flight.
    #[serde(default)]
    pub response: String,
    /// Identifier of the generation model used, when known.
    #[serde(default)]
    pub model: Option<String>,
    /// Generation latency in milliseconds.
    #[serde(default)]
    pub time_ms: u64,
    /// Response confidence in [0, 1]; 1.0 when the producer reported none.
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    /// `true` for real cache hits, `false` for placeholders.
    #[serde(default)]
    pub cached: bool,
}

impl CachedComponent {
    /// Builds the placeholder used when a sub-request has no cached response
    /// at assembly time. Carries the sub-request's own confidence so the
    /// reranker can still order it meaningfully.
    pub fn placeholder(sub_request: &SubRequest) -> Self {
        Self {
            id: sub_request.id.clone(),
            sub_query: sub_request.sub_query.clone(),
            response: String::new(),
            model: None,
            time_ms: 0,
            confidence: sub_request.confidence,
            cached: false,
        }
    }
}
