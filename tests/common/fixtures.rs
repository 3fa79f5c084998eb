//! Test fixtures for integration tests.

use std::sync::Arc;

use prism::cache::{CacheStore, CachedComponent, MemoryBackend};
use prism::decompose::{Decomposer, DecomposerConfig};

pub const DEFAULT_USER_ID: u64 = 1;

pub const DEFAULT_TTL_SECS: u64 = 60;

/// A two-part query that decomposes into exactly two sub-requests under the
/// eager decomposer.
pub const TWO_PART_QUERY: &str = "What is FlexNet? How does it work?";

pub fn memory_store() -> Arc<CacheStore<MemoryBackend>> {
    Arc::new(CacheStore::memory_only("prism"))
}

/// A decomposer willing to split short fixture queries.
pub fn eager_decomposer() -> Decomposer {
    Decomposer::new(DecomposerConfig {
        min_decompose_tokens: 4,
        ..DecomposerConfig::default()
    })
}

#[derive(Default)]
pub struct ComponentBuilder {
    id: Option<String>,
    sub_query: Option<String>,
    response: Option<String>,
    model: Option<String>,
    confidence: Option<f32>,
}

impl ComponentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn sub_query(mut self, sub_query: &str) -> Self {
        self.sub_query = Some(sub_query.to_string());
        self
    }

    pub fn response(mut self, response: &str) -> Self {
        self.response = Some(response.to_string());
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    pub fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn build(self) -> CachedComponent {
        let response = self.response.unwrap_or_default();
        CachedComponent {
            id: self.id.unwrap_or_else(|| "sub-0".to_string()),
            sub_query: self.sub_query.unwrap_or_else(|| "What is FlexNet".to_string()),
            cached: !response.is_empty(),
            response,
            model: self.model,
            time_ms: 25,
            confidence: self.confidence.unwrap_or(0.9),
        }
    }
}
