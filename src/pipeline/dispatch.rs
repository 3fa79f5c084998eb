//! Fan-out dispatch of sub-requests to the generation backend.
//!
//! Each sub-request is routed to a model, generated, and cached under its own
//! id as soon as it completes; the join is a barrier over the whole batch.
//! The assembly side never depends on dispatch finishing: it reads whatever
//! is cached and fills placeholders for the rest.

use std::sync::Arc;

use futures_util::future::join_all;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::cache::{CacheStore, CachedComponent, KvBackend};
use crate::decompose::{DecompositionResult, SubRequest};
use crate::routing::ModelRouter;

/// One generated answer from the external text-generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedText {
    /// Response text.
    pub text: String,
    /// Producer-reported confidence in [0, 1].
    pub confidence: f32,
    /// Generation latency in milliseconds.
    pub time_ms: u64,
    /// Model that actually served the request.
    pub model: String,
}

/// Errors surfaced by a generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The backend failed to produce a response.
    #[error("generation failed on model '{model}': {reason}")]
    Failed {
        /// Model the request was routed to.
        model: String,
        /// Error message.
        reason: String,
    },
}

/// Interface boundary to the external text-generation service.
pub trait GenerationBackend: Send + Sync {
    /// Generates a response to `prompt` on `model`.
    fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<GeneratedText, GenerationError>> + Send;
}

/// Fans one decomposition's sub-requests out to the generation backend.
pub struct Dispatcher<B: KvBackend, G: GenerationBackend> {
    store: Arc<CacheStore<B>>,
    backend: G,
    router: ModelRouter,
    subresponse_ttl_secs: u64,
}

impl<B: KvBackend, G: GenerationBackend> Dispatcher<B, G> {
    /// Creates a dispatcher.
    pub fn new(
        store: Arc<CacheStore<B>>,
        backend: G,
        router: ModelRouter,
        subresponse_ttl_secs: u64,
    ) -> Self {
        Self {
            store,
            backend,
            router,
            subresponse_ttl_secs,
        }
    }

    /// Generates and caches responses for every sub-request concurrently.
    ///
    /// Returns the number of sub-responses cached. Individual failures are
    /// logged and skipped; assembly later substitutes placeholders for them,
    /// so dispatch as a whole never fails.
    #[instrument(skip(self, decomposition), fields(sub_requests = decomposition.sub_requests.len()))]
    pub async fn dispatch(&self, decomposition: &DecompositionResult) -> usize {
        let work = decomposition
            .sub_requests
            .iter()
            .map(|sub_request| self.dispatch_one(sub_request));

        let results = join_all(work).await;
        let cached = results.into_iter().filter(|ok| *ok).count();

        info!(
            cached,
            total = decomposition.sub_requests.len(),
            "dispatch complete"
        );
        cached
    }

    async fn dispatch_one(&self, sub_request: &SubRequest) -> bool {
        let model = self.router.select_model(sub_request.complexity);

        match self.backend.generate(model, &sub_request.sub_query).await {
            Ok(generated) => {
                let component = CachedComponent {
                    id: sub_request.id.clone(),
                    sub_query: sub_request.sub_query.clone(),
                    response: generated.text,
                    model: Some(generated.model),
                    time_ms: generated.time_ms,
                    confidence: generated.confidence,
                    cached: true,
                };
                self.store
                    .cache_subresponse(&sub_request.id, &component, self.subresponse_ttl_secs)
                    .await
            }
            Err(e) => {
                warn!(
                    sub_request_id = %sub_request.id,
                    error = %e,
                    "generation failed, leaving sub-response uncached"
                );
                false
            }
        }
    }
}

/// Scriptable in-memory generation backend.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct MockGenerationBackend {
    responses: parking_lot::Mutex<std::collections::HashMap<String, String>>,
    failing: parking_lot::Mutex<std::collections::HashSet<String>>,
}

#[cfg(any(test, feature = "mock"))]
impl MockGenerationBackend {
    /// Creates a backend that echoes prompts through a canned template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the response for an exact prompt.
    pub fn script(&self, prompt: &str, response: &str) {
        self.responses
            .lock()
            .insert(prompt.to_string(), response.to_string());
    }

    /// Makes generation fail for an exact prompt.
    pub fn fail_on(&self, prompt: &str) {
        self.failing.lock().insert(prompt.to_string());
    }
}

#[cfg(any(test, feature = "mock"))]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<GeneratedText, GenerationError> {
        if self.failing.lock().contains(prompt) {
            return Err(GenerationError::Failed {
                model: model.to_string(),
                reason: "scripted failure".to_string(),
            });
        }

        let text = self
            .responses
            .lock()
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| format!("[{model}] {prompt}"));

        Ok(GeneratedText {
            text,
            confidence: 0.9,
            time_ms: 5,
            model: model.to_string(),
        })
    }
}
