//! End-to-end answer assembly.
//!
//! The orchestrator reads a cached decomposition and whatever sub-responses
//! have landed, reranks them against the original query, synthesizes a final
//! answer and scores it. It never waits on in-flight generation: a missing
//! sub-response becomes a placeholder at the barrier, not a blocked read.

pub mod dispatch;


pub use dispatch::{Dispatcher, GeneratedText, GenerationBackend, GenerationError};
#[cfg(any(test, feature = "mock"))]
pub use dispatch::MockGenerationBackend;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::cache::{CacheStore, CachedComponent, KvBackend};
use crate::decompose::DecompositionResult;
use crate::rerank::{RerankedComponent, Reranker};
use crate::scoring::RelevanceScorer;
use crate::synthesis::{SynthesizedResponse, Synthesizer};

/// Expected, reportable pipeline failures.
///
/// A missing decomposition is a frequent outcome (TTL expiry, or a hash that
/// was never decomposed), so it is a result variant rather than a panic; the
/// caller recovers by recomputing a fresh decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// No cached decomposition exists under the given key.
    #[error("no cached decomposition for key '{key}'")]
    DecompositionNotFound {
        /// The key that missed.
        key: String,
    },
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    /// The decomposition read back from the cache.
    pub decomposition: DecompositionResult,
    /// The synthesized answer, including the full reranked component list.
    pub response: SynthesizedResponse,
    /// Relevance of the synthesized text to the original query, in [0, 1].
    pub final_relevance: f32,
}

impl PipelineResult {
    /// The reranked components, in rank order.
    pub fn components(&self) -> &[RerankedComponent] {
        &self.response.components
    }
}

/// Cache-driven rerank/synthesis orchestrator.
#[derive(Debug)]
pub struct Pipeline<B: KvBackend> {
    store: Arc<CacheStore<B>>,
    reranker: Reranker,
    synthesizer: Synthesizer,
    scorer: RelevanceScorer,
}

impl<B: KvBackend> Pipeline<B> {
    /// Creates a pipeline over `store`.
    pub fn new(store: Arc<CacheStore<B>>) -> Self {
        Self {
            store,
            reranker: Reranker::new(),
            synthesizer: Synthesizer::new(),
            scorer: RelevanceScorer::new(),
        }
    }

    /// Returns the cache store in use.
    pub fn store(&self) -> &CacheStore<B> {
        &self.store
    }

    /// Assembles the final answer for a previously decomposed query.
    ///
    /// `original_query` overrides the stored query text when given. Every
    /// sub-request's cache entry is attempted exactly once; misses become
    /// placeholders immediately, so this never blocks on slow generation.
    #[instrument(skip(self, original_query), fields(query_hash = query_hash, user_id = user_id))]
    pub async fn run(
        &self,
        query_hash: &str,
        user_id: u64,
        original_query: Option<&str>,
    ) -> Result<PipelineResult, PipelineError> {
        let Some(decomposition) = self.store.get_decomposition(query_hash).await else {
            debug!("no cached decomposition");
            self.store.record_decomposition_miss(user_id).await;
            return Err(PipelineError::DecompositionNotFound {
                key: query_hash.to_string(),
            });
        };
        self.store.record_decomposition_hit(user_id).await;

        let query = original_query
            .unwrap_or(&decomposition.original_query)
            .to_string();

        let mut components = Vec::with_capacity(decomposition.sub_requests.len());
        let mut misses = 0usize;
        for sub_request in &decomposition.sub_requests {
            match self.store.get_subresponse(&sub_request.id).await {
                Some(component) => components.push(component),
                None => {
                    misses += 1;
                    components.push(CachedComponent::placeholder(sub_request));
                }
            }
        }
        debug!(
            sub_requests = decomposition.sub_requests.len(),
            misses, "collected cached sub-responses"
        );

        let reranked = self.reranker.rerank(&query, components);
        let response = self.synthesizer.synthesize(&query, reranked);
        let final_relevance = self.scorer.score(&query, &response.synthesized_text);

        info!(
            components = response.components.len(),
            aggregate_relevance = response.aggregate_relevance,
            final_relevance,
            "pipeline run complete"
        );

        Ok(PipelineResult {
            decomposition,
            response,
            final_relevance,
        })
    }
}
