//! Reranking of cached sub-responses against the original query.


use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::CachedComponent;
use crate::scoring::RelevanceScorer;

const RELEVANCE_WEIGHT: f32 = 0.8;
const CONFIDENCE_WEIGHT: f32 = 0.2;

/// A cached component annotated with its combined relevance score.
///
/// `relevance` is the blended ordering score (text relevance weighted with
/// the component's own confidence), not the raw text-similarity value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankedComponent {
    /// The underlying cached sub-response.
    pub component: CachedComponent,
    /// Combined ordering score in [0, 1].
    pub relevance: f32,
}

impl RerankedComponent {
    /// Creates a reranked record.
    pub fn new(component: CachedComponent, relevance: f32) -> Self {
        Self {
            component,
            relevance,
        }
    }
}

/// Orders cached components by combined relevance and confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reranker {
    scorer: RelevanceScorer,
}

impl Reranker {
    /// Creates a reranker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores every component against `query` and sorts descending.
    ///
    /// Components with an empty response score 0.0 relevance and are ordered
    /// by their confidence alone. The sort is stable: exact ties keep their
    /// original relative order.
    pub fn rerank(&self, query: &str, components: Vec<CachedComponent>) -> Vec<RerankedComponent> {
        let mut reranked: Vec<RerankedComponent> = components
            .into_iter()
            .map(|component| {
                let relevance = if component.response.is_empty() {
                    0.0
                } else {
                    self.scorer.score(query, &component.response)
                };
                let combined =
                    RELEVANCE_WEIGHT * relevance + CONFIDENCE_WEIGHT * component.confidence;
                RerankedComponent::new(component, combined)
            })
            .collect();

        reranked.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(Ordering::Equal)
        });

        debug!(
            components = reranked.len(),
            top_relevance = reranked.first().map(|c| c.relevance),
            "rerank complete"
        );

        reranked
    }
}
