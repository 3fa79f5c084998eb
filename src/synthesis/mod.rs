//! Merging reranked sub-responses into one final answer.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::MAX_SYNTHESIS_COMPONENTS;
use crate::rerank::RerankedComponent;

/// Final assembled answer with its audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedResponse {
    /// Concatenated answer text; empty when no sub-response was available.
    pub synthesized_text: String,
    /// The full reranked input, kept for auditability.
    pub components: Vec<RerankedComponent>,
    /// Mean relevance across all input components (0.0 for empty input).
    pub aggregate_relevance: f32,
    /// Ordered diagnostic notes.
    pub notes: Vec<String>,
}

/// Merges the top reranked components into a [`SynthesizedResponse`].
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer {
    max_components: usize,
}

impl Synthesizer {
    /// Creates a synthesizer using the default component limit.
    pub fn new() -> Self {
        Self {
            max_components: MAX_SYNTHESIS_COMPONENTS,
        }
    }

    /// Creates a synthesizer that merges at most `max_components` responses.
    pub fn with_max_components(max_components: usize) -> Self {
        Self { max_components }
    }

    /// Concatenates the first `max_components` non-empty responses in
    /// reranked order, separated by blank lines.
    ///
    /// `aggregate_relevance` is computed over *all* components, including
    /// those skipped for being empty or beyond the limit.
    pub fn synthesize(
        &self,
        query: &str,
        reranked: Vec<RerankedComponent>,
    ) -> SynthesizedResponse {
        let used: Vec<&str> = reranked
            .iter()
            .filter(|c| !c.component.response.is_empty())
            .take(self.max_components)
            .map(|c| c.component.response.as_str())
            .collect();

        let synthesized_text = used.join("\n\n");

        let aggregate_relevance = if reranked.is_empty() {
            0.0
        } else {
            reranked.iter().map(|c| c.relevance).sum::<f32>() / reranked.len() as f32
        };

        let notes = if synthesized_text.is_empty() {
            vec!["No sub-responses available to synthesize.".to_string()]
        } else {
            vec![
                format!("Synthesized from {} sub-responses.", used.len()),
                format!("Aggregate relevance: {:.2}", aggregate_relevance),
            ]
        };

        debug!(
            query_len = query.len(),
            used = used.len(),
            total = reranked.len(),
            aggregate_relevance,
            "synthesis complete"
        );

        SynthesizedResponse {
            synthesized_text,
            components: reranked,
            aggregate_relevance,
            notes,
        }
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}
