//! Query decomposition.
//!
//! Long multi-part queries are split into bounded sub-requests: sentence
//! boundaries win when the query holds several sentences, literal `" and "`
//! / `" or "` connectives otherwise. Short or single-focus queries pass
//! through undecomposed.

mod types;

#[cfg(test)]
mod tests;

pub use types::{DecompositionResult, SubRequest};

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::classify::{ComplexityLevel, classify};
use crate::constants::{DEFAULT_MAX_SUB_REQUESTS, DEFAULT_MIN_DECOMPOSE_TOKENS, DEFAULT_NAMESPACE};
use crate::hashing::cache_key;

/// Confidence assigned to sub-requests produced by sentence splitting.
pub const SENTENCE_SPLIT_CONFIDENCE: f32 = 0.8;

/// Confidence assigned to sub-requests produced by connective splitting.
pub const CONNECTIVE_SPLIT_CONFIDENCE: f32 = 0.7;

const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];
const TOPIC_WORD_COUNT: usize = 4;

const SHORT_QUERY_TOKENS: usize = 20;
const LONG_QUERY_TOKENS: usize = 100;
const SHORT_QUERY_PENALTY: f32 = 0.9;
const LONG_QUERY_PENALTY: f32 = 0.85;
const CONFIDENCE_FLOOR: f32 = 0.5;

/// Tuning knobs for the [`Decomposer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposerConfig {
    /// Namespace prepended to generated cache keys.
    pub namespace: String,
    /// Upper bound on sub-requests; excess entries are merged pairwise.
    pub max_sub_requests: usize,
    /// Queries with fewer normalized tokens than this are never split.
    pub min_decompose_tokens: usize,
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            max_sub_requests: DEFAULT_MAX_SUB_REQUESTS,
            min_decompose_tokens: DEFAULT_MIN_DECOMPOSE_TOKENS,
        }
    }
}

/// Splits queries into bounded sub-requests.
///
/// Decomposition is total: every string input, including the empty string,
/// produces a valid [`DecompositionResult`].
#[derive(Debug, Clone, Default)]
pub struct Decomposer {
    config: DecomposerConfig,
}

impl Decomposer {
    /// Creates a decomposer with the given configuration.
    pub fn new(config: DecomposerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &DecomposerConfig {
        &self.config
    }

    /// Derives the user-scoped cache key for `query`.
    #[inline]
    pub fn generate_cache_key(&self, query: &str, user_id: u64) -> String {
        cache_key(&self.config.namespace, query, user_id)
    }

    /// Decomposes `query` for `user_id`.
    #[instrument(skip(self, query), fields(query_len = query.len(), user_id = user_id))]
    pub fn decompose(&self, query: &str, user_id: u64) -> DecompositionResult {
        let query_hash = self.generate_cache_key(query, user_id);
        let complexity = classify(query);
        let token_count = query.split_whitespace().count();

        if token_count < self.config.min_decompose_tokens {
            debug!(token_count, "query below decomposition threshold");
            return self.undecomposed(query_hash, query, complexity);
        }

        let mut sub_requests = self.split(query);
        if sub_requests.is_empty() {
            debug!("query is a single focused sentence, not splitting");
            return self.undecomposed(query_hash, query, complexity);
        }

        self.enforce_bound(&mut sub_requests);

        let decomposition_confidence = self.confidence(token_count, &sub_requests);
        debug!(
            sub_requests = sub_requests.len(),
            decomposition_confidence, "query decomposed"
        );

        DecompositionResult {
            query_hash,
            original_query: query.to_string(),
            complexity,
            total_sub_requests: sub_requests.len(),
            needs_decomposition: !sub_requests.is_empty(),
            decomposition_confidence,
            sub_requests,
        }
    }

    fn undecomposed(
        &self,
        query_hash: String,
        query: &str,
        complexity: ComplexityLevel,
    ) -> DecompositionResult {
        DecompositionResult {
            query_hash,
            original_query: query.to_string(),
            complexity,
            sub_requests: Vec::new(),
            total_sub_requests: 0,
            needs_decomposition: false,
            decomposition_confidence: 1.0,
        }
    }

    /// Splits the query into sub-requests, sentence boundaries first.
    fn split(&self, query: &str) -> Vec<SubRequest> {
        let terminator_count = query
            .chars()
            .filter(|c| SENTENCE_TERMINATORS.contains(c))
            .count();

        let (segments, confidence) = if terminator_count >= 2 {
            (
                split_segments(query, &SENTENCE_TERMINATORS[..]),
                SENTENCE_SPLIT_CONFIDENCE,
            )
        } else if query.contains(" and ") || query.contains(" or ") {
            (split_connectives(query), CONNECTIVE_SPLIT_CONFIDENCE)
        } else {
            (Vec::new(), 1.0)
        };

        segments
            .into_iter()
            .map(|segment| make_sub_request(query, segment, confidence))
            .collect()
    }

    /// Merges the two least-confident entries until the bound holds.
    ///
    /// The merged entry sits at the earlier position, keeps that entry's id,
    /// and takes the minimum of the two confidences.
    fn enforce_bound(&self, sub_requests: &mut Vec<SubRequest>) {
        let bound = self.config.max_sub_requests.max(1);
        while sub_requests.len() > bound {
            let (first, second) = two_least_confident(sub_requests);
            let removed = sub_requests.remove(second);
            let target = &mut sub_requests[first];

            target.sub_query = format!("{} {}", target.sub_query, removed.sub_query);
            target.confidence = target.confidence.min(removed.confidence);
            target.complexity = classify(&target.sub_query);
            target.topic = topic_of(&target.sub_query);
        }
    }

    /// Mean sub-request confidence, penalized for very short or very long
    /// queries and clamped to [0.5, 1.0]. An unsplit query is maximally
    /// confident in its own framing.
    fn confidence(&self, token_count: usize, sub_requests: &[SubRequest]) -> f32 {
        if sub_requests.is_empty() {
            return 1.0;
        }

        let mean = sub_requests.iter().map(|s| s.confidence).sum::<f32>()
            / sub_requests.len() as f32;

        let adjusted = if token_count < SHORT_QUERY_TOKENS {
            mean * SHORT_QUERY_PENALTY
        } else if token_count > LONG_QUERY_TOKENS {
            mean * LONG_QUERY_PENALTY
        } else {
            mean
        };

        adjusted.clamp(CONFIDENCE_FLOOR, 1.0)
    }
}

fn make_sub_request(query: &str, segment: String, confidence: f32) -> SubRequest {
    SubRequest {
        id: Uuid::new_v4().to_string(),
        original_query: query.to_string(),
        complexity: classify(&segment),
        topic: topic_of(&segment),
        sub_query: segment,
        confidence,
    }
}

fn split_segments(query: &str, terminators: &[char]) -> Vec<String> {
    query
        .split(terminators)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn split_connectives(query: &str) -> Vec<String> {
    query
        .split(" and ")
        .flat_map(|part| part.split(" or "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn topic_of(segment: &str) -> String {
    segment
        .split_whitespace()
        .take(TOPIC_WORD_COUNT)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns (earlier, later) indexes of the two lowest-confidence entries.
///
/// Callers guarantee at least two entries.
fn two_least_confident(sub_requests: &[SubRequest]) -> (usize, usize) {
    let mut lowest = 0;
    for (i, sub) in sub_requests.iter().enumerate() {
        if sub.confidence < sub_requests[lowest].confidence {
            lowest = i;
        }
    }

    let mut second = usize::MAX;
    for (i, sub) in sub_requests.iter().enumerate() {
        if i == lowest {
            continue;
        }
        if second == usize::MAX || sub.confidence < sub_requests[second].confidence {
            second = i;
        }
    }

    if lowest < second {
        (lowest, second)
    } else {
        (second, lowest)
    }
}
