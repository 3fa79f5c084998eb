//! Query/candidate relevance scoring.
//!
//! The score blends two cheap lexical signals: unique-token overlap against
//! the query and a character-level longest-matching-blocks ratio over the
//! normalized strings. Both are in [0, 1] and the blend is clamped, so the
//! result is always a valid relevance.

mod similarity;


pub use similarity::sequence_similarity;

use std::collections::HashSet;

const TOKEN_OVERLAP_WEIGHT: f32 = 0.6;
const SEQUENCE_SIMILARITY_WEIGHT: f32 = 0.4;

/// Lexical relevance scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceScorer;

impl RelevanceScorer {
    /// Creates a scorer.
    pub fn new() -> Self {
        Self
    }

    /// Scores `candidate` against `query`, returning a value in [0, 1].
    ///
    /// An empty candidate scores 0.0 regardless of the query.
    pub fn score(&self, query: &str, candidate: &str) -> f32 {
        let query = normalize(query);
        let candidate = normalize(candidate);
        if candidate.is_empty() {
            return 0.0;
        }

        let overlap = token_overlap(&query, &candidate);
        let similarity = sequence_similarity(&query, &candidate);

        (TOKEN_OVERLAP_WEIGHT * overlap + SEQUENCE_SIMILARITY_WEIGHT * similarity).clamp(0.0, 1.0)
    }
}

/// Fraction of the query's unique tokens that also appear in the candidate.
///
/// Returns 0.0 when the query has no tokens.
pub fn token_overlap(query: &str, candidate: &str) -> f32 {
    let query_tokens: HashSet<&str> = query.split_whitespace().collect();
    if query_tokens.is_empty() {
        return 0.0;
    }

    let candidate_tokens: HashSet<&str> = candidate.split_whitespace().collect();
    let shared = query_tokens.intersection(&candidate_tokens).count();

    shared as f32 / query_tokens.len() as f32
}

/// Lowercases, drops punctuation other than `?`, collapses whitespace.
fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '?' {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
