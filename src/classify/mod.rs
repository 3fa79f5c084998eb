//! Lexical complexity classification.
//!
//! The classifier is a deterministic keyword heuristic: each matching keyword
//! contributes a fixed weight and the summed score maps to a level. Keywords
//! are substring-matched against the normalized query, not tokenized, so a
//! keyword embedded in a longer word still counts ("redesigned" matches
//! "design"). Downstream cache keys and model routing depend on this exact
//! policy; do not switch to word-boundary matching.

use serde::{Deserialize, Serialize};

/// Interrogative keywords. Weight: +1 each.
pub const SIMPLE_KEYWORDS: &[&str] = &[
    "what", "how", "explain", "define", "list", "describe", "who", "where", "which", "show",
];

/// Analytical keywords. Weight: +2 each.
pub const MODERATE_KEYWORDS: &[&str] = &[
    "compare",
    "analyze",
    "summarize",
    "evaluate",
    "contrast",
    "assess",
    "difference",
    "relationship",
];

/// Design/troubleshooting keywords. Weight: +3 each.
pub const COMPLEX_KEYWORDS: &[&str] = &[
    "design",
    "implement",
    "troubleshoot",
    "optimize",
    "recommend",
    "architect",
    "integrate",
    "strategy",
];

/// Conditional keywords. Weight: +1 per occurrence.
pub const CONDITIONAL_KEYWORDS: &[&str] = &["if", "when", "given", "assuming", "in case"];

const COMPLEX_THRESHOLD: usize = 4;
const MODERATE_THRESHOLD: usize = 2;

/// Query complexity level, used for model routing and decomposition metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
}

impl ComplexityLevel {
    /// Returns the lowercase wire label for this level.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Simple => "simple",
            ComplexityLevel::Moderate => "moderate",
            ComplexityLevel::Complex => "complex",
        }
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a raw query. Pure and total: identical input always yields the
/// same level, and every string input yields a level.
pub fn classify(query: &str) -> ComplexityLevel {
    let normalized = normalize(query);

    let mut score = 0usize;
    for keyword in SIMPLE_KEYWORDS {
        if normalized.contains(keyword) {
            score += 1;
        }
    }
    for keyword in MODERATE_KEYWORDS {
        if normalized.contains(keyword) {
            score += 2;
        }
    }
    for keyword in COMPLEX_KEYWORDS {
        if normalized.contains(keyword) {
            score += 3;
        }
    }

    // Every question mark past the first signals a multi-part query.
    score += normalized.matches('?').count().saturating_sub(1);

    for keyword in CONDITIONAL_KEYWORDS {
        score += normalized.matches(keyword).count();
    }

    if score >= COMPLEX_THRESHOLD {
        ComplexityLevel::Complex
    } else if score >= MODERATE_THRESHOLD {
        ComplexityLevel::Moderate
    } else {
        ComplexityLevel::Simple
    }
}

fn normalize(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
