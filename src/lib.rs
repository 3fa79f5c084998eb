//! Prism library crate (used by the host application and integration tests).
//!
//! Prism answers multi-part document-Q&A questions in three phases: a
//! deterministic decomposition of the query into bounded sub-requests, a
//! TTL'd dual-backend cache for decompositions and sub-responses, and a
//! rerank/synthesis pass that assembles whatever responses have landed into
//! one scored answer.
//!
//! # Public API Surface
//!
//! ## Decomposition
//! - [`Decomposer`], [`DecomposerConfig`] - Query splitting
//! - [`DecompositionResult`], [`SubRequest`] - Decomposition value objects
//! - [`classify`], [`ComplexityLevel`] - Lexical complexity heuristic
//!
//! ## Caching
//! - [`CacheStore`] - Dual-backend store with typed wrappers
//! - [`KvBackend`], [`RestBackend`], [`MemoryBackend`] - Backend contract
//! - [`CachedComponent`] - Cached sub-response / placeholder
//!
//! ## Assembly
//! - [`Pipeline`], [`PipelineResult`], [`PipelineError`] - Orchestration
//! - [`Dispatcher`], [`GenerationBackend`] - Fan-out to generation
//! - [`Reranker`], [`RerankedComponent`] - Relevance ordering
//! - [`Synthesizer`], [`SynthesizedResponse`] - Answer merging
//! - [`RelevanceScorer`] - Query/candidate scoring
//!
//! ## Utilities
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//! - [`ModelRouter`] - Complexity-based model routing
//! - Hashing functions for user-scoped cache keys
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod classify;
pub mod config;
pub mod constants;
pub mod decompose;
pub mod hashing;
pub mod pipeline;
pub mod rerank;
pub mod routing;
pub mod scoring;
pub mod synthesis;

pub use cache::{
    CacheError, CacheResult, CacheStore, CachedComponent, KvBackend, MemoryBackend, RestBackend,
};
#[cfg(any(test, feature = "mock"))]
pub use cache::UnreachableBackend;

pub use classify::{
    COMPLEX_KEYWORDS, CONDITIONAL_KEYWORDS, ComplexityLevel, MODERATE_KEYWORDS, SIMPLE_KEYWORDS,
    classify,
};
pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_DECOMPOSITION_TTL_SECS, DEFAULT_MAX_SUB_REQUESTS, DEFAULT_MIN_DECOMPOSE_TOKENS,
    DEFAULT_NAMESPACE, DEFAULT_SUBRESPONSE_TTL_SECS, MAX_SYNTHESIS_COMPONENTS,
};
pub use decompose::{
    CONNECTIVE_SPLIT_CONFIDENCE, Decomposer, DecomposerConfig, DecompositionResult,
    SENTENCE_SPLIT_CONFIDENCE, SubRequest,
};
pub use hashing::{cache_key, normalize_query, query_digest};
#[cfg(any(test, feature = "mock"))]
pub use pipeline::MockGenerationBackend;
pub use pipeline::{
    Dispatcher, GeneratedText, GenerationBackend, GenerationError, Pipeline, PipelineError,
    PipelineResult,
};
pub use rerank::{RerankedComponent, Reranker};
pub use routing::ModelRouter;
pub use scoring::{RelevanceScorer, sequence_similarity, token_overlap};
pub use synthesis::{SynthesizedResponse, Synthesizer};
