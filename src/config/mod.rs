//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `PRISM_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;

use crate::constants::{
    DEFAULT_COMPLEX_MODEL, DEFAULT_DECOMPOSITION_TTL_SECS, DEFAULT_MAX_SUB_REQUESTS,
    DEFAULT_MIN_DECOMPOSE_TOKENS, DEFAULT_MODERATE_MODEL, DEFAULT_NAMESPACE,
    DEFAULT_SIMPLE_MODEL, DEFAULT_SUBRESPONSE_TTL_SECS,
};
use crate::decompose::DecomposerConfig;
use crate::routing::ModelRouter;

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `PRISM_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the networked cache service. `None` runs in-process only.
    pub cache_url: Option<String>,

    /// Namespace prefix for every cache key. Default: `prism`.
    pub cache_namespace: String,

    /// TTL for cached decompositions, in seconds. Default: `3600`.
    pub decomposition_ttl_secs: u64,

    /// TTL for cached sub-responses, in seconds. Default: `1800`.
    pub subresponse_ttl_secs: u64,

    /// Upper bound on sub-requests per decomposition. Default: `5`.
    pub max_sub_requests: usize,

    /// Minimum normalized token count before a query is split. Default: `15`.
    pub min_decompose_tokens: usize,

    /// Model identifier for simple queries.
    pub simple_model: String,

    /// Model identifier for moderate queries.
    pub moderate_model: String,

    /// Model identifier for complex queries.
    pub complex_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_url: None,
            cache_namespace: DEFAULT_NAMESPACE.to_string(),
            decomposition_ttl_secs: DEFAULT_DECOMPOSITION_TTL_SECS,
            subresponse_ttl_secs: DEFAULT_SUBRESPONSE_TTL_SECS,
            max_sub_requests: DEFAULT_MAX_SUB_REQUESTS,
            min_decompose_tokens: DEFAULT_MIN_DECOMPOSE_TOKENS,
            simple_model: DEFAULT_SIMPLE_MODEL.to_string(),
            moderate_model: DEFAULT_MODERATE_MODEL.to_string(),
            complex_model: DEFAULT_COMPLEX_MODEL.to_string(),
        }
    }
}

impl Config {
    const ENV_CACHE_URL: &'static str = "PRISM_CACHE_URL";
    const ENV_CACHE_NAMESPACE: &'static str = "PRISM_CACHE_NAMESPACE";
    const ENV_DECOMPOSITION_TTL: &'static str = "PRISM_DECOMPOSITION_TTL_SECS";
    const ENV_SUBRESPONSE_TTL: &'static str = "PRISM_SUBRESPONSE_TTL_SECS";
    const ENV_MAX_SUB_REQUESTS: &'static str = "PRISM_MAX_SUB_REQUESTS";
    const ENV_MIN_DECOMPOSE_TOKENS: &'static str = "PRISM_MIN_DECOMPOSE_TOKENS";
    const ENV_SIMPLE_MODEL: &'static str = "PRISM_SIMPLE_MODEL";
    const ENV_MODERATE_MODEL: &'static str = "PRISM_MODERATE_MODEL";
    const ENV_COMPLEX_MODEL: &'static str = "PRISM_COMPLEX_MODEL";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            cache_url: Self::parse_optional_string_from_env(Self::ENV_CACHE_URL),
            cache_namespace: Self::parse_string_from_env(
                Self::ENV_CACHE_NAMESPACE,
                defaults.cache_namespace,
            ),
            decomposition_ttl_secs: Self::parse_u64_from_env(
                Self::ENV_DECOMPOSITION_TTL,
                defaults.decomposition_ttl_secs,
            )?,
            subresponse_ttl_secs: Self::parse_u64_from_env(
                Self::ENV_SUBRESPONSE_TTL,
                defaults.subresponse_ttl_secs,
            )?,
            max_sub_requests: Self::parse_usize_from_env(
                Self::ENV_MAX_SUB_REQUESTS,
                defaults.max_sub_requests,
            )?,
            min_decompose_tokens: Self::parse_usize_from_env(
                Self::ENV_MIN_DECOMPOSE_TOKENS,
                defaults.min_decompose_tokens,
            )?,
            simple_model: Self::parse_string_from_env(
                Self::ENV_SIMPLE_MODEL,
                defaults.simple_model,
            ),
            moderate_model: Self::parse_string_from_env(
                Self::ENV_MODERATE_MODEL,
                defaults.moderate_model,
            ),
            complex_model: Self::parse_string_from_env(
                Self::ENV_COMPLEX_MODEL,
                defaults.complex_model,
            ),
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sub_requests == 0 {
            return Err(ConfigError::InvalidMaxSubRequests {
                value: self.max_sub_requests,
            });
        }

        if self.cache_namespace.is_empty() || self.cache_namespace.contains(':') {
            return Err(ConfigError::InvalidNamespace {
                value: self.cache_namespace.clone(),
            });
        }

        for (level, model) in [
            ("simple", &self.simple_model),
            ("moderate", &self.moderate_model),
            ("complex", &self.complex_model),
        ] {
            if model.trim().is_empty() {
                return Err(ConfigError::EmptyModelId { level });
            }
        }

        Ok(())
    }

    /// Builds the decomposer configuration slice of this config.
    pub fn decomposer_config(&self) -> DecomposerConfig {
        DecomposerConfig {
            namespace: self.cache_namespace.clone(),
            max_sub_requests: self.max_sub_requests,
            min_decompose_tokens: self.min_decompose_tokens,
        }
    }

    /// Builds the model routing table of this config.
    pub fn model_router(&self) -> ModelRouter {
        ModelRouter::new(&self.simple_model, &self.moderate_model, &self.complex_model)
    }

    fn parse_string_from_env(var_name: &'static str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &'static str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::ParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|e| ConfigError::ParseError {
                name: var_name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }
}
