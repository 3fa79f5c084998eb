//! Complexity-based model routing.

use crate::classify::ComplexityLevel;
use crate::constants::{DEFAULT_COMPLEX_MODEL, DEFAULT_MODERATE_MODEL, DEFAULT_SIMPLE_MODEL};

/// Static lookup table from complexity level to generation model identifier.
///
/// The table is populated from configuration at startup; selection itself has
/// no side effects and cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRouter {
    simple_model: String,
    moderate_model: String,
    complex_model: String,
}

impl ModelRouter {
    /// Creates a router with explicit model identifiers.
    pub fn new(simple_model: &str, moderate_model: &str, complex_model: &str) -> Self {
        Self {
            simple_model: simple_model.to_string(),
            moderate_model: moderate_model.to_string(),
            complex_model: complex_model.to_string(),
        }
    }

    /// Returns the model identifier for a complexity level.
    #[inline]
    pub fn select_model(&self, level: ComplexityLevel) -> &str {
        match level {
            ComplexityLevel::Simple => &self.simple_model,
            ComplexityLevel::Moderate => &self.moderate_model,
            ComplexityLevel::Complex => &self.complex_model,
        }
    }
}

impl Default for ModelRouter {
    fn default() -> Self {
        Self::new(
            DEFAULT_SIMPLE_MODEL,
            DEFAULT_MODERATE_MODEL,
            DEFAULT_COMPLEX_MODEL,
        )
    }
}
