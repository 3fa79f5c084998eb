//! Contract tests for key derivation, classification, and decomposition
//! bounds across the public API.

mod common;

use common::fixtures::eager_decomposer;
use prism::classify::{ComplexityLevel, classify};
use prism::decompose::Decomposer;
use prism::hashing::{cache_key, normalize_query};

#[test]
fn test_cache_keys_are_deterministic() {
    let decomposer = Decomposer::default();
    for query in [
        "What is FlexNet?",
        "  What is FlexNet?   ",
        "Design a monitoring strategy.",
        "",
    ] {
        for user_id in [1u64, 2, 999] {
            assert_eq!(
                decomposer.generate_cache_key(query, user_id),
                decomposer.generate_cache_key(query, user_id)
            );
        }
    }
}

#[test]
fn test_whitespace_variants_share_a_key() {
    let decomposer = Decomposer::default();
    assert_eq!(
        decomposer.generate_cache_key("What is X?", 1),
        decomposer.generate_cache_key("  What is X?   ", 1)
    );
}

#[test]
fn test_users_are_isolated() {
    let decomposer = Decomposer::default();
    assert_ne!(
        decomposer.generate_cache_key("Q", 1),
        decomposer.generate_cache_key("Q", 2)
    );
}

#[test]
fn test_normalization_is_shared_between_key_paths() {
    // The free function and the decomposer agree on normalization.
    assert_eq!(
        cache_key("prism", &normalize_query("  What is X?  "), 1),
        Decomposer::default().generate_cache_key("What is X?", 1)
    );
}

#[test]
fn test_classification_fixtures() {
    assert_eq!(classify("What is FlexNet?"), ComplexityLevel::Simple);
    assert_eq!(
        classify(
            "Design a comprehensive monitoring and alerting strategy for 50,000 endpoints \
             including escalation, redundancy, and cost tradeoffs."
        ),
        ComplexityLevel::Complex
    );
}

#[test]
fn test_classification_is_repeatable() {
    for query in [
        "What is FlexNet?",
        "Compare seat-based and usage-based licensing.",
        "Design a failover strategy.",
    ] {
        assert_eq!(classify(query), classify(query));
    }
}

#[test]
fn test_decomposition_invariants_hold_broadly() {
    let decomposer = eager_decomposer();
    let queries = [
        "",
        "One",
        "What is FlexNet?",
        "What is FlexNet? How does it work?",
        "alpha one and beta two and gamma three and delta four and epsilon five and zeta six \
         and eta seven and theta eight",
        "Explain licensing. Describe checkout. Summarize renewals. Compare tiers. \
         Evaluate costs. Assess risks. Design failover.",
    ];

    for query in queries {
        for user_id in [1u64, 42] {
            let result = decomposer.decompose(query, user_id);

            assert_eq!(result.total_sub_requests, result.sub_requests.len());
            assert!(result.total_sub_requests <= decomposer.config().max_sub_requests);
            assert!(result.decomposition_confidence >= 0.5);
            assert!(result.decomposition_confidence <= 1.0);
            if result.sub_requests.is_empty() {
                assert_eq!(result.decomposition_confidence, 1.0);
                assert!(!result.needs_decomposition);
            } else {
                assert!(result.needs_decomposition);
            }
            assert_eq!(result.original_query, query);
            assert_eq!(
                result.query_hash,
                decomposer.generate_cache_key(query, user_id)
            );
        }
    }
}

#[test]
fn test_decomposition_preserves_order() {
    let decomposer = eager_decomposer();
    let result = decomposer.decompose(
        "Explain licensing. Describe checkout. Summarize renewals.",
        1,
    );

    let order: Vec<&str> = result
        .sub_requests
        .iter()
        .map(|s| s.sub_query.as_str())
        .collect();
    assert_eq!(
        order,
        [
            "Explain licensing",
            "Describe checkout",
            "Summarize renewals"
        ]
    );
}
