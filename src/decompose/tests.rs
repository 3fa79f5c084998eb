use super::*;

fn eager() -> Decomposer {
    Decomposer::new(DecomposerConfig {
        min_decompose_tokens: 4,
        ..DecomposerConfig::default()
    })
}

#[test]
fn test_short_query_is_not_decomposed() {
    let decomposer = Decomposer::default();
    let result = decomposer.decompose("What is FlexNet?", 1);

    assert!(result.sub_requests.is_empty());
    assert_eq!(result.total_sub_requests, 0);
    assert!(!result.needs_decomposition);
    assert_eq!(result.decomposition_confidence, 1.0);
}

#[test]
fn test_empty_query_is_total() {
    let decomposer = Decomposer::default();
    let result = decomposer.decompose("", 1);

    assert!(result.sub_requests.is_empty());
    assert_eq!(result.decomposition_confidence, 1.0);
    assert!(result.query_hash.starts_with("prism:"));
}

#[test]
fn test_sentence_split() {
    let decomposer = eager();
    let result = decomposer.decompose("What is FlexNet? How does it work?", 1);

    assert_eq!(result.total_sub_requests, 2);
    assert_eq!(result.sub_requests.len(), 2);
    assert!(result.needs_decomposition);
    assert_eq!(result.sub_requests[0].sub_query, "What is FlexNet");
    assert_eq!(result.sub_requests[1].sub_query, "How does it work");
    for sub in &result.sub_requests {
        assert_eq!(sub.confidence, SENTENCE_SPLIT_CONFIDENCE);
        assert_eq!(sub.original_query, "What is FlexNet? How does it work?");
    }
}

#[test]
fn test_connective_split() {
    let decomposer = Decomposer::default();
    let query = "Explain the deployment pipeline for the billing service and describe \
                 the rollback procedure for failed releases in production";
    let result = decomposer.decompose(query, 1);

    assert_eq!(result.total_sub_requests, 2);
    for sub in &result.sub_requests {
        assert_eq!(sub.confidence, CONNECTIVE_SPLIT_CONFIDENCE);
    }
    assert!(result.sub_requests[0].sub_query.starts_with("Explain"));
    assert!(result.sub_requests[1].sub_query.starts_with("describe"));
}

#[test]
fn test_or_connective_split() {
    let decomposer = eager();
    let result = decomposer.decompose("Renew the license early or wait for the grace period", 1);

    assert_eq!(result.total_sub_requests, 2);
    assert_eq!(result.sub_requests[1].sub_query, "wait for the grace period");
}

#[test]
fn test_single_focused_sentence_stays_whole() {
    let decomposer = Decomposer::default();
    // 18 tokens, one terminator, no connectives.
    let query = "Please walk through every single configuration step that is required to \
                 bring the license server fully online today.";
    let result = decomposer.decompose(query, 1);

    assert!(result.sub_requests.is_empty());
    assert!(!result.needs_decomposition);
    assert_eq!(result.decomposition_confidence, 1.0);
}

#[test]
fn test_sub_request_ids_are_unique() {
    let decomposer = eager();
    let result = decomposer.decompose("What is FlexNet? How does it work? Who sells it?", 1);

    let ids: std::collections::HashSet<_> =
        result.sub_requests.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.len(), result.sub_requests.len());
}

#[test]
fn test_topic_is_leading_words() {
    let decomposer = eager();
    let result = decomposer.decompose(
        "Explain the license checkout flow end to end. Describe the heartbeat protocol.",
        1,
    );

    assert_eq!(result.sub_requests[0].topic, "Explain the license checkout");
    assert_eq!(result.sub_requests[1].topic, "Describe the heartbeat protocol");
}

#[test]
fn test_bound_is_enforced_by_merging() {
    let decomposer = Decomposer::default();
    let query = "alpha one and beta two and gamma three and delta four and epsilon five \
                 and zeta six and eta seven";
    let result = decomposer.decompose(query, 1);

    assert_eq!(result.sub_requests.len(), DEFAULT_MAX_SUB_REQUESTS);
    assert_eq!(result.total_sub_requests, DEFAULT_MAX_SUB_REQUESTS);
    assert!(result.needs_decomposition);

    // Merging keeps every original word.
    let joined: String = result
        .sub_requests
        .iter()
        .map(|s| s.sub_query.clone())
        .collect::<Vec<_>>()
        .join(" ");
    for word in ["alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta"] {
        assert!(joined.contains(word), "missing segment word {word}");
    }
}

#[test]
fn test_merge_keeps_minimum_confidence() {
    let decomposer = Decomposer::new(DecomposerConfig {
        max_sub_requests: 1,
        min_decompose_tokens: 4,
        ..DecomposerConfig::default()
    });
    let result = decomposer.decompose("What is FlexNet? How does it work?", 1);

    assert_eq!(result.sub_requests.len(), 1);
    assert_eq!(result.sub_requests[0].confidence, SENTENCE_SPLIT_CONFIDENCE);
    assert!(result.sub_requests[0].sub_query.contains("FlexNet"));
    assert!(result.sub_requests[0].sub_query.contains("work"));
}

#[test]
fn test_confidence_short_query_penalty() {
    let decomposer = eager();
    // 7 tokens (< 20): mean 0.8 * 0.9 = 0.72.
    let result = decomposer.decompose("What is FlexNet? How does it work?", 1);
    assert!((result.decomposition_confidence - 0.72).abs() < 1e-6);
}

#[test]
fn test_confidence_mid_length_query_unpenalized() {
    let decomposer = Decomposer::default();
    // 20 tokens: no penalty, mean stays 0.7.
    let query = "Explain the full deployment pipeline for the billing service and \
                 describe the complete rollback procedure for all failed production releases";
    assert_eq!(query.split_whitespace().count(), 20);

    let result = decomposer.decompose(query, 1);
    assert!((result.decomposition_confidence - 0.7).abs() < 1e-6);
}

#[test]
fn test_confidence_stays_in_range() {
    let decomposer = eager();
    for query in [
        "What is FlexNet? How does it work?",
        "alpha one and beta two and gamma three and delta four and epsilon five and zeta six",
        "Compare A and B. Evaluate C and D. Assess E and F. Design G.",
    ] {
        let result = decomposer.decompose(query, 1);
        assert!(result.decomposition_confidence >= 0.5);
        assert!(result.decomposition_confidence <= 1.0);
    }
}

#[test]
fn test_bound_invariant_holds_for_many_shapes() {
    let decomposer = eager();
    for query in [
        "",
        "What is FlexNet?",
        "What is FlexNet? How does it work? Who sells it? Where does it run? Why use it? \
         When did it ship? Which tier is best?",
        "a1 and a2 and a3 and a4 and a5 and a6 and a7 and a8 and a9 and a10",
    ] {
        let result = decomposer.decompose(query, 1);
        assert_eq!(result.total_sub_requests, result.sub_requests.len());
        assert!(result.total_sub_requests <= decomposer.config().max_sub_requests);
    }
}

#[test]
fn test_sub_request_complexity_is_per_segment() {
    let decomposer = eager();
    let result = decomposer.decompose(
        "What is FlexNet? Design a redundancy strategy to optimize the license servers.",
        1,
    );

    assert_eq!(result.sub_requests.len(), 2);
    assert_eq!(
        result.sub_requests[0].complexity,
        crate::classify::ComplexityLevel::Simple
    );
    assert_eq!(
        result.sub_requests[1].complexity,
        crate::classify::ComplexityLevel::Complex
    );
}

#[test]
fn test_query_hash_matches_generator() {
    let decomposer = Decomposer::default();
    let query = "What is FlexNet?";
    let result = decomposer.decompose(query, 9);
    assert_eq!(result.query_hash, decomposer.generate_cache_key(query, 9));
}
