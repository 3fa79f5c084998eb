use super::*;
use crate::cache::CachedComponent;
use crate::rerank::RerankedComponent;

fn reranked(id: &str, response: &str, relevance: f32) -> RerankedComponent {
    RerankedComponent::new(
        CachedComponent {
            id: id.to_string(),
            sub_query: format!("sub-query for {id}"),
            response: response.to_string(),
            model: None,
            time_ms: 0,
            confidence: 1.0,
            cached: !response.is_empty(),
        },
        relevance,
    )
}

#[test]
fn test_empty_input_synthesizes_nothing() {
    let synthesizer = Synthesizer::new();
    let response = synthesizer.synthesize("query", Vec::new());

    assert_eq!(response.synthesized_text, "");
    assert_eq!(response.aggregate_relevance, 0.0);
    assert!(response.components.is_empty());
    assert_eq!(response.notes.len(), 1);
    assert!(response.notes[0].contains("No sub-responses"));
}

#[test]
fn test_placeholders_only_synthesizes_nothing() {
    let synthesizer = Synthesizer::new();
    let response = synthesizer.synthesize(
        "query",
        vec![reranked("a", "", 0.1), reranked("b", "", 0.3)],
    );

    assert_eq!(response.synthesized_text, "");
    assert!(response.notes[0].contains("No sub-responses"));
    // Aggregate still reflects the placeholder relevances.
    assert!((response.aggregate_relevance - 0.2).abs() < 1e-6);
}

#[test]
fn test_concatenates_in_rank_order_with_blank_lines() {
    let synthesizer = Synthesizer::new();
    let response = synthesizer.synthesize(
        "query",
        vec![
            reranked("a", "First answer.", 0.9),
            reranked("b", "Second answer.", 0.5),
        ],
    );

    assert_eq!(response.synthesized_text, "First answer.\n\nSecond answer.");
}

#[test]
fn test_skips_empty_responses_but_keeps_them_in_audit() {
    let synthesizer = Synthesizer::new();
    let response = synthesizer.synthesize(
        "query",
        vec![
            reranked("a", "Real answer.", 0.9),
            reranked("b", "", 0.2),
            reranked("c", "Another answer.", 0.6),
        ],
    );

    assert_eq!(response.synthesized_text, "Real answer.\n\nAnother answer.");
    assert_eq!(response.components.len(), 3);
    assert!(response.notes[0].contains('2'));
}

#[test]
fn test_caps_used_components() {
    let synthesizer = Synthesizer::new();
    let components: Vec<_> = (0..7)
        .map(|i| reranked(&format!("c{i}"), &format!("Answer {i}."), 0.9))
        .collect();

    let response = synthesizer.synthesize("query", components);

    assert_eq!(response.synthesized_text.matches("Answer").count(), 5);
    assert!(response.synthesized_text.contains("Answer 4."));
    assert!(!response.synthesized_text.contains("Answer 5."));
    assert!(response.notes[0].contains('5'));
    // All seven stay in the audit trail and in the aggregate.
    assert_eq!(response.components.len(), 7);
}

#[test]
fn test_aggregate_is_mean_over_all_components() {
    let synthesizer = Synthesizer::new();
    let response = synthesizer.synthesize(
        "query",
        vec![
            reranked("a", "One.", 0.9),
            reranked("b", "Two.", 0.6),
            reranked("c", "", 0.0),
        ],
    );

    assert!((response.aggregate_relevance - 0.5).abs() < 1e-6);
}

#[test]
fn test_notes_report_count_and_relevance() {
    let synthesizer = Synthesizer::new();
    let response = synthesizer.synthesize(
        "query",
        vec![reranked("a", "Only answer.", 0.75)],
    );

    assert_eq!(response.notes.len(), 2);
    assert!(response.notes[0].contains("1 sub-responses"));
    assert!(response.notes[1].contains("0.75"));
}

#[test]
fn test_custom_component_limit() {
    let synthesizer = Synthesizer::with_max_components(1);
    let response = synthesizer.synthesize(
        "query",
        vec![
            reranked("a", "Kept.", 0.9),
            reranked("b", "Dropped.", 0.8),
        ],
    );

    assert_eq!(response.synthesized_text, "Kept.");
}
