//! Router Tests
//!
//! Tier ordering, delegation and the degraded paths of the query router.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::mocks::{MockClassifier, MockLlmActor};
use crate::routing::{Agent, LlmClassifier, QueryRouter, RouteTier};

fn router_with(classifier: Arc<MockClassifier>) -> QueryRouter {
    QueryRouter::new().with_delegator(classifier)
}

#[tokio::test]
async fn test_prefix_never_consults_delegator() {
    // Arrange
    let classifier = Arc::new(MockClassifier::label("career"));
    let router = router_with(classifier.clone());

    // Act
    let decision = router
        .route("Analyze this job description for strategic fit: Senior ML engineer, Python, AWS")
        .await;

    // Assert
    assert_eq!(decision.agent, Agent::StrategicFit);
    assert_eq!(decision.tier, RouteTier::Prefix);
    assert_eq!(decision.confidence, 1.0);
    assert_eq!(classifier.call_count(), 0);
}

#[tokio::test]
async fn test_fast_path_never_consults_delegator() {
    let classifier = Arc::new(MockClassifier::label("career"));
    let router = router_with(classifier.clone());

    let decision = router
        .route("Show me a github project case study with the architecture")
        .await;

    assert_eq!(decision.agent, Agent::Project);
    assert_eq!(decision.tier, RouteTier::Keyword);
    assert_eq!(classifier.call_count(), 0);
}

#[tokio::test]
async fn test_ambiguous_query_is_delegated() {
    // Arrange: nothing in the keyword table matches
    let classifier = Arc::new(MockClassifier::label("career"));
    let router = router_with(classifier.clone());

    // Act
    let decision = router.route("hello there").await;

    // Assert
    assert_eq!(decision.agent, Agent::Career);
    assert_eq!(decision.tier, RouteTier::Llm);
    assert_eq!(decision.confidence, 0.0);
    assert_eq!(classifier.call_count(), 1);
}

#[tokio::test]
async fn test_delegated_label_is_normalised() {
    let router = router_with(Arc::new(MockClassifier::label("  Demo\n")));

    let decision = router.route("hello there").await;

    assert_eq!(decision.agent, Agent::Demo);
    assert_eq!(decision.tier, RouteTier::Llm);
}

#[tokio::test]
async fn test_delegated_confidence_is_keyword_evidence_for_choice() {
    // "Any career advice?" scores career at 2.0 (below the fast path)
    let router = router_with(Arc::new(MockClassifier::label("career")));

    let decision = router.route("Any career advice?").await;

    assert_eq!(decision.agent, Agent::Career);
    assert_eq!(decision.tier, RouteTier::Llm);
    assert!((decision.confidence - 2.0 / 3.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_unknown_label_falls_back_to_keywords() {
    let classifier = Arc::new(MockClassifier::label("marketing"));
    let router = router_with(classifier.clone());

    let decision = router.route("Any career advice?").await;

    assert_eq!(decision.agent, Agent::Career);
    assert_eq!(decision.tier, RouteTier::KeywordFallback);
    assert_eq!(classifier.call_count(), 1);
}

#[tokio::test]
async fn test_delegator_failure_falls_back_to_keywords() {
    let router = router_with(Arc::new(MockClassifier::failing()));

    let decision = router.route("Do you have a github?").await;

    assert_eq!(decision.agent, Agent::Project);
    assert_eq!(decision.tier, RouteTier::KeywordFallback);
    assert!((decision.confidence - 1.0 / 3.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_delegator_timeout_falls_back_to_keywords() {
    // Arrange
    let router = router_with(Arc::new(MockClassifier::slow(Duration::from_secs(5), "demo")))
        .with_timeout(Duration::from_millis(50));

    // Act
    let start = Instant::now();
    let decision = router.route("Do you have a github?").await;

    // Assert
    assert!(start.elapsed() < Duration::from_secs(2), "timeout should cut the call short");
    assert_eq!(decision.agent, Agent::Project);
    assert_eq!(decision.tier, RouteTier::KeywordFallback);
}

#[tokio::test]
async fn test_keywords_past_scan_window_are_ignored() {
    // Keywords beyond the first 200 characters do not count
    let hidden = format!("{} github project case study", "x".repeat(200));
    let visible = format!("{} github", "x".repeat(190));
    let router = QueryRouter::new();

    let hidden_decision = router.route(&hidden).await;
    let visible_decision = router.route(&visible).await;

    assert_eq!(hidden_decision.agent, Agent::Profile);
    assert_eq!(hidden_decision.confidence, 0.0);
    assert_eq!(visible_decision.agent, Agent::Project);
    assert!(visible_decision.confidence > 0.0);
}

#[tokio::test]
async fn test_phrase_ending_on_last_scanned_char_counts() {
    // Arrange: "github" occupies characters 195..=200
    let at_edge = format!("{}github", "x".repeat(194));
    let past_edge = format!("{}github", "x".repeat(195));
    assert_eq!(at_edge.chars().count(), 200);
    assert_eq!(past_edge.chars().count(), 201);
    let router = QueryRouter::new();

    // Act
    let counted = router.route(&at_edge).await;
    let cut = router.route(&past_edge).await;

    // Assert
    assert_eq!(counted.agent, Agent::Project);
    assert!((counted.confidence - 1.0 / 3.0).abs() < 1e-6);
    assert_eq!(cut.agent, Agent::Profile);
    assert_eq!(cut.confidence, 0.0);
}

#[tokio::test]
async fn test_prefix_ignores_scan_window() {
    let query = format!(
        "Here is a job description: {} we need a mentor for career growth",
        "lorem ipsum ".repeat(30)
    );
    let router = QueryRouter::new();

    let decision = router.route(&query).await;

    assert_eq!(decision.tier, RouteTier::Prefix);
    assert_eq!(decision.agent, Agent::StrategicFit);
}

#[tokio::test]
async fn test_llm_classifier_drives_routing() {
    // Arrange: the classifier is backed by a mock model
    let llm = Arc::new(MockLlmActor::new("project"));
    let router = QueryRouter::new().with_delegator(Arc::new(LlmClassifier::new(llm.clone())));

    // Act
    let decision = router.route("hello there").await;

    // Assert
    assert_eq!(decision.agent, Agent::Project);
    assert_eq!(decision.tier, RouteTier::Llm);
    assert_eq!(llm.call_count(), 1);
    let instructions = llm.last_system_prompt().unwrap_or_default();
    assert!(instructions.contains("strategic_fit"));
}

#[tokio::test]
async fn test_llm_classifier_failure_falls_back() {
    let llm = Arc::new(MockLlmActor::failing());
    let router = QueryRouter::new().with_delegator(Arc::new(LlmClassifier::new(llm)));

    let decision = router.route("Let's walk me through it").await;

    assert_eq!(decision.agent, Agent::Demo);
    assert_eq!(decision.tier, RouteTier::KeywordFallback);
}
