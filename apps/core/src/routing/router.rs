//! Query Router - tiered agent selection.
//!
//! Tiers, cheapest and most certain first:
//! 1. Lead-in prefix match on the full query (no network)
//! 2. Weighted keyword scoring on the first 200 characters
//! 3. Model delegation when keyword confidence is not above 0.8
//!
//! Delegation failures never escape: the keyword result is returned instead.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use super::agent::Agent;
use super::decision::{RouteDecision, RouteTier};
use super::delegator::QueryClassifier;
use super::keywords::{KeywordMatch, KeywordMatcher};
use super::prefix::PrefixMatcher;

/// Characters of the query the keyword tier looks at.
pub const KEYWORD_SCAN_CHARS: usize = 200;
/// Keyword confidence strictly above this skips delegation.
pub const FAST_PATH_THRESHOLD: f32 = 0.8;
/// Keyword confidence strictly above this is kept as a warm fallback.
pub const FALLBACK_THRESHOLD: f32 = 0.5;
/// Default upper bound on a delegation round trip.
pub const DEFAULT_DELEGATE_TIMEOUT: Duration = Duration::from_secs(15);

/// Returns the first `max_chars` Unicode scalar values of `text`.
pub fn scan_window(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Routes queries to agents.
pub struct QueryRouter {
    prefix: PrefixMatcher,
    keywords: KeywordMatcher,
    delegator: Option<Arc<dyn QueryClassifier>>,
    delegate_timeout: Duration,
}

impl Default for QueryRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryRouter {
    /// Router without a delegator; ambiguous queries keep their keyword result.
    pub fn new() -> Self {
        Self {
            prefix: PrefixMatcher::new(),
            keywords: KeywordMatcher::new(),
            delegator: None,
            delegate_timeout: DEFAULT_DELEGATE_TIMEOUT,
        }
    }

    pub fn with_delegator(mut self, delegator: Arc<dyn QueryClassifier>) -> Self {
        self.delegator = Some(delegator);
        self
    }

    pub fn with_timeout(mut self, delegate_timeout: Duration) -> Self {
        self.delegate_timeout = delegate_timeout;
        self
    }

    pub fn has_delegator(&self) -> bool {
        self.delegator.is_some()
    }

    /// Keyword tier alone, over the bounded scan window.
    pub fn keyword_route(&self, query: &str) -> KeywordMatch {
        self.keywords.score(scan_window(query, KEYWORD_SCAN_CHARS))
    }

    /// Picks an agent for `query`. Never fails.
    #[instrument(skip(self, query), fields(query_chars = query.chars().count()))]
    pub async fn route(&self, query: &str) -> RouteDecision {
        let start = Instant::now();

        // Tier 1: lead-in prefix
        if let Some((agent, prefix)) = self.prefix.match_prefix(query) {
            info!(%agent, prefix, "Routed by prefix");
            return RouteDecision::new(agent, 1.0, RouteTier::Prefix);
        }

        // Tier 2: keyword scoring
        let keyword = self.keyword_route(query);
        debug!(
            agent = %keyword.agent,
            confidence = keyword.confidence,
            matched = ?keyword.matched,
            "Keyword scores computed"
        );

        if keyword.confidence > FAST_PATH_THRESHOLD {
            info!(agent = %keyword.agent, confidence = keyword.confidence, "Routed by keywords (fast path)");
            return RouteDecision::new(keyword.agent, keyword.confidence, RouteTier::Keyword);
        }

        if keyword.confidence > FALLBACK_THRESHOLD {
            debug!(agent = %keyword.agent, "Keyword result kept as fallback");
        }

        let fallback = RouteDecision::new(keyword.agent, keyword.confidence, RouteTier::KeywordFallback);

        // Tier 3: delegation
        let Some(delegator) = &self.delegator else {
            debug!("No delegator configured, using keyword result");
            return fallback;
        };

        match timeout(self.delegate_timeout, delegator.classify(query)).await {
            Ok(Ok(label)) => match label.parse::<Agent>() {
                Ok(agent) => {
                    info!(
                        %agent,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Routed by model"
                    );
                    RouteDecision::new(agent, keyword.confidence_for(agent), RouteTier::Llm)
                }
                Err(e) => {
                    warn!(error = %e, fallback = %fallback.agent, "Model returned an unknown agent");
                    fallback
                }
            },
            Ok(Err(e)) => {
                warn!(error = %e, fallback = %fallback.agent, "Model routing failed");
                fallback
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.delegate_timeout.as_millis() as u64,
                    fallback = %fallback.agent,
                    "Model routing timed out"
                );
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_window_counts_characters_not_bytes() {
        let text = "é".repeat(250);
        let window = scan_window(&text, KEYWORD_SCAN_CHARS);
        assert_eq!(window.chars().count(), 200);
        assert_eq!(window.len(), 400);
    }

    #[test]
    fn test_scan_window_short_text_unchanged() {
        assert_eq!(scan_window("demo", KEYWORD_SCAN_CHARS), "demo");
        assert_eq!(scan_window("", KEYWORD_SCAN_CHARS), "");
    }

    #[tokio::test]
    async fn test_route_without_delegator_uses_keyword_fallback() {
        let router = QueryRouter::new();
        let decision = router.route("Do you have a github?").await;
        assert_eq!(decision.agent, Agent::Project);
        assert_eq!(decision.tier, RouteTier::KeywordFallback);
        assert!(!router.has_delegator());
    }

    #[tokio::test]
    async fn test_route_prefix_short_circuits() {
        let router = QueryRouter::new();
        let decision = router
            .route("Analyze this job description: we need someone with a github project portfolio")
            .await;
        assert_eq!(decision.agent, Agent::StrategicFit);
        assert_eq!(decision.tier, RouteTier::Prefix);
        assert_eq!(decision.confidence, 1.0);
    }

    #[tokio::test]
    async fn test_route_fast_path() {
        let router = QueryRouter::new();
        let decision = router
            .route("Show me a github project case study with the architecture")
            .await;
        assert_eq!(decision.agent, Agent::Project);
        assert_eq!(decision.tier, RouteTier::Keyword);
        assert!(decision.confidence > FAST_PATH_THRESHOLD);
    }
}
