use serde::Serialize;
use std::fmt;

use super::agent::Agent;

/// Which routing stage produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTier {
    Prefix,
    Keyword,
    Llm,
    /// The delegator was skipped or failed; the keyword result stands.
    KeywordFallback,
}

impl RouteTier {
    pub fn label(&self) -> &'static str {
        match self {
            RouteTier::Prefix => "prefix",
            RouteTier::Keyword => "keyword",
            RouteTier::Llm => "llm",
            RouteTier::KeywordFallback => "keyword_fallback",
        }
    }
}

impl fmt::Display for RouteTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The router's answer for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteDecision {
    pub agent: Agent,
    /// Always within `[0.0, 1.0]`.
    pub confidence: f32,
    pub tier: RouteTier,
}

impl RouteDecision {
    pub fn new(agent: Agent, confidence: f32, tier: RouteTier) -> Self {
        Self {
            agent,
            confidence: confidence.clamp(0.0, 1.0),
            tier,
        }
    }
}
