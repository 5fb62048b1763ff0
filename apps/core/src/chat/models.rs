use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::strategic_fit::{KanbanData, SummaryData};
use crate::fallback::FallbackCategory;
use crate::routing::RouteDecision;

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<Value>,
}

/// What the frontend should render next to the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportKind {
    Text,
    ProjectInfo,
    StrategicFitAnalysis,
    StrategicAnalysis,
    /// Canned answer while the model is unavailable
    Fallback,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportContent {
    #[serde(rename = "type")]
    pub kind: ViewportKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FallbackCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanban_data: Option<KanbanData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_data: Option<SummaryData>,
}

impl ViewportContent {
    pub fn new(kind: ViewportKind) -> Self {
        Self {
            kind,
            agent: None,
            content: None,
            message: None,
            category: None,
            kanban_data: None,
            summary_data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(ViewportKind::Error)
        }
    }
}

/// Body returned by `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport_content: Option<ViewportContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kanban_data: Option<KanbanData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_data: Option<SummaryData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<RouteDecision>,
    /// True when served from the response cache.
    pub cached: bool,
}

impl ChatResponse {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            agent_used: None,
            viewport_content: None,
            kanban_data: None,
            summary_data: None,
            match_score: None,
            routing: None,
            cached: false,
        }
    }

    /// A user-facing reply for a request that could not be processed.
    pub fn rejected(response: &str, reason: &str) -> Self {
        Self {
            viewport_content: Some(ViewportContent::error(reason)),
            ..Self::text(response)
        }
    }
}
