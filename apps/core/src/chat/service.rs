//! Chat orchestration: route, answer, degrade, cache.

use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use super::models::{ChatResponse, ViewportContent, ViewportKind};
use super::personas::{Personas, AGENT_TEMPERATURE};
use super::strategic_fit::{extract_analysis, failed_analysis, is_job_analysis};
use crate::actors::messages::AppError;
use crate::actors::traits::LlmActor;
use crate::cache::{CacheStats, QueryCache};
use crate::config::MAX_MESSAGE_CHARS;
use crate::fallback::{self, no_match_reply};
use crate::routing::{Agent, QueryRouter, RouteDecision};

type CacheKey = (Agent, String);

/// Answers chat messages. Never fails: model problems degrade to canned text.
pub struct ChatService<L: LlmActor> {
    router: QueryRouter,
    llm: Option<Arc<L>>,
    personas: Personas,
    cache: Mutex<QueryCache<CacheKey, ChatResponse>>,
    agent_timeout: Duration,
}

impl<L: LlmActor> ChatService<L> {
    pub fn new(
        router: QueryRouter,
        llm: Option<Arc<L>>,
        personas: Personas,
        cache: QueryCache<CacheKey, ChatResponse>,
        agent_timeout: Duration,
    ) -> Self {
        Self {
            router,
            llm,
            personas,
            cache: Mutex::new(cache),
            agent_timeout,
        }
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache().stats()
    }

    fn cache(&self) -> MutexGuard<'_, QueryCache<CacheKey, ChatResponse>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[instrument(skip_all, fields(message_chars = message.chars().count()))]
    pub async fn handle(&self, message: &str, context: Option<&Value>) -> ChatResponse {
        let query = message.trim();

        if query.is_empty() {
            warn!("Empty message received");
            return ChatResponse::rejected("Please provide a message for me to process.", "Empty message");
        }
        if query.chars().count() > MAX_MESSAGE_CHARS {
            warn!("Message too long");
            return ChatResponse::rejected(
                "Message is too long. Please keep it under 10,000 characters.",
                "Message too long",
            );
        }

        let decision = self.router.route(query).await;
        let key = (decision.agent, query.to_lowercase());

        let hit = self.cache().get(&key);
        if let Some(mut cached) = hit {
            debug!(agent = %decision.agent, "Cache hit");
            cached.cached = true;
            cached.routing = Some(decision);
            return cached;
        }

        let Some(llm) = &self.llm else {
            return self.degraded(query, decision);
        };

        let start = Instant::now();
        let reply = match self.ask_agent(llm, decision.agent, query, context).await {
            Ok(text) => text,
            Err(e) => {
                warn!(agent = %decision.agent, error = %e, "Agent call failed, serving fallback");
                return self.degraded(query, decision);
            }
        };

        let response = build_response(decision, query, reply, start.elapsed());
        info!(
            agent = %decision.agent,
            tier = %decision.tier,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Chat answered"
        );

        self.cache().insert(key, response.clone());
        response
    }

    async fn ask_agent(
        &self,
        llm: &Arc<L>,
        agent: Agent,
        query: &str,
        context: Option<&Value>,
    ) -> Result<String, AppError> {
        let context = context
            .map(serde_json::to_string_pretty)
            .transpose()?
            .unwrap_or_else(|| "{}".to_string());
        let prompt = format!("User Query: {}\nContext: {}", query, context);

        let reply = timeout(
            self.agent_timeout,
            llm.generate_with_params(
                prompt,
                Some(self.personas.prompt(agent).to_string()),
                Some(AGENT_TEMPERATURE),
            ),
        )
        .await??;

        let reply = reply.trim();
        if reply.is_empty() {
            return Err(AppError::Internal("Empty response from model".to_string()));
        }
        Ok(reply.to_string())
    }

    /// Canned answer for when the model cannot be used.
    fn degraded(&self, query: &str, decision: RouteDecision) -> ChatResponse {
        let mut viewport = ViewportContent::new(ViewportKind::Fallback);
        viewport.agent = Some(decision.agent.display_name().to_string());

        let text = match fallback::respond(query) {
            Some(canned) => {
                viewport.category = Some(canned.category);
                canned.text.to_string()
            }
            None => no_match_reply(&mut rand::thread_rng()),
        };
        viewport.content = Some(text.clone());

        ChatResponse {
            agent_used: Some(decision.agent.display_name().to_string()),
            viewport_content: Some(viewport),
            routing: Some(decision),
            ..ChatResponse::text(text)
        }
    }
}

fn build_response(decision: RouteDecision, query: &str, reply: String, elapsed: Duration) -> ChatResponse {
    let agent = decision.agent;
    let kind = match agent {
        Agent::Project => ViewportKind::ProjectInfo,
        Agent::StrategicFit if is_job_analysis(query) => ViewportKind::StrategicFitAnalysis,
        Agent::StrategicFit => ViewportKind::StrategicAnalysis,
        _ => ViewportKind::Text,
    };

    let mut viewport = ViewportContent::new(kind);
    viewport.agent = Some(agent.display_name().to_string());
    viewport.content = Some(reply.clone());

    let mut response = ChatResponse {
        agent_used: Some(agent.display_name().to_string()),
        routing: Some(decision),
        ..ChatResponse::text(reply)
    };

    if kind == ViewportKind::StrategicFitAnalysis {
        let analysis = extract_analysis(&response.response)
            .unwrap_or_else(|| failed_analysis(elapsed.as_secs_f64()));
        viewport.kanban_data = Some(analysis.kanban_data.clone());
        viewport.summary_data = Some(analysis.summary_data.clone());
        response.kanban_data = Some(analysis.kanban_data);
        response.summary_data = Some(analysis.summary_data);
        response.match_score = Some(analysis.match_score);
    }

    response.viewport_content = Some(viewport);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteTier;

    fn decision(agent: Agent) -> RouteDecision {
        RouteDecision::new(agent, 0.5, RouteTier::Keyword)
    }

    #[test]
    fn test_viewport_kinds() {
        let project = build_response(decision(Agent::Project), "q", "a".into(), Duration::ZERO);
        assert_eq!(project.viewport_content.unwrap().kind, ViewportKind::ProjectInfo);

        let general = build_response(decision(Agent::StrategicFit), "am I a fit?", "a".into(), Duration::ZERO);
        assert_eq!(general.viewport_content.unwrap().kind, ViewportKind::StrategicAnalysis);
        assert!(general.kanban_data.is_none());

        let career = build_response(decision(Agent::Career), "q", "a".into(), Duration::ZERO);
        assert_eq!(career.viewport_content.unwrap().kind, ViewportKind::Text);
    }

    #[test]
    fn test_job_analysis_without_json_gets_default_structure() {
        let response = build_response(
            decision(Agent::StrategicFit),
            "job description: rust engineer",
            "I could not produce JSON.".into(),
            Duration::from_millis(1500),
        );
        assert_eq!(response.match_score.as_deref(), Some("0%"));
        let summary = response.summary_data.unwrap();
        assert_eq!(summary.overall_match, "Analysis Failed");
        assert_eq!(summary.processing_time, "1.5s");
        let viewport = response.viewport_content.unwrap();
        assert_eq!(viewport.kind, ViewportKind::StrategicFitAnalysis);
        assert!(viewport.kanban_data.is_some());
    }
}
