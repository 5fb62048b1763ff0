use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tracing::{info, instrument, warn};

use super::error::ApiError;
use super::AppState;
use crate::actors::traits::LlmActor;
use crate::chat::{ChatRequest, ChatResponse};
use crate::portfolio::models::{Activity, Experience, Project, Publication, Skills};
use crate::portfolio::{PortfolioData, SearchHit};
use crate::rate_limiter::RateDecision;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Above this many tracked clients, idle ones are pruned on the next chat request.
const LIMITER_PRUNE_THRESHOLD: usize = 1024;

pub async fn root<L: LlmActor>(State(state): State<AppState<L>>) -> Json<Value> {
    Json(json!({
        "message": format!("{} Portfolio Assistant API", state.settings.portfolio_owner),
        "title": state.settings.portfolio_title,
        "version": VERSION,
        "status": "running",
    }))
}

pub async fn health<L: LlmActor>(State(state): State<AppState<L>>) -> Json<Value> {
    let report = &state.preflight;
    let status = if report.ready_to_start { "healthy" } else { "degraded" };
    Json(json!({
        "status": status,
        "llm_configured": state.chat.has_llm(),
        "fallback_mode": report.fallback_mode,
        "uptime_seconds": state.uptime_secs(),
        "version": VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "preflight": {
            "all_passed": report.all_passed,
            "summary": report.summary,
            "checks": report.checks,
        },
    }))
}

pub async fn metrics<L: LlmActor>(State(state): State<AppState<L>>) -> Json<Value> {
    let limiter = state.limiter();
    let rate_limiter = json!({
        "limit": limiter.limit(),
        "window_seconds": limiter.window().as_secs(),
        "tracked_clients": limiter.tracked_clients(),
    });
    drop(limiter);

    Json(json!({
        "requests": state.metrics.snapshot(),
        "cache": state.chat.cache_stats(),
        "rate_limiter": rate_limiter,
        "uptime_seconds": state.uptime_secs(),
    }))
}

#[instrument(skip_all)]
pub async fn chat<L: LlmActor>(
    State(state): State<AppState<L>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let client = client_key(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    let limited = {
        let mut limiter = state.limiter();
        if limiter.tracked_clients() > LIMITER_PRUNE_THRESHOLD {
            limiter.prune();
        }
        match limiter.check(&client) {
            RateDecision::Allowed { .. } => None,
            RateDecision::Limited { retry_after } => {
                Some(ApiError::rate_limited(limiter.limit(), limiter.window(), retry_after))
            }
        }
    };
    if let Some(err) = limited {
        warn!(%client, "Rate limit exceeded");
        return Err(err);
    }

    let Json(request) =
        payload.map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;

    let response = state.chat.handle(&request.message, request.context.as_ref()).await;
    info!(
        %client,
        agent = response.agent_used.as_deref().unwrap_or("none"),
        cached = response.cached,
        "Chat request served"
    );
    Ok(Json(response))
}

/// First `X-Forwarded-For` entry, else the peer IP.
fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn profile<L: LlmActor>(State(state): State<AppState<L>>) -> Json<Value> {
    Json(json!({
        "profile": state.store.profile(),
        "education": state.store.education(),
    }))
}

pub async fn projects<L: LlmActor>(State(state): State<AppState<L>>) -> Json<Vec<Project>> {
    Json(state.store.projects().to_vec())
}

pub async fn experience<L: LlmActor>(State(state): State<AppState<L>>) -> Json<Vec<Experience>> {
    Json(state.store.experience().to_vec())
}

pub async fn skills<L: LlmActor>(State(state): State<AppState<L>>) -> Json<Skills> {
    Json(state.store.skills().clone())
}

pub async fn publications<L: LlmActor>(State(state): State<AppState<L>>) -> Json<Vec<Publication>> {
    Json(state.store.publications().to_vec())
}

pub async fn activities<L: LlmActor>(State(state): State<AppState<L>>) -> Json<Vec<Activity>> {
    Json(state.store.activities().to_vec())
}

pub async fn portfolio_data<L: LlmActor>(State(state): State<AppState<L>>) -> Json<PortfolioData> {
    Json(state.store.data().clone())
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

pub async fn search<L: LlmActor>(
    State(state): State<AppState<L>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(ApiError::bad_request("Query parameter 'q' must not be empty"));
    }
    let results = state.store.search(query);
    Ok(Json(SearchResults {
        query: query.to_string(),
        count: results.len(),
        results,
    }))
}

#[derive(Debug, Serialize)]
pub struct DemoInfo {
    pub project_id: String,
    pub title: String,
    pub github_url: String,
    pub demo_urls: Vec<String>,
    pub has_demo: bool,
    pub technologies: Vec<String>,
    pub architecture: String,
}

pub async fn demo<L: LlmActor>(
    State(state): State<AppState<L>>,
    Path(project_id): Path<String>,
) -> Result<Json<DemoInfo>, ApiError> {
    let project = state
        .store
        .project(&project_id)
        .ok_or_else(|| ApiError::not_found(format!("Project '{}' not found", project_id)))?;

    Ok(Json(DemoInfo {
        project_id: project.id.clone(),
        title: project.title.clone(),
        github_url: project.github_url.clone(),
        demo_urls: project.demo_urls.clone(),
        has_demo: !project.demo_urls.is_empty(),
        technologies: project.technologies.clone(),
        architecture: project.star.architecture.clone(),
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "The requested resource was not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_key_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        let peer: SocketAddr = "127.0.0.1:4000".parse().unwrap();

        assert_eq!(client_key(&headers, Some(peer)), "203.0.113.7");
        assert_eq!(client_key(&HeaderMap::new(), Some(peer)), "127.0.0.1");
        assert_eq!(client_key(&HeaderMap::new(), None), "unknown");
    }
}
