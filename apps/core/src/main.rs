// Folio Assistant Backend Entry Point
// Routes portfolio questions to agents, answers from canned text when the model is away.

mod actors;
mod cache;
mod chat;
mod config;
mod error;
mod fallback;
mod metrics;
mod portfolio;
mod preflight;
mod rate_limiter;
mod routing;
mod server;
mod telemetry;

#[cfg(test)]
mod tests;

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use actors::llm::{LlmActorHandle, LlmEndpoint};
use cache::QueryCache;
use chat::{ChatService, Personas};
use config::Settings;
use portfolio::PortfolioStore;
use preflight::run_preflight_checks;
use routing::{LlmClassifier, QueryRouter};
use server::AppState;

const SERVICE_NAME: &str = "folio-core";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    telemetry::init(&settings.log_level, settings.log_format, SERVICE_NAME);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting {}", SERVICE_NAME);

    let store = PortfolioStore::load(&settings.portfolio_data_path);
    if let Err(ref e) = store {
        error!(path = %settings.portfolio_data_path.display(), "Failed to load portfolio data: {}", e);
    }

    let report = run_preflight_checks(&settings, store.as_ref().ok());
    if !report.ready_to_start {
        anyhow::bail!("Preflight checks failed: {}", report.summary);
    }
    let store = Arc::new(store?);

    // Model handle is shared by the routing delegator and the agents
    let llm = LlmEndpoint::from_settings(&settings)
        .map(|endpoint| Arc::new(LlmActorHandle::new(endpoint, settings.agent_timeout())));
    if llm.is_none() {
        warn!("GOOGLE_API_KEY not set, chat runs on fallback answers only");
    }

    let mut router = QueryRouter::new().with_timeout(settings.router_timeout());
    if let Some(llm) = &llm {
        router = router.with_delegator(Arc::new(LlmClassifier::new(llm.clone())));
    }

    let personas = Personas::build(&store, &settings.portfolio_owner);
    let cache = QueryCache::new(settings.cache_max_size, settings.cache_ttl());
    let chat = ChatService::new(router, llm.clone(), personas, cache, settings.agent_timeout());

    let addr = settings.bind_addr()?;
    let app = server::router(AppState::new(settings, store, chat, report));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    server::serve(listener, app, shutdown_signal()).await?;

    if let Some(llm) = llm {
        llm.shutdown().await;
    }
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
