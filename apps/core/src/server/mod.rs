//! HTTP surface.
//!
//! - `handlers`: route handlers
//! - `middleware`: request id, timing, security headers, metrics
//! - `error`: the JSON error body

pub mod error;
pub mod handlers;
pub mod middleware;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::actors::traits::LlmActor;
use crate::chat::ChatService;
use crate::config::{Settings, RATE_LIMIT_WINDOW};
use crate::metrics::RequestMetrics;
use crate::portfolio::PortfolioStore;
use crate::preflight::PreflightReport;
use crate::rate_limiter::RateLimiter;

/// Shared by every handler.
pub struct AppState<L: LlmActor> {
    pub settings: Arc<Settings>,
    pub store: Arc<PortfolioStore>,
    pub chat: Arc<ChatService<L>>,
    pub metrics: Arc<RequestMetrics>,
    pub preflight: Arc<PreflightReport>,
    limiter: Arc<Mutex<RateLimiter>>,
    started: Instant,
}

// Derive would require `L: Clone`.
impl<L: LlmActor> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings.clone(),
            store: self.store.clone(),
            chat: self.chat.clone(),
            metrics: self.metrics.clone(),
            preflight: self.preflight.clone(),
            limiter: self.limiter.clone(),
            started: self.started,
        }
    }
}

impl<L: LlmActor> AppState<L> {
    pub fn new(
        settings: Settings,
        store: Arc<PortfolioStore>,
        chat: ChatService<L>,
        preflight: PreflightReport,
    ) -> Self {
        let limiter = RateLimiter::new(settings.rate_limit_requests, RATE_LIMIT_WINDOW);
        Self {
            settings: Arc::new(settings),
            store,
            chat: Arc::new(chat),
            metrics: Arc::new(RequestMetrics::new()),
            preflight: Arc::new(preflight),
            limiter: Arc::new(Mutex::new(limiter)),
            started: Instant::now(),
        }
    }

    pub fn limiter(&self) -> MutexGuard<'_, RateLimiter> {
        self.limiter.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

/// Builds the application router with every route and layer.
pub fn router<L: LlmActor>(state: AppState<L>) -> Router {
    let cors = cors_layer(&state.settings.cors_origins);
    let body_limit = DefaultBodyLimit::max(state.settings.max_request_size);

    Router::new()
        .route("/", get(handlers::root::<L>))
        .route("/health", get(handlers::health::<L>))
        .route("/metrics", get(handlers::metrics::<L>))
        .route("/chat", post(handlers::chat::<L>))
        .route("/api/v1/chat", post(handlers::chat::<L>))
        .route("/api/v1/profile", get(handlers::profile::<L>))
        .route("/api/v1/projects", get(handlers::projects::<L>))
        .route("/api/v1/experience", get(handlers::experience::<L>))
        .route("/api/v1/skills", get(handlers::skills::<L>))
        .route("/api/v1/publications", get(handlers::publications::<L>))
        .route("/api/v1/activities", get(handlers::activities::<L>))
        .route("/api/v1/portfolio-data", get(handlers::portfolio_data::<L>))
        .route("/api/v1/search", get(handlers::search::<L>))
        .route("/api/v1/demo/:project_id", get(handlers::demo::<L>))
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::track_request::<L>,
        ))
        .layer(body_limit)
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Serves `app` until `shutdown` resolves. Handlers see the peer address.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("HTTP server stopped");
    Ok(())
}
