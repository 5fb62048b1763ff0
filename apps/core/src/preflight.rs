//! Preflight Check System
//!
//! Verifies configuration and loaded data before the server starts accepting
//! traffic. The same report is served by `/health`.

use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::config::Settings;
use crate::portfolio::PortfolioStore;

/// Result of a single check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }
}

/// Complete preflight check report
#[derive(Debug, Clone, Serialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub ready_to_start: bool,
    /// No model available; chat answers come from the fallback responder.
    pub fallback_mode: bool,
    pub summary: String,
}

const LLM_KEY: &str = "llm_api_key";
const LLM_BASE_URL: &str = "llm_base_url";
const PORTFOLIO_DATA: &str = "portfolio_data";
const CORS_ORIGINS: &str = "cors_origins";

/// Checks that must pass for the service to start.
fn is_critical_check(name: &str) -> bool {
    matches!(name, LLM_BASE_URL | PORTFOLIO_DATA)
}

/// Runs every check and logs the outcome.
pub fn run_preflight_checks(settings: &Settings, store: Option<&PortfolioStore>) -> PreflightReport {
    info!("Running preflight checks");

    let checks = vec![
        check_llm_key(settings),
        check_llm_base_url(settings),
        check_portfolio_data(store),
        check_cors_origins(settings),
    ];

    let all_passed = checks.iter().all(|c| c.passed);
    let critical_passed = checks
        .iter()
        .filter(|c| is_critical_check(&c.name))
        .all(|c| c.passed);
    let fallback_mode = !settings.has_llm();

    let summary = if all_passed {
        "All checks passed. System ready.".to_string()
    } else if critical_passed && fallback_mode {
        "No model configured. Serving fallback answers.".to_string()
    } else if critical_passed {
        "Some non-critical checks failed. System can start with warnings.".to_string()
    } else {
        "Critical checks failed. System cannot start.".to_string()
    };

    for check in &checks {
        if check.passed {
            info!(check = %check.name, "{}", check.message);
        } else {
            warn!(check = %check.name, details = ?check.details, "{}", check.message);
        }
    }
    info!(%summary, "Preflight complete");

    PreflightReport {
        all_passed,
        checks,
        ready_to_start: critical_passed,
        fallback_mode,
        summary,
    }
}

fn check_llm_key(settings: &Settings) -> CheckResult {
    if settings.has_llm() {
        CheckResult::pass(LLM_KEY, "API key configured")
    } else {
        CheckResult::fail(
            LLM_KEY,
            "GOOGLE_API_KEY not set",
            Some("Routing uses keywords only and chat answers are canned".to_string()),
        )
    }
}

fn check_llm_base_url(settings: &Settings) -> CheckResult {
    match Url::parse(&settings.llm_base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            CheckResult::pass(LLM_BASE_URL, "Model endpoint URL is valid")
        }
        Ok(url) => CheckResult::fail(
            LLM_BASE_URL,
            "Model endpoint must use http or https",
            Some(format!("scheme: {}", url.scheme())),
        ),
        Err(e) => CheckResult::fail(LLM_BASE_URL, "Model endpoint URL is invalid", Some(e.to_string())),
    }
}

fn check_portfolio_data(store: Option<&PortfolioStore>) -> CheckResult {
    match store {
        Some(store) => CheckResult {
            details: Some(format!(
                "{} projects, {} experience entries, {} publications",
                store.projects().len(),
                store.experience().len(),
                store.publications().len()
            )),
            ..CheckResult::pass(PORTFOLIO_DATA, "Portfolio data loaded")
        },
        None => CheckResult::fail(PORTFOLIO_DATA, "Portfolio data not loaded", None),
    }
}

fn check_cors_origins(settings: &Settings) -> CheckResult {
    let invalid: Vec<&str> = settings
        .cors_origins
        .iter()
        .filter(|origin| origin.as_str() != "*" && Url::parse(origin).is_err())
        .map(String::as_str)
        .collect();

    if invalid.is_empty() {
        CheckResult::pass(CORS_ORIGINS, "CORS origins are valid")
    } else {
        CheckResult::fail(
            CORS_ORIGINS,
            "Some CORS origins are not valid URLs",
            Some(invalid.join(", ")),
        )
    }
}
