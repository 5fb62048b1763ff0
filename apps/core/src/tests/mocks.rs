//! Mock actors and classifiers shared by the test suites.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration};

use crate::actors::messages::{ActorError, AppError};
use crate::actors::traits::LlmActor;
use crate::portfolio::PortfolioStore;
use crate::routing::QueryClassifier;

// ============================================================================
// Mock LLM Actor
// ============================================================================

/// Mock LLM Actor that returns a fixed reply and records what it was asked.
pub struct MockLlmActor {
    pub response: String,
    pub delay_ms: u64,
    pub should_fail: bool,
    pub calls: Arc<AtomicUsize>,
    pub system_prompts: Mutex<Vec<Option<String>>>,
}

impl MockLlmActor {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            delay_ms: 0,
            should_fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
            system_prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_system_prompt(&self) -> Option<String> {
        self.system_prompts.lock().unwrap().last().cloned().flatten()
    }
}

#[async_trait]
impl LlmActor for MockLlmActor {
    async fn generate_with_params(
        &self,
        _prompt: String,
        system_prompt: Option<String>,
        _temperature: Option<f32>,
    ) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.system_prompts.lock().unwrap().push(system_prompt);

        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }

        if self.should_fail {
            Err(AppError::Actor(ActorError::Internal("Mock failure".to_string())))
        } else {
            Ok(self.response.clone())
        }
    }
}

// ============================================================================
// Mock Classifier
// ============================================================================

enum Behavior {
    Label(String),
    Fail,
    Slow(Duration, String),
}

/// Classifier with scripted behavior and a call counter.
pub struct MockClassifier {
    behavior: Behavior,
    pub calls: Arc<AtomicUsize>,
}

impl MockClassifier {
    pub fn label(label: &str) -> Self {
        Self::with(Behavior::Label(label.to_string()))
    }

    pub fn failing() -> Self {
        Self::with(Behavior::Fail)
    }

    pub fn slow(delay: Duration, label: &str) -> Self {
        Self::with(Behavior::Slow(delay, label.to_string()))
    }

    fn with(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryClassifier for MockClassifier {
    async fn classify(&self, _query: &str) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Label(label) => Ok(label.clone()),
            Behavior::Fail => Err(AppError::Actor(ActorError::LlmError(
                "classifier unavailable".to_string(),
            ))),
            Behavior::Slow(delay, label) => {
                sleep(*delay).await;
                Ok(label.clone())
            }
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// The bundled sample portfolio.
pub fn sample_store() -> PortfolioStore {
    PortfolioStore::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("data/portfolio.json"))
        .expect("sample portfolio should load")
}
