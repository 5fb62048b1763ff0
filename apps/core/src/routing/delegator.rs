//! Model-backed classification for queries the matchers are unsure about.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::actors::messages::AppError;
use crate::actors::traits::LlmActor;

/// Something that can name an agent for a free-text query.
///
/// The returned label is untrusted; the router validates it.
#[async_trait]
pub trait QueryClassifier: Send + Sync + 'static {
    async fn classify(&self, query: &str) -> Result<String, AppError>;
}

const ROUTING_TEMPERATURE: f32 = 0.1;

const ROUTING_INSTRUCTIONS: &str = "\
Route the following user query to the most appropriate agent.

Available agents:
- profile: For questions about personal background, education, skills, \"about me\"
- project: For questions about projects, technical implementations, code
- career: For career advice, professional development, industry insights
- demo: For interactive demonstrations, live projects, walkthroughs
- strategic_fit: For job analysis, requirements matching, strategic fit assessment

Respond with only the agent name (profile, project, career, demo, or strategic_fit).";

/// Classifier that asks the hosted model.
pub struct LlmClassifier<L: LlmActor> {
    llm: Arc<L>,
}

impl<L: LlmActor> LlmClassifier<L> {
    pub fn new(llm: Arc<L>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl<L: LlmActor> QueryClassifier for LlmClassifier<L> {
    async fn classify(&self, query: &str) -> Result<String, AppError> {
        let prompt = format!("Query: \"{}\"", query);
        let label = self
            .llm
            .generate_with_params(
                prompt,
                Some(ROUTING_INSTRUCTIONS.to_string()),
                Some(ROUTING_TEMPERATURE),
            )
            .await?;
        debug!(raw_label = %label.trim(), "Routing model answered");
        Ok(label)
    }
}
