use crate::actors::messages::{ActorError, AppError, LlmMessage};
use crate::actors::traits::LlmActor;
use crate::config::Settings;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Connection parameters for the hosted model API.
#[derive(Debug, Clone)]
pub struct LlmEndpoint {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl LlmEndpoint {
    /// Returns `None` when no API key is configured; the service then runs in fallback mode.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        if !settings.has_llm() {
            return None;
        }
        Some(Self {
            base_url: settings.llm_base_url.trim_end_matches('/').to_string(),
            api_key: settings.google_api_key.clone(),
            model: settings.google_model.clone(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// A handle to the `LlmActor`.
///
/// This struct provides a public, cloneable interface for sending messages to the
/// running LLM actor. It abstracts away the `mpsc::Sender`.
#[derive(Clone)]
pub struct LlmActorHandle {
    sender: mpsc::Sender<LlmMessage>,
    reply_timeout: Duration,
}

impl LlmActorHandle {
    /// Creates a new `LlmActor` and returns a handle to it.
    ///
    /// This will spawn the `LlmActorRunner` in a new Tokio task.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Where and how to reach the hosted model.
    /// * `reply_timeout` - Upper bound on how long a caller waits for a reply.
    pub fn new(endpoint: LlmEndpoint, reply_timeout: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = LlmActorRunner::new(receiver, endpoint);
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            reply_timeout,
        }
    }

    /// A convenience method for generating text with default parameters.
    #[allow(dead_code)]
    pub async fn generate(&self, prompt: String) -> Result<String, AppError> {
        self.generate_with_params(prompt, None, None).await
    }

    /// Asks the runner to stop accepting work.
    pub async fn shutdown(&self) {
        if self.sender.send(LlmMessage::Shutdown).await.is_err() {
            debug!("LlmActor already stopped");
        }
    }
}

#[async_trait]
impl LlmActor for LlmActorHandle {
    async fn generate_with_params(
        &self,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
    ) -> Result<String, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = LlmMessage::GenerateWithParams {
            prompt,
            system_prompt,
            temperature,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| ActorError::Internal(e.to_string()))?;
        timeout(self.reply_timeout, recv)
            .await?
            .map_err(|e| ActorError::Internal(e.to_string()))?
    }
}

// --- Constants ---
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

// --- Actor Runner (Internal Logic) ---
struct LlmActorRunner {
    receiver: mpsc::Receiver<LlmMessage>,
    endpoint: LlmEndpoint,
    client: Client,
}

impl LlmActorRunner {
    fn new(receiver: mpsc::Receiver<LlmMessage>, endpoint: LlmEndpoint) -> Self {
        Self {
            receiver,
            endpoint,
            client: Client::new(),
        }
    }

    async fn run(mut self) {
        info!(model = %self.endpoint.model, "LlmActor started");

        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, LlmMessage::Shutdown) {
                info!("LlmActor shutting down");
                break;
            }
            self.handle_message(msg);
        }

        info!("LlmActor stopped");
    }

    /// Each request runs on its own task so one slow completion does not
    /// hold up routing calls queued behind it.
    fn handle_message(&self, msg: LlmMessage) {
        match msg {
            LlmMessage::GenerateWithParams {
                prompt,
                system_prompt,
                temperature,
                mut responder,
            } => {
                let client = self.client.clone();
                let endpoint = self.endpoint.clone();
                tokio::spawn(async move {
                    let result = tokio::select! {
                        result = generate_completion(&client, &endpoint, prompt, system_prompt, temperature) => result,
                        _ = responder.closed() => {
                            debug!("Caller went away, completion request abandoned");
                            return;
                        }
                    };
                    let _ = responder.send(result);
                });
            }
            LlmMessage::Shutdown => {}
        }
    }
}

async fn generate_completion(
    client: &Client,
    endpoint: &LlmEndpoint,
    prompt: String,
    system_prompt: Option<String>,
    temperature: Option<f32>,
) -> Result<String, AppError> {
    debug!(prompt_chars = prompt.chars().count(), "LLM generating");

    let mut payload = json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
    });

    if let Some(system) = system_prompt {
        payload["systemInstruction"] = json!({ "parts": [{ "text": system }] });
    }

    if let Some(temp) = temperature {
        payload["generationConfig"] = json!({ "temperature": temp });
    }

    let request_future = client
        .post(endpoint.generate_url())
        .query(&[("key", endpoint.api_key.as_str())])
        .json(&payload)
        .send();

    let res = timeout(COMPLETION_TIMEOUT, request_future).await??;

    let status = res.status();

    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        warn!(%status, "Completion request rejected");
        return Err(ActorError::LlmError(format!(
            "Completion request failed with status {}: {}",
            status, body
        ))
        .into());
    }

    let json: Value = res
        .json()
        .await
        .map_err(|e| ActorError::LlmError(e.to_string()))?;

    extract_text(&json).ok_or_else(|| {
        ActorError::LlmError("Completion response contained no candidate text".to_string()).into()
    })
}

/// Concatenates the text parts of the first candidate.
fn extract_text(body: &Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|part| part["text"].as_str()).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
