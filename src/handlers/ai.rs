//! Model provider clients.
//!
//! The [`ModelClient`] trait is the single capability interface between the
//! orchestrator and any particular vendor API: one system instruction, one
//! user message, one raw text completion back. [`OpenAIClient`] talks to an
//! OpenAI-compatible chat completion endpoint; [`MockModelClient`] substitutes
//! a deterministic stub in tests.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::AIConfig;
use crate::errors::AIError;
use crate::types::ai::{ChatMessage, OpenAIChatCompletionResponse, OpenAIChatRequest};

/// Capability interface for chat-style model providers.
///
/// Object-safe and `Send + Sync` so a single boxed client can serve
/// concurrent requests; implementations hold no per-request state.
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Send one system instruction and one user message, return the model's
    /// raw text output.
    async fn complete(&self, system: &str, user: &str) -> Result<String, AIError>;

    /// Get the model identifier this client is configured for
    fn model_name(&self) -> &str;
}

/// Client for OpenAI-compatible `chat/completions` endpoints.
pub struct OpenAIClient {
    config: AIConfig,
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(config: AIConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl ModelClient for OpenAIClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AIError> {
        let request_payload = OpenAIChatRequest {
            model: self.config.model_name.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: Some(self.config.temperature),
            stream: false,
        };

        tracing::debug!(
            "Sending analysis request to {} (model {}, {} chars user message)",
            self.config.api_url,
            self.config.model_name,
            user.len()
        );

        let mut request_builder = self.client.post(&self.config.api_url);

        // Add authorization header if an api_key is present
        if let Some(api_key) = &self.config.api_key {
            if !api_key.is_empty() {
                request_builder = request_builder.bearer_auth(api_key);
            }
        }

        let response = request_builder
            .json(&request_payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send AI request: {}", e);
                AIError::RequestFailed(e)
            })?;

        if !response.status().is_success() {
            let status_code = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body from AI response".to_string());
            tracing::error!("AI API request failed with status {}: {}", status_code, body);
            return Err(AIError::ApiResponseError(status_code, body));
        }

        let response_data = response
            .json::<OpenAIChatCompletionResponse>()
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse JSON response from AI API: {}", e);
                AIError::ResponseParseFailed(e)
            })?;

        let choice = response_data
            .choices
            .first()
            .ok_or(AIError::NoChoiceInResponse)?;

        let content = &choice.message.content;
        if content.trim().is_empty() {
            return Err(AIError::EmptyMessage);
        }

        Ok(content.clone())
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}

/// Mock model client for testing.
///
/// Returns a canned response or a canned failure without any network call,
/// and counts invocations so tests can assert whether the orchestrator was
/// reached.
#[derive(Debug)]
pub struct MockModelClient {
    response: String,
    error: Option<String>,
    model: String,
    call_count: AtomicU32,
}

impl Default for MockModelClient {
    fn default() -> Self {
        Self {
            response: String::new(),
            error: None,
            model: "mock-model".to_string(),
            call_count: AtomicU32::new(0),
        }
    }
}

impl MockModelClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw text the mock returns from `complete`.
    #[must_use]
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail every call with a network error.
    #[must_use]
    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    #[must_use]
    pub fn with_model_name(mut self, name: &str) -> Self {
        self.model = name.to_string();
        self
    }

    /// Get the number of times `complete` was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ModelClient for MockModelClient {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, AIError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(ref error) = self.error {
            return Err(AIError::NetworkError(error.clone()));
        }

        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
