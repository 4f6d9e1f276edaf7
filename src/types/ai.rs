use serde::{Deserialize, Serialize};

/// Represents a chat message with a role and content
///
/// This structure is used for both requests to and responses from AI chat models
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct OpenAIChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub stream: bool,
}

/// Response envelope of an OpenAI-compatible chat completion endpoint.
///
/// Only `choices` is required; the metadata fields differ between providers
/// and are ignored when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIChatCompletionResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    pub choices: Vec<OpenAIChoice>,
    pub usage: Option<OpenAIUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}
