//! OpenRouter chat-completions API types.
//!
//! OpenRouter speaks the OpenAI chat-completions dialect, snake_case on
//! the wire. These are NOT the generic generation types from
//! leadline-types -- those are backend-agnostic.

use serde::{Deserialize, Serialize};

/// Request body for `/api/v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct OpenRouterRequest {
    pub model: String,
    pub messages: Vec<OpenRouterMessage>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

/// One chat message. Content is a flat string for text-only messages
/// and a part array when an image rides along.
#[derive(Debug, Clone, Serialize)]
pub struct OpenRouterMessage {
    pub role: String,
    pub content: OpenRouterContent,
}

impl OpenRouterMessage {
    pub fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: OpenRouterContent::Text(content.into()),
        }
    }
}

/// Message content: flat text or multi-part.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OpenRouterContent {
    Text(String),
    Parts(Vec<OpenRouterContentPart>),
}

/// One content part of a multi-part message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenRouterContentPart {
    Text { text: String },
    ImageUrl { image_url: OpenRouterImageUrl },
}

/// Image reference carried as a data URL.
#[derive(Debug, Clone, Serialize)]
pub struct OpenRouterImageUrl {
    pub url: String,
}

/// Response body from `/api/v1/chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterResponse {
    #[serde(default)]
    pub choices: Vec<OpenRouterChoice>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterChoice {
    pub message: OpenRouterResponseMessage,
}

/// The assistant message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}
