//! Generation backend request/response types and errors.

use serde::{Deserialize, Serialize};

use crate::agent::AgentTurnResult;
use crate::turn::NormalizedMessage;

/// Sampling configuration forwarded to the generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.95
}

fn default_top_k() -> u32 {
    40
}

fn default_max_output_tokens() -> u32 {
    2048
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Request to a generation backend for one completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub system_prompt: String,
    /// Retained conversation window, chronological.
    pub messages: Vec<NormalizedMessage>,
    /// Current visitor query (final user message).
    pub query: String,
    /// Optional inline image as a `data:image/...;base64,...` URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub config: GenerationConfig,
    /// Whether the backend may call the context tools.
    #[serde(default)]
    pub tools_enabled: bool,
}

/// What a generation backend produced for one attempt.
///
/// The primary backend fills the structured fields from the model's
/// JSON output; fallback attempts produce text-only outcomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutcome {
    pub response_text: String,
    pub lead_name: Option<String>,
    pub lead_email: Option<String>,
    pub lead_phone: Option<String>,
    pub conversation_summary: Option<String>,
    pub knowledge_gap_query: Option<String>,
    pub knowledge_gap_category: Option<String>,
}

impl GenerationOutcome {
    /// A plain-text outcome with no structured fields.
    pub fn text_only(response_text: impl Into<String>) -> Self {
        Self {
            response_text: response_text.into(),
            ..Self::default()
        }
    }
}

impl From<GenerationOutcome> for AgentTurnResult {
    fn from(outcome: GenerationOutcome) -> Self {
        AgentTurnResult {
            response_text: outcome.response_text,
            lead_name: outcome.lead_name,
            lead_email: outcome.lead_email,
            lead_phone: outcome.lead_phone,
            conversation_summary: outcome.conversation_summary,
            knowledge_gap_query: outcome.knowledge_gap_query,
            knowledge_gap_category: outcome.knowledge_gap_category,
        }
    }
}

/// Errors from generation backend operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("http error: {message}")]
    Http { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unsupported content: {0}")]
    UnsupportedContent(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::NormalizedMessage;

    #[test]
    fn test_generation_config_defaults() {
        let config: GenerationConfig = serde_json::from_str("{}").unwrap();
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert!((config.top_p - 0.95).abs() < f32::EPSILON);
        assert_eq!(config.top_k, 40);
        assert_eq!(config.max_output_tokens, 2048);
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn test_generation_config_partial_override() {
        let config: GenerationConfig = serde_json::from_str(r#"{"temperature":0.2}"#).unwrap();
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.top_k, 40);
    }

    #[test]
    fn test_outcome_into_result() {
        let outcome = GenerationOutcome {
            response_text: "Our plans start at $10.".to_string(),
            lead_email: Some("john@x.com".to_string()),
            conversation_summary: Some("Pricing question".to_string()),
            ..GenerationOutcome::default()
        };
        let result: AgentTurnResult = outcome.into();
        assert_eq!(result.response_text, "Our plans start at $10.");
        assert_eq!(result.lead_email.as_deref(), Some("john@x.com"));
        assert!(result.lead_phone.is_none());
    }

    #[test]
    fn test_generation_request_serde() {
        let request = GenerationRequest {
            model: "gemini-2.5-flash".to_string(),
            system_prompt: "You are Ava.".to_string(),
            messages: vec![NormalizedMessage::user("hi")],
            query: "What do you sell?".to_string(),
            image: None,
            config: GenerationConfig::default(),
            tools_enabled: true,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("\"image\""));
        let parsed: GenerationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.model, "gemini-2.5-flash");
        assert!(parsed.tools_enabled);
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::RateLimited {
            retry_after_ms: Some(1200),
        };
        assert!(err.to_string().contains("1200"));
        let err = LlmError::UnsupportedContent("invalid argument".to_string());
        assert!(err.to_string().contains("unsupported content"));
    }
}
