//! OpenRouterBackend -- plain-text fallback implementation of
//! [`GenerationBackend`].
//!
//! Sends requests to the OpenRouter chat-completions endpoint with
//! bearer authentication. The cascade substitutes a different model id
//! into each attempt; this client just forwards whatever the request
//! carries and extracts the first choice's text.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use leadline_core::llm::backend::GenerationBackend;
use leadline_observe::genai_attrs;
use leadline_types::llm::{GenerationOutcome, GenerationRequest, LlmError};
use leadline_types::turn::{ChatRole, MessagePart, NormalizedMessage};

use super::types::{
    OpenRouterContent, OpenRouterContentPart, OpenRouterImageUrl, OpenRouterMessage,
    OpenRouterRequest, OpenRouterResponse,
};
use crate::llm::image::InlineImage;
use crate::llm::status_to_error;

/// OpenRouter generation backend.
///
/// Implements [`GenerationBackend`] for the chat-completions API. Tool
/// declarations are never sent; fallback attempts are text-only by
/// contract.
pub struct OpenRouterBackend {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

// OpenRouterBackend intentionally does NOT derive Debug to prevent
// accidental exposure of internal state.

impl OpenRouterBackend {
    /// Create a new OpenRouter backend.
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            // Transport backstop only; the orchestrator enforces the
            // visitor-facing deadline.
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://openrouter.ai".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// The chat-completions endpoint URL.
    fn url(&self) -> String {
        format!("{}/api/v1/chat/completions", self.base_url)
    }

    /// Convert the generic request into the OpenRouter wire shape. The
    /// inline image, when present, is validated here; a malformed data
    /// URL fails this attempt so the cascade can move to the next
    /// candidate.
    fn to_openrouter_request(
        &self,
        request: &GenerationRequest,
    ) -> Result<OpenRouterRequest, LlmError> {
        let mut messages = Vec::with_capacity(request.messages.len() + 2);
        if !request.system_prompt.is_empty() {
            messages.push(OpenRouterMessage::text("system", &request.system_prompt));
        }
        for message in &request.messages {
            let role = match message.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            };
            messages.push(OpenRouterMessage::text(role, content_text(message)));
        }

        let content = match &request.image {
            Some(url) => {
                let image = InlineImage::parse(url)?;
                OpenRouterContent::Parts(vec![
                    OpenRouterContentPart::Text {
                        text: request.query.clone(),
                    },
                    OpenRouterContentPart::ImageUrl {
                        image_url: OpenRouterImageUrl {
                            url: image.to_data_url(),
                        },
                    },
                ])
            }
            None => OpenRouterContent::Text(request.query.clone()),
        };
        messages.push(OpenRouterMessage {
            role: "user".to_string(),
            content,
        });

        Ok(OpenRouterRequest {
            model: request.model.clone(),
            messages,
            temperature: request.config.temperature,
            top_p: request.config.top_p,
            max_tokens: request.config.max_output_tokens,
        })
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<GenerationOutcome, LlmError> {
        let body = self.to_openrouter_request(request)?;

        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(status_to_error(status, error_body));
        }

        let completion: OpenRouterResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let Some(choice) = completion.choices.into_iter().next() else {
            return Err(LlmError::Provider {
                message: "response contained no choices".to_string(),
            });
        };
        let text = choice.message.content.unwrap_or_default();
        Ok(GenerationOutcome::text_only(text.trim()))
    }
}

impl GenerationBackend for OpenRouterBackend {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome, LlmError> {
        let span = tracing::info_span!(
            "fallback_generate",
            { genai_attrs::GEN_AI_OPERATION_NAME } = genai_attrs::OP_FALLBACK_GENERATE,
            { genai_attrs::GEN_AI_PROVIDER_NAME } = genai_attrs::PROVIDER_OPENROUTER,
            { genai_attrs::GEN_AI_REQUEST_MODEL } = %request.model,
            { genai_attrs::GEN_AI_REQUEST_TEMPERATURE } = f64::from(request.config.temperature),
            { genai_attrs::GEN_AI_REQUEST_MAX_TOKENS } = u64::from(request.config.max_output_tokens),
        );
        self.complete(request).instrument(span).await
    }
}

/// Flatten one normalized message to text, with media parts rendered as
/// attachment markers.
fn content_text(message: &NormalizedMessage) -> String {
    message
        .parts
        .iter()
        .map(|part| match part {
            MessagePart::Text { text } => text.clone(),
            MessagePart::Media { media_url } => format!("[attachment: {media_url}]"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
