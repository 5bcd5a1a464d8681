//! GeminiBackend -- tool-calling primary implementation of
//! [`GenerationBackend`].
//!
//! Sends requests to the Gemini `generateContent` endpoint, runs the
//! functionCall/functionResponse loop for the two context tools, and
//! parses the model's JSON answer into a [`GenerationOutcome`]. A final
//! answer that is not valid JSON degrades to a text-only outcome rather
//! than failing the turn.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use leadline_core::llm::backend::GenerationBackend;
use leadline_observe::genai_attrs;
use leadline_core::tools::{ContextTools, retrieval_placeholder};
use leadline_types::llm::{GenerationOutcome, GenerationRequest, LlmError};
use leadline_types::turn::{ChatRole, MessagePart, NormalizedMessage};

use super::types::{
    GeminiContent, GeminiFunctionCall, GeminiFunctionDeclaration, GeminiGenerationConfig,
    GeminiPart, GeminiRequest, GeminiResponse, GeminiTool,
};
use crate::llm::image::InlineImage;
use crate::llm::status_to_error;

/// Declared name of the website reader tool.
const FETCH_TOOL: &str = "fetch_website_context";

/// Declared name of the web search tool.
const SEARCH_TOOL: &str = "web_search";

/// Gemini generation backend.
///
/// Implements [`GenerationBackend`] for the `generateContent` API.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and only exposed when the
/// `x-goog-api-key` header is built. It travels in a header rather than
/// the query string so request logs cannot leak it.
pub struct GeminiBackend<T> {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    tools: T,
}

// GeminiBackend intentionally does NOT derive Debug to prevent
// accidental exposure of internal state.

impl<T: ContextTools> GeminiBackend<T> {
    /// Maximum functionCall/functionResponse round-trips per turn. The
    /// call after the last round carries no tool declarations, forcing a
    /// final answer.
    const TOOL_ROUNDS: usize = 4;

    /// Create a new Gemini backend with the given context tools.
    pub fn new(api_key: SecretString, tools: T) -> Self {
        let client = reqwest::Client::builder()
            // Transport backstop only; the orchestrator enforces the
            // visitor-facing deadline.
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            tools,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a model.
    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    /// Convert the generic request into the initial Gemini conversation:
    /// the retained window followed by the current query (plus inline
    /// image when present).
    fn initial_contents(&self, request: &GenerationRequest) -> Result<Vec<GeminiContent>, LlmError> {
        let mut contents: Vec<GeminiContent> =
            request.messages.iter().map(to_gemini_content).collect();

        let mut final_parts = vec![GeminiPart::text(&request.query)];
        if let Some(url) = &request.image {
            let image = InlineImage::parse(url)?;
            final_parts.push(GeminiPart::inline_data(image.mime_type, image.data));
        }
        contents.push(GeminiContent::user(final_parts));
        Ok(contents)
    }

    /// Build one wire request. Tool declarations and JSON response mode
    /// are mutually exclusive: declarations while rounds remain, JSON
    /// mode on the forced final call.
    fn to_gemini_request(
        &self,
        request: &GenerationRequest,
        contents: &[GeminiContent],
        include_tools: bool,
    ) -> GeminiRequest {
        GeminiRequest {
            system_instruction: (!request.system_prompt.is_empty())
                .then(|| GeminiContent::system(&request.system_prompt)),
            contents: contents.to_vec(),
            tools: include_tools.then(|| vec![context_tool_declarations()]),
            generation_config: GeminiGenerationConfig {
                temperature: request.config.temperature,
                top_p: request.config.top_p,
                top_k: request.config.top_k,
                max_output_tokens: request.config.max_output_tokens,
                response_mime_type: (!include_tools).then(|| "application/json".to_string()),
            },
        }
    }

    /// Execute one tool call. Tool failures never surface here; the
    /// implementations return inline placeholders instead.
    async fn execute_call(
        &self,
        call: &GeminiFunctionCall,
        fallback_query: &str,
    ) -> serde_json::Value {
        match call.name.as_str() {
            FETCH_TOOL => {
                let urls: Vec<String> = call
                    .args
                    .get("urls")
                    .and_then(|v| serde_json::from_value(v.clone()).ok())
                    .unwrap_or_default();
                let query = call
                    .args
                    .get("query")
                    .and_then(|v| v.as_str())
                    .unwrap_or(fallback_query);
                let content = self.tools.fetch_website_context(&urls, query).await;
                serde_json::json!({ "content": content })
            }
            SEARCH_TOOL => {
                let query = call
                    .args
                    .get("query")
                    .and_then(|v| v.as_str())
                    .unwrap_or(fallback_query);
                let content = self.tools.web_search(query).await;
                serde_json::json!({ "content": content })
            }
            other => {
                tracing::warn!(tool = other, "model called an undeclared tool");
                serde_json::json!({ "content": retrieval_placeholder(other) })
            }
        }
    }

    /// The functionCall/functionResponse loop behind [`GenerationBackend::generate`].
    async fn run_turn(&self, request: &GenerationRequest) -> Result<GenerationOutcome, LlmError> {
        let mut contents = self.initial_contents(request)?;

        for round in 0..=Self::TOOL_ROUNDS {
            let include_tools = request.tools_enabled && round < Self::TOOL_ROUNDS;
            let body = self.to_gemini_request(request, &contents, include_tools);
            let response = self.post(&request.model, &body).await?;

            let Some(candidate) = response.candidates.into_iter().next() else {
                return Err(LlmError::Provider {
                    message: "response contained no candidates".to_string(),
                });
            };
            let finish_reason = candidate.finish_reason.as_deref().unwrap_or("STOP");
            tracing::Span::current()
                .record(genai_attrs::GEN_AI_RESPONSE_FINISH_REASONS, finish_reason);
            if finish_reason != "STOP" {
                tracing::debug!(finish_reason, "candidate finished early");
            }
            let Some(content) = candidate.content else {
                return Err(LlmError::Provider {
                    message: "candidate contained no content".to_string(),
                });
            };

            let calls: Vec<GeminiFunctionCall> =
                content.function_calls().into_iter().cloned().collect();
            if include_tools && !calls.is_empty() {
                tracing::debug!(round, calls = calls.len(), "executing context tool calls");
                let mut replies = Vec::with_capacity(calls.len());
                for call in &calls {
                    let output = self.execute_call(call, &request.query).await;
                    replies.push(GeminiPart::function_response(call.name.clone(), output));
                }
                contents.push(content);
                contents.push(GeminiContent::user(replies));
                continue;
            }

            return Ok(parse_outcome(&content.text()));
        }

        // The round after TOOL_ROUNDS carries no declarations, so the
        // loop always returns before getting here.
        Err(LlmError::Provider {
            message: "tool round limit exceeded without a final answer".to_string(),
        })
    }

    async fn post(&self, model: &str, body: &GeminiRequest) -> Result<GeminiResponse, LlmError> {
        let url = self.url(model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(body)
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

        response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))
    }
}

impl<T: ContextTools> GenerationBackend for GeminiBackend<T> {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome, LlmError> {
        let span = tracing::info_span!(
            "generate_content",
            { genai_attrs::GEN_AI_OPERATION_NAME } = genai_attrs::OP_GENERATE_CONTENT,
            { genai_attrs::GEN_AI_PROVIDER_NAME } = genai_attrs::PROVIDER_GEMINI,
            { genai_attrs::GEN_AI_REQUEST_MODEL } = %request.model,
            { genai_attrs::GEN_AI_REQUEST_TEMPERATURE } = f64::from(request.config.temperature),
            { genai_attrs::GEN_AI_REQUEST_MAX_TOKENS } = u64::from(request.config.max_output_tokens),
            { genai_attrs::GEN_AI_RESPONSE_FINISH_REASONS } = tracing::field::Empty,
        );
        self.run_turn(request).instrument(span).await
    }
}

/// Map one normalized message onto a Gemini content entry. Media parts
/// are rendered as text markers; the model cannot fetch URLs itself.
fn to_gemini_content(message: &NormalizedMessage) -> GeminiContent {
    let role = match message.role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    };
    let parts = message
        .parts
        .iter()
        .map(|part| match part {
            MessagePart::Text { text } => GeminiPart::text(text.clone()),
            MessagePart::Media { media_url } => {
                GeminiPart::text(format!("[attachment: {media_url}]"))
            }
        })
        .collect();
    GeminiContent {
        role: Some(role.to_string()),
        parts,
    }
}

/// Parse the model's final text into a [`GenerationOutcome`].
///
/// Tolerant by design: a fenced JSON block is unwrapped first, and
/// anything that still fails to parse becomes a text-only outcome.
fn parse_outcome(text: &str) -> GenerationOutcome {
    let trimmed = text.trim();
    let candidate = strip_code_fence(trimmed);
    match serde_json::from_str::<GenerationOutcome>(candidate) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::debug!("structured output parse failed ({err}), degrading to plain text");
            GenerationOutcome::text_only(trimmed)
        }
    }
}

/// Unwrap a ```` ```json ... ``` ```` (or bare ```` ``` ````) fence when
/// the whole payload is fenced.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return text;
    };
    body.strip_prefix("json").unwrap_or(body).trim()
}

/// The two context tools as Gemini function declarations.
fn context_tool_declarations() -> GeminiTool {
    GeminiTool {
        function_declarations: vec![
            GeminiFunctionDeclaration {
                name: FETCH_TOOL.to_string(),
                description: "Read the business website pages most relevant to the visitor's \
                              question and return their text."
                    .to_string(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "urls": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Page URLs to read, chosen from the pages listed in the system instruction."
                        },
                        "query": {
                            "type": "string",
                            "description": "What to look for in the pages."
                        }
                    },
                    "required": ["urls", "query"]
                }),
            },
            GeminiFunctionDeclaration {
                name: SEARCH_TOOL.to_string(),
                description: "Search the web when the business knowledge cannot answer the \
                              question."
                    .to_string(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Search query." }
                    },
                    "required": ["query"]
                }),
            },
        ],
    }
}
