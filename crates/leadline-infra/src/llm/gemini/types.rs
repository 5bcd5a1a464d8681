//! Gemini `generateContent` API types.
//!
//! These are Gemini-specific request/response structures used for HTTP
//! communication with the `generateContent` endpoint. They are NOT the
//! generic generation types from leadline-types -- those are
//! backend-agnostic.

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<GeminiTool>>,
    pub generation_config: GeminiGenerationConfig,
}

/// One conversation entry. `role` is `user` or `model`; the system
/// instruction carries no role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![GeminiPart::text(text)],
        }
    }

    pub fn user(parts: Vec<GeminiPart>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }

    pub fn model(parts: Vec<GeminiPart>) -> Self {
        Self {
            role: Some("model".to_string()),
            parts,
        }
    }

    /// All text parts concatenated. Other part kinds are skipped.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }

    /// The functionCall parts, in order.
    pub fn function_calls(&self) -> Vec<&GeminiFunctionCall> {
        self.parts
            .iter()
            .filter_map(|p| p.function_call.as_ref())
            .collect()
    }
}

/// One content part. Exactly one field is set per part on the wire; a
/// part kind this client does not know deserializes with every field
/// `None` and is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<GeminiInlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<GeminiFunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<GeminiFunctionResponse>,
}

impl GeminiPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(GeminiInlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            ..Self::default()
        }
    }

    pub fn function_response(name: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            function_response: Some(GeminiFunctionResponse {
                name: name.into(),
                response,
            }),
            ..Self::default()
        }
    }
}

/// Base64 image payload attached to a user part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiInlineData {
    pub mime_type: String,
    pub data: String,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiFunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// The result of a tool invocation, echoed back to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiFunctionResponse {
    pub name: String,
    pub response: serde_json::Value,
}

/// Tool declaration set offered to the model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiTool {
    pub function_declarations: Vec<GeminiFunctionDeclaration>,
}

/// One declared function the model may call.
#[derive(Debug, Clone, Serialize)]
pub struct GeminiFunctionDeclaration {
    pub name: String,
    pub description: String,
    /// JSON-schema-shaped parameter description.
    pub parameters: serde_json::Value,
}

/// Sampling settings on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    /// `application/json` on the final (tool-free) call only; the API
    /// rejects JSON mode combined with function declarations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Response body from `generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// One response candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_camel_case() {
        let req = GeminiRequest {
            system_instruction: Some(GeminiContent::system("You are Ava.")),
            contents: vec![GeminiContent::user(vec![GeminiPart::text("Hello")])],
            tools: None,
            generation_config: GeminiGenerationConfig {
                temperature: 0.7,
                top_p: 0.95,
                top_k: 40,
                max_output_tokens: 2048,
                response_mime_type: Some("application/json".to_string()),
            },
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "You are Ava.");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        // tools should not appear when None
        assert!(json.get("tools").is_none());
        // the system instruction carries no role key
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn test_part_constructors_set_exactly_one_field() {
        let text = GeminiPart::text("hi");
        assert!(text.text.is_some());
        assert!(text.inline_data.is_none());
        assert!(text.function_call.is_none());
        assert!(text.function_response.is_none());

        let data = GeminiPart::inline_data("image/png", "AAAA");
        assert!(data.text.is_none());
        assert_eq!(data.inline_data.as_ref().unwrap().mime_type, "image/png");

        let reply = GeminiPart::function_response("web_search", serde_json::json!({"content": "x"}));
        let inner = reply.function_response.unwrap();
        assert_eq!(inner.name, "web_search");
        assert_eq!(inner.response["content"], "x");
    }

    #[test]
    fn test_inline_data_wire_shape() {
        let part = GeminiPart::inline_data("image/png", "iVBORw0KGgo=");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inlineData"]["mimeType"], "image/png");
        assert_eq!(json["inlineData"]["data"], "iVBORw0KGgo=");
        assert!(json.get("text").is_none());
    }

    #[test]
    fn test_function_call_candidate_deserialization() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"functionCall": {"name": "web_search", "args": {"query": "acme pricing"}}}]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        let content = resp.candidates[0].content.as_ref().unwrap();
        let calls = content.function_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "web_search");
        assert_eq!(calls[0].args["query"], "acme pricing");
        assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_text_candidate_deserialization() {
        let json = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"responseText\":\"Hi\"}"}]}
            }]
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        let content = resp.candidates[0].content.as_ref().unwrap();
        assert_eq!(content.text(), "{\"responseText\":\"Hi\"}");
        assert!(content.function_calls().is_empty());
    }

    #[test]
    fn test_unknown_part_kind_is_tolerated() {
        let json = r#"{"thoughtSignature": "abc123"}"#;
        let part: GeminiPart = serde_json::from_str(json).unwrap();
        assert!(part.text.is_none());
        assert!(part.function_call.is_none());
    }

    #[test]
    fn test_empty_response_deserializes() {
        let resp: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.candidates.is_empty());
    }
}
