//! Configuration for the Leadline orchestrator.
//!
//! `LeadlineConfig` represents the top-level `leadline.toml`. All fields
//! have sensible defaults so an empty or missing file yields a working
//! configuration. API keys never live here; they come from the
//! environment.

use serde::{Deserialize, Serialize};

use crate::llm::GenerationConfig;

/// Top-level configuration for the orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadlineConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub generation: GenerationSection,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
}

/// HTTP server binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Primary generation backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSection {
    #[serde(default = "default_primary_model")]
    pub primary_model: String,
    /// Hard ceiling on the primary attempt; on expiry the fixed timeout
    /// response is returned and the fallback cascade is never entered.
    #[serde(default = "default_primary_timeout_secs")]
    pub primary_timeout_secs: u64,
    #[serde(default = "GenerationConfig::default")]
    pub sampling: GenerationConfig,
}

fn default_primary_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_primary_timeout_secs() -> u64 {
    30
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            primary_model: default_primary_model(),
            primary_timeout_secs: default_primary_timeout_secs(),
            sampling: GenerationConfig::default(),
        }
    }
}

/// Context window budgeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Token ceiling for the retained window (estimated tokens).
    #[serde(default = "default_max_context_tokens")]
    pub max_context_tokens: u32,
    /// Number of most-recent messages kept with top priority.
    #[serde(default = "default_recency_window")]
    pub recency_window: usize,
}

fn default_max_context_tokens() -> u32 {
    8000
}

fn default_recency_window() -> usize {
    50
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_context_tokens: default_max_context_tokens(),
            recency_window: default_recency_window(),
        }
    }
}

/// Fallback cascade settings: ordered model identifiers tried
/// first-success-wins after a non-timeout primary failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
}

fn default_candidates() -> Vec<String> {
    vec![
        "google/gemini-2.0-flash-001".to_string(),
        "meta-llama/llama-3.3-70b-instruct".to_string(),
        "qwen/qwen-2.5-72b-instruct".to_string(),
    ]
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
        }
    }
}

/// External context tools (website reader, web search).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Reader endpoint that returns page text for a URL.
    #[serde(default)]
    pub reader_url: Option<String>,
    /// Search endpoint that returns result snippets for a query.
    #[serde(default)]
    pub search_url: Option<String>,
    #[serde(default = "default_tool_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_tool_timeout_secs() -> u64 {
    8
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            reader_url: None,
            search_url: None,
            timeout_secs: default_tool_timeout_secs(),
        }
    }
}

/// Lead webhook settings. The per-request webhook URL wins; this is the
/// fallback default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default)]
    pub default_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: LeadlineConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generation.primary_model, "gemini-2.5-flash");
        assert_eq!(config.generation.primary_timeout_secs, 30);
        assert_eq!(config.context.max_context_tokens, 8000);
        assert_eq!(config.context.recency_window, 50);
        assert_eq!(config.fallback.candidates.len(), 3);
        assert_eq!(config.tools.timeout_secs, 8);
        assert!(config.webhook.default_url.is_none());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let toml_str = r#"
[server]
port = 9000

[generation]
primary_model = "gemini-2.5-pro"

[generation.sampling]
temperature = 0.3

[context]
max_context_tokens = 4000

[fallback]
candidates = ["google/gemini-2.0-flash-001"]

[webhook]
default_url = "https://hooks.test/lead"
"#;
        let config: LeadlineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.generation.primary_model, "gemini-2.5-pro");
        assert!((config.generation.sampling.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.generation.sampling.top_k, 40);
        assert_eq!(config.context.max_context_tokens, 4000);
        assert_eq!(config.context.recency_window, 50);
        assert_eq!(config.fallback.candidates.len(), 1);
        assert_eq!(
            config.webhook.default_url.as_deref(),
            Some("https://hooks.test/lead")
        );
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = LeadlineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: LeadlineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.context.recency_window, 50);
        assert_eq!(parsed.fallback.candidates, config.fallback.candidates);
    }

    #[test]
    fn test_tools_config_endpoints() {
        let toml_str = r#"
[tools]
reader_url = "https://reader.test/extract"
search_url = "https://search.test/q"
timeout_secs = 5
"#;
        let config: LeadlineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.tools.reader_url.as_deref(),
            Some("https://reader.test/extract")
        );
        assert_eq!(config.tools.timeout_secs, 5);
    }
}
