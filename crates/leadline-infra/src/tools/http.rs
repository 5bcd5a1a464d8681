//! HTTP-backed context tools.
//!
//! Delegates website reading and web search to configured external
//! endpoints (scraping and search internals stay outside this service).
//! Every per-source failure or timeout becomes an inline placeholder; a
//! dead URL must never sink the turn. Output is capped per source and
//! in total so tool results cannot blow the context budget.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use leadline_core::tools::{ContextTools, retrieval_placeholder};
use leadline_types::config::ToolsConfig;

/// Per-source cap on retrieved characters.
const PER_SOURCE_CAP: usize = 8_000;

/// Combined cap across all sources of one fetch call.
const COMBINED_CAP: usize = 20_000;

/// HTTP adapter for the context tools port.
///
/// `reader_url` takes a page URL plus the visitor query and returns the
/// page's readable text; `search_url` takes a query and returns a result
/// digest. Unconfigured endpoints yield placeholders immediately.
pub struct HttpContextTools {
    client: reqwest::Client,
    reader_url: Option<String>,
    search_url: Option<String>,
    cancel: CancellationToken,
}

impl HttpContextTools {
    /// Create the tools from config. `cancel` is the server's shutdown
    /// token; when it fires, in-flight retrievals stop, including those
    /// started by turns the orchestrator has since abandoned.
    pub fn new(config: &ToolsConfig, cancel: CancellationToken) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            reader_url: config.reader_url.clone(),
            search_url: config.search_url.clone(),
            cancel,
        }
    }

    /// GET one endpoint, returning the body text or a failure reason.
    async fn get_text(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<String, String> {
        let fetch = async {
            let response = self
                .client
                .get(endpoint)
                .query(params)
                .send()
                .await
                .map_err(|e| format!("request failed: {e}"))?;
            let status = response.status();
            if !status.is_success() {
                return Err(format!("HTTP {status}"));
            }
            response
                .text()
                .await
                .map_err(|e| format!("body read failed: {e}"))
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err("cancelled".to_string()),
            result = fetch => result,
        }
    }
}

impl ContextTools for HttpContextTools {
    async fn fetch_website_context(&self, urls: &[String], query: &str) -> String {
        let Some(reader) = self.reader_url.as_deref() else {
            tracing::debug!("no reader endpoint configured");
            return retrieval_placeholder("website context");
        };

        let cancel = self.cancel.child_token();
        let mut sections: Vec<String> = Vec::new();
        let mut total = 0usize;
        for url in urls {
            let remaining = COMBINED_CAP.saturating_sub(total);
            if remaining == 0 {
                tracing::debug!(combined_cap = COMBINED_CAP, "combined tool output cap reached");
                break;
            }
            let params = [("url", url.as_str()), ("query", query)];
            let section = match self.get_text(reader, &params, &cancel).await {
                Ok(text) if !text.trim().is_empty() => {
                    cap_chars(text.trim(), PER_SOURCE_CAP.min(remaining))
                }
                Ok(_) => retrieval_placeholder(url),
                Err(reason) => {
                    tracing::warn!(url = %url, reason = %reason, "website fetch failed");
                    retrieval_placeholder(url)
                }
            };
            total += section.chars().count();
            sections.push(format!("Content from {url}:\n{section}"));
        }

        if sections.is_empty() {
            return retrieval_placeholder("website context");
        }
        sections.join("\n\n")
    }

    async fn web_search(&self, query: &str) -> String {
        let Some(search) = self.search_url.as_deref() else {
            tracing::debug!("no search endpoint configured");
            return retrieval_placeholder("web search");
        };

        let cancel = self.cancel.child_token();
        match self.get_text(search, &[("q", query)], &cancel).await {
            Ok(text) if !text.trim().is_empty() => cap_chars(text.trim(), PER_SOURCE_CAP),
            Ok(_) => retrieval_placeholder("web search"),
            Err(reason) => {
                tracing::warn!(reason = %reason, "web search failed");
                retrieval_placeholder("web search")
            }
        }
    }
}

/// Truncate to at most `max` characters, always on a char boundary.
fn cap_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
