//! Context tool ports for tool-enabled generation.
//!
//! The primary backend may ask for extra context mid-turn: page content
//! from the business's own website, or a web search for questions the
//! knowledge base cannot answer. Implementations live in the
//! infrastructure layer; both calls resolve to plain text because the
//! results are spliced straight into the model conversation. A source
//! that fails or times out becomes an inline placeholder, never an
//! error, so one dead URL cannot sink the turn.

/// Tool execution port used by the primary generation backend.
pub trait ContextTools: Send + Sync {
    /// Fetch and concatenate readable text from the given website URLs,
    /// most relevant to `query` first.
    fn fetch_website_context(
        &self,
        urls: &[String],
        query: &str,
    ) -> impl std::future::Future<Output = String> + Send;

    /// Run a web search for `query` and return a text digest of results.
    fn web_search(&self, query: &str) -> impl std::future::Future<Output = String> + Send;
}

/// Inline placeholder spliced in for a source that failed or timed out.
pub fn retrieval_placeholder(source: &str) -> String {
    format!("[could not retrieve {source}]")
}
