//! Empty-response guard.
//!
//! A model that returns valid JSON with an empty `responseText` would
//! otherwise render as a blank bubble in the chat widget. The guard
//! replaces emptiness with a clarification that echoes the visitor's
//! question, so the turn stays conversational instead of dead-ending.

use leadline_types::agent::AgentTurnResult;

/// Maximum characters of the visitor query echoed into a clarification.
const QUERY_SNIPPET_CAP: usize = 60;

/// Clarification used when there is no query text and no summary to echo.
pub const CLARIFICATION_FALLBACK: &str =
    "Could you tell me a bit more about what you need help with?";

pub struct ResponseGuard;

impl ResponseGuard {
    /// Replace an empty `response_text` with a clarification.
    ///
    /// Prefers echoing a snippet of the visitor's question; falls back
    /// to the conversation summary, then to a generic clarification.
    /// Non-empty responses pass through untouched.
    pub fn ensure(result: &mut AgentTurnResult, query: &str) {
        if !result.response_text.trim().is_empty() {
            return;
        }
        tracing::warn!("Model returned an empty response, substituting a clarification");

        let snippet = truncate_on_word(query, QUERY_SNIPPET_CAP);
        result.response_text = if !snippet.is_empty() {
            format!(
                "I want to make sure I understood your question about \"{snippet}\" correctly. \
                 Could you share a bit more detail?"
            )
        } else if let Some(summary) = result
            .conversation_summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        {
            format!(
                "I may have lost the thread for a moment. So far we have covered: {summary}. \
                 Could you rephrase your question?"
            )
        } else {
            CLARIFICATION_FALLBACK.to_string()
        };
    }
}

/// Trim `text` and cut it to at most `max_chars` characters without
/// splitting a word, appending an ellipsis when anything was cut.
pub fn truncate_on_word(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    let Some(next) = chars.next() else {
        return head;
    };

    let safe = if next.is_whitespace() {
        head.as_str()
    } else {
        // The cut landed inside a word; back up to the last break. A
        // single overlong word gets a hard cut.
        match head.rfind(char::is_whitespace) {
            Some(idx) => &head[..idx],
            None => head.as_str(),
        }
    };
    format!("{}…", safe.trim_end())
}
