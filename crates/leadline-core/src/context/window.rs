//! Token-budget reduction of long conversations.
//!
//! Reduction is tiered. The newest messages always win, older messages
//! earn their place through the importance classifier, and everything
//! evicted is condensed into one synthetic summary message so the model
//! still knows the conversation did not start a moment ago.

use leadline_types::config::ContextConfig;
use leadline_types::turn::{ChatRole, NormalizedMessage};

use crate::context::estimate::estimate_message_tokens;
use crate::context::importance::ImportanceClassifier;

/// Share of the budget the recency tier plus readmitted older messages
/// may occupy. The remainder stays free for the eviction summary.
const OLDER_CUTOFF_RATIO: f64 = 0.9;

/// Canonical topic labels with the vocabulary that triggers them, in the
/// order they appear in the eviction summary.
const TOPIC_GROUPS: &[(&str, &[&str])] = &[
    ("pricing", &["price", "pricing", "cost", "quote", "how much", "budget"]),
    ("features", &["feature", "integrat", "capabilit", "how does", "does it"]),
    ("issues", &["issue", "problem", "error", "bug", "broken", "not working", "trouble"]),
    ("contact", &["email", "phone", "contact", "reach", "call"]),
];

/// Reduces normalized histories to a fixed token budget.
#[derive(Debug, Clone)]
pub struct ContextWindowManager {
    max_tokens: u32,
    recency_window: usize,
}

impl ContextWindowManager {
    pub fn new(max_tokens: u32, recency_window: usize) -> Self {
        Self {
            max_tokens,
            recency_window,
        }
    }

    pub fn from_config(config: &ContextConfig) -> Self {
        Self::new(config.max_context_tokens, config.recency_window)
    }

    /// Reduce `history` to fit the configured budget.
    ///
    /// The newest `recency_window` messages form the protected tier; if
    /// that tier alone exceeds the budget it is trimmed oldest-first,
    /// but never below the single newest message. Older messages are
    /// then readmitted newest-first when the importance classifier
    /// flags them, stopping at the first one that would push the total
    /// past the older-tier cutoff. If anything was evicted, a summary
    /// message goes in first position, provided it fits the leftover
    /// budget. When nothing is evicted the history is returned as-is.
    pub fn reduce(&self, history: &[NormalizedMessage]) -> Vec<NormalizedMessage> {
        let split = history.len().saturating_sub(self.recency_window);
        let (older, recent) = history.split_at(split);

        let mut tier_start = 0;
        let mut used: u32 = recent.iter().map(estimate_message_tokens).sum();
        while used > self.max_tokens && tier_start + 1 < recent.len() {
            used = used.saturating_sub(estimate_message_tokens(&recent[tier_start]));
            tier_start += 1;
        }

        let cutoff = (f64::from(self.max_tokens) * OLDER_CUTOFF_RATIO) as u32;
        let mut kept_older: Vec<usize> = Vec::new();
        for (idx, message) in older.iter().enumerate().rev() {
            if !ImportanceClassifier::is_important(message) {
                continue;
            }
            let cost = estimate_message_tokens(message);
            if used + cost >= cutoff {
                break;
            }
            used += cost;
            kept_older.push(idx);
        }
        kept_older.reverse();

        let mut dropped_user = 0usize;
        let mut dropped_assistant = 0usize;
        let mut dropped_text = String::new();
        let mut record_drop = |message: &NormalizedMessage| {
            match message.role {
                ChatRole::User => dropped_user += 1,
                ChatRole::Assistant => dropped_assistant += 1,
            }
            dropped_text.push_str(&message.text().to_lowercase());
            dropped_text.push('\n');
        };
        for (idx, message) in older.iter().enumerate() {
            if kept_older.binary_search(&idx).is_err() {
                record_drop(message);
            }
        }
        for message in &recent[..tier_start] {
            record_drop(message);
        }

        if dropped_user + dropped_assistant == 0 {
            return history.to_vec();
        }

        let mut reduced = Vec::with_capacity(1 + kept_older.len() + recent.len() - tier_start);
        let summary = NormalizedMessage::summary(build_summary_text(
            dropped_user,
            dropped_assistant,
            &detect_topics(&dropped_text),
        ));
        let summary_cost = estimate_message_tokens(&summary);
        if used + summary_cost <= self.max_tokens {
            reduced.push(summary);
        } else {
            tracing::debug!(
                summary_cost,
                used,
                max_tokens = self.max_tokens,
                "No budget left for the eviction summary, omitting it"
            );
        }
        reduced.extend(kept_older.iter().map(|&idx| older[idx].clone()));
        reduced.extend(recent[tier_start..].iter().cloned());

        tracing::debug!(
            original_len = history.len(),
            reduced_len = reduced.len(),
            dropped_user,
            dropped_assistant,
            estimated_tokens = used,
            "Reduced context window"
        );
        reduced
    }
}

fn detect_topics(dropped_text: &str) -> Vec<&'static str> {
    TOPIC_GROUPS
        .iter()
        .filter(|(_, vocabulary)| vocabulary.iter().any(|word| dropped_text.contains(word)))
        .map(|(label, _)| *label)
        .collect()
}

fn build_summary_text(dropped_user: usize, dropped_assistant: usize, topics: &[&str]) -> String {
    let mut counts: Vec<String> = Vec::with_capacity(2);
    if dropped_user > 0 {
        counts.push(count_noun(dropped_user, "visitor message", "visitor messages"));
    }
    if dropped_assistant > 0 {
        counts.push(count_noun(dropped_assistant, "assistant response", "assistant responses"));
    }
    let topics_clause = if topics.is_empty() {
        String::new()
    } else {
        format!(", discussing {}", topics.join(", "))
    };
    format!(
        "[Earlier conversation summary: {} were exchanged{topics_clause}]",
        counts.join(" and ")
    )
}

fn count_noun(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
