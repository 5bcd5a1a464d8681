//! Fire-and-forget lead delivery.
//!
//! Dispatch happens on a detached task after the response is already on
//! its way back to the widget: a slow or dead CRM endpoint must never
//! add latency to a visitor-facing turn. Failures are logged and
//! swallowed, the turn does not care.

use std::sync::Arc;

use chrono::Utc;
use leadline_types::agent::{AgentProfile, AgentTurnResult};
use leadline_types::error::NotifyError;
use leadline_types::lead::{AgentIdentity, HistoryLine, LeadPayload, NOT_PROVIDED};
use leadline_types::turn::NormalizedMessage;

/// Delivery port for qualified leads, implemented by the infrastructure
/// layer as an HTTP webhook client.
pub trait LeadSink: Send + Sync {
    fn deliver(
        &self,
        url: &str,
        payload: &LeadPayload,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}

/// Builds lead payloads and dispatches them without blocking the turn.
pub struct LeadNotifier<S> {
    sink: Arc<S>,
}

impl<S: LeadSink + 'static> LeadNotifier<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Whether a turn result qualifies for delivery.
    ///
    /// Qualification needs a reachable detail: an email or a phone
    /// number. A name alone is not actionable for a follow-up, so it
    /// does not trigger the webhook even though it suppresses further
    /// contact requests in the prompt.
    pub fn should_dispatch(result: &AgentTurnResult) -> bool {
        result.lead_email.is_some() || result.lead_phone.is_some()
    }

    /// Assemble the webhook payload for a qualified turn.
    ///
    /// Missing fields are rendered as an explicit sentinel rather than
    /// omitted, so receiving CRMs get a stable shape.
    pub fn build_payload(
        result: &AgentTurnResult,
        history: &[NormalizedMessage],
        profile: &AgentProfile,
        source_website: Option<&str>,
    ) -> LeadPayload {
        let sentinel = || NOT_PROVIDED.to_string();
        LeadPayload {
            lead_name: result.lead_name.clone().unwrap_or_else(sentinel),
            lead_email: result.lead_email.clone().unwrap_or_else(sentinel),
            lead_phone: result.lead_phone.clone().unwrap_or_else(sentinel),
            conversation_summary: result.conversation_summary.clone().unwrap_or_else(sentinel),
            full_history: history
                .iter()
                .map(|message| HistoryLine {
                    role: message.role,
                    text: message.text(),
                })
                .collect(),
            captured_at: Utc::now(),
            agent: AgentIdentity {
                name: profile.name.clone(),
                description: profile.description.clone(),
            },
            source_website: source_website.map(str::to_string),
        }
    }

    /// Deliver `payload` to `url` on a detached task.
    ///
    /// Returns immediately; the spawned task logs the outcome either way.
    pub fn dispatch_detached(&self, url: String, payload: LeadPayload) {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            match sink.deliver(&url, &payload).await {
                Ok(()) => {
                    tracing::info!(url = %url, lead_name = %payload.lead_name, "Lead webhook delivered");
                }
                Err(error) => {
                    tracing::warn!(url = %url, error = %error, "Lead webhook delivery failed");
                }
            }
        });
    }
}
