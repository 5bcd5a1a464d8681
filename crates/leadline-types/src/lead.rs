//! Contact tracking and lead webhook payload types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::turn::ChatRole;

/// Sentinel rendered for missing lead fields in the webhook payload.
/// Fields are never omitted.
pub const NOT_PROVIDED: &str = "Not provided";

/// Per-field detail of contact info found in user messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub has_name: bool,
    pub has_email: bool,
    pub has_phone: bool,
}

/// Contact-exchange state derived from the full history. Recomputed per
/// request, never persisted.
///
/// The two flags feed different decisions: prompt suppression uses
/// asked-OR-provided, lead qualification uses provided-only. That
/// asymmetry is intentional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStatus {
    pub already_asked: bool,
    pub already_provided: bool,
    pub details: ContactDetails,
}

impl ContactStatus {
    /// Whether the prompt should tell the model not to ask for contact
    /// details again.
    pub fn suppress_contact_request(&self) -> bool {
        self.already_asked || self.already_provided
    }
}

/// Agent identity block included in the webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub name: String,
    pub description: String,
}

/// One line of conversation history as delivered to the webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryLine {
    pub role: ChatRole,
    pub text: String,
}

/// Webhook payload for a qualified lead. Missing lead fields carry the
/// [`NOT_PROVIDED`] sentinel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub lead_name: String,
    pub lead_email: String,
    pub lead_phone: String,
    pub conversation_summary: String,
    pub full_history: Vec<HistoryLine>,
    pub captured_at: DateTime<Utc>,
    pub agent: AgentIdentity,
    pub source_website: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppress_on_asked_only() {
        let status = ContactStatus {
            already_asked: true,
            ..ContactStatus::default()
        };
        assert!(status.suppress_contact_request());
    }

    #[test]
    fn test_suppress_on_provided_only() {
        let status = ContactStatus {
            already_provided: true,
            details: ContactDetails {
                has_email: true,
                ..ContactDetails::default()
            },
            ..ContactStatus::default()
        };
        assert!(status.suppress_contact_request());
    }

    #[test]
    fn test_no_suppression_by_default() {
        assert!(!ContactStatus::default().suppress_contact_request());
    }

    #[test]
    fn test_lead_payload_wire_shape() {
        let payload = LeadPayload {
            lead_name: "John".to_string(),
            lead_email: "john@x.com".to_string(),
            lead_phone: NOT_PROVIDED.to_string(),
            conversation_summary: "Asked about pricing".to_string(),
            full_history: vec![HistoryLine {
                role: ChatRole::User,
                text: "hi".to_string(),
            }],
            captured_at: Utc::now(),
            agent: AgentIdentity {
                name: "Ava".to_string(),
                description: "Sales assistant".to_string(),
            },
            source_website: Some("https://acme.test".to_string()),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"leadName\":\"John\""));
        assert!(json.contains("\"leadPhone\":\"Not provided\""));
        assert!(json.contains("\"capturedAt\""));
        assert!(json.contains("\"fullHistory\""));
    }
}
