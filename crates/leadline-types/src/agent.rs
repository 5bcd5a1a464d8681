//! Agent profile and turn request/result types.
//!
//! These are the inbound and outbound contracts of the orchestrator:
//! the widget posts an `AgentTurnRequest`, the pipeline returns an
//! `AgentTurnResult`. Wire casing is camelCase to match the embed
//! script.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::turn::Turn;

/// Voice preference attached to an agent profile. Drives the
/// gendered-grammar hint in the prompt for languages with grammatical
/// gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoicePreference {
    Male,
    Female,
    Neutral,
}

impl fmt::Display for VoicePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoicePreference::Male => write!(f, "male"),
            VoicePreference::Female => write!(f, "female"),
            VoicePreference::Neutral => write!(f, "neutral"),
        }
    }
}

impl FromStr for VoicePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(VoicePreference::Male),
            "female" => Ok(VoicePreference::Female),
            "neutral" => Ok(VoicePreference::Neutral),
            other => Err(format!("invalid voice preference: '{other}'")),
        }
    }
}

/// Persona fields for the agent answering this turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-text role/persona instructions configured by the site owner.
    #[serde(default)]
    pub role_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_preference: Option<VoicePreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expertise: Option<String>,
}

/// One uploaded knowledge document (already extracted to plain text).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeDocument {
    pub name: String,
    pub text: String,
}

/// Knowledge sources available to the agent: site URLs consulted via
/// the website tool, plus inline document texts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Knowledge {
    #[serde(default)]
    pub website_urls: Vec<String>,
    #[serde(default)]
    pub documents: Vec<KnowledgeDocument>,
}

impl Knowledge {
    pub fn is_empty(&self) -> bool {
        self.website_urls.is_empty() && self.documents.is_empty()
    }
}

/// Inbound contract: one visitor turn plus everything needed to answer
/// it. All entities are per-request; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTurnRequest {
    pub query: String,
    #[serde(default)]
    pub history: Vec<Turn>,
    /// Optional inline image as a `data:image/...;base64,...` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub profile: AgentProfile,
    #[serde(default)]
    pub knowledge: Knowledge,
    /// Per-agent lead webhook; falls back to the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_website: Option<String>,
}

/// Outbound contract: the structured reply for one turn.
///
/// Produced once per request and mutated in place by exactly two
/// post-generation steps, in order: the lead extractor (fills unset
/// lead fields from the raw query) and the response guard (replaces an
/// empty `response_text`). Nullable fields serialize as explicit nulls
/// so the widget can rely on key presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTurnResult {
    pub response_text: String,
    pub lead_name: Option<String>,
    pub lead_email: Option<String>,
    pub lead_phone: Option<String>,
    pub conversation_summary: Option<String>,
    pub knowledge_gap_query: Option<String>,
    pub knowledge_gap_category: Option<String>,
}

impl AgentTurnResult {
    /// A text-only result with no lead or knowledge-gap fields.
    pub fn text_only(response_text: impl Into<String>) -> Self {
        Self {
            response_text: response_text.into(),
            ..Self::default()
        }
    }
}
