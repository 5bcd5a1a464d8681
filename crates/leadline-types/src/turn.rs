//! Inbound turn and normalized message types.
//!
//! A `Turn` is one raw history entry as the embedding widget sends it:
//! loose role vocabulary, content as either a flat string or a list of
//! parts. A `NormalizedMessage` is the canonical two-role form the rest
//! of the pipeline works with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a raw inbound turn. Widgets use a loose vocabulary; `agent`
/// is accepted as an alias for `assistant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    #[serde(alias = "agent")]
    Assistant,
    System,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
            TurnRole::System => write!(f, "system"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" | "agent" => Ok(TurnRole::Assistant),
            "system" => Ok(TurnRole::System),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One content part of a structured turn. Both fields optional: parts
/// with neither non-empty text nor a media URL are discarded during
/// normalization. Unknown keys from the widget are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

/// Turn content: either a flat string or a list of parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TurnContent {
    Text(String),
    Parts(Vec<TurnPart>),
}

/// One raw history entry. Immutable once created; produced by the
/// caller and consumed read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: TurnContent,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: TurnContent::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: TurnContent::Text(text.into()),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::System,
            content: TurnContent::Text(text.into()),
        }
    }
}

/// Role of a normalized message. Exactly two values: system turns are
/// folded into `user` during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One part of a normalized message: text or a media reference.
///
/// Wire shape is `{"text": …}` or `{"mediaUrl": …}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessagePart {
    Text {
        text: String,
    },
    Media {
        #[serde(rename = "mediaUrl")]
        media_url: String,
    },
}

/// A canonical two-role message. Invariant: `parts` is non-empty.
/// Synthetic eviction summaries are marked `is_summary = true`; messages
/// are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMessage {
    pub role: ChatRole,
    pub parts: Vec<MessagePart>,
    #[serde(default)]
    pub is_summary: bool,
}

impl NormalizedMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            parts: vec![MessagePart::Text { text: text.into() }],
            is_summary: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            parts: vec![MessagePart::Text { text: text.into() }],
            is_summary: false,
        }
    }

    /// A synthetic eviction summary (assistant role, `is_summary` set).
    pub fn summary(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            parts: vec![MessagePart::Text { text: text.into() }],
            is_summary: true,
        }
    }

    /// All text parts joined with newlines. Media parts are skipped.
    pub fn text(&self) -> String {
        let texts: Vec<&str> = self
            .parts
            .iter()
            .filter_map(|p| match p {
                MessagePart::Text { text } => Some(text.as_str()),
                MessagePart::Media { .. } => None,
            })
            .collect();
        texts.join("\n")
    }

    /// Character count across all parts (media URLs included), used by
    /// the token estimator.
    pub fn content_len(&self) -> usize {
        self.parts
            .iter()
            .map(|p| match p {
                MessagePart::Text { text } => text.chars().count(),
                MessagePart::Media { media_url } => media_url.chars().count(),
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_agent_alias() {
        let role: TurnRole = serde_json::from_str("\"agent\"").unwrap();
        assert_eq!(role, TurnRole::Assistant);
        let role: TurnRole = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(role, TurnRole::Assistant);
    }

    #[test]
    fn test_turn_role_roundtrip() {
        for role in [TurnRole::User, TurnRole::Assistant, TurnRole::System] {
            let s = role.to_string();
            let parsed: TurnRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
        assert_eq!("agent".parse::<TurnRole>().unwrap(), TurnRole::Assistant);
    }

    #[test]
    fn test_turn_content_flat_string() {
        let turn: Turn = serde_json::from_str(r#"{"role":"user","content":"hello"}"#).unwrap();
        assert_eq!(turn.content, TurnContent::Text("hello".to_string()));
    }

    #[test]
    fn test_turn_content_parts() {
        let json = r#"{"role":"agent","content":[{"text":"hi"},{"mediaUrl":"https://x.test/a.png"}]}"#;
        let turn: Turn = serde_json::from_str(json).unwrap();
        assert_eq!(turn.role, TurnRole::Assistant);
        match turn.content {
            TurnContent::Parts(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0].text.as_deref(), Some("hi"));
                assert_eq!(parts[1].media_url.as_deref(), Some("https://x.test/a.png"));
            }
            TurnContent::Text(_) => panic!("expected parts"),
        }
    }

    #[test]
    fn test_turn_part_unknown_keys_ignored() {
        let json = r#"{"text":"hi","timestamp":12345}"#;
        let part: TurnPart = serde_json::from_str(json).unwrap();
        assert_eq!(part.text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_message_part_wire_shape() {
        let part = MessagePart::Media {
            media_url: "https://x.test/a.png".to_string(),
        };
        let json = serde_json::to_string(&part).unwrap();
        assert_eq!(json, r#"{"mediaUrl":"https://x.test/a.png"}"#);
        let text = MessagePart::Text {
            text: "hi".to_string(),
        };
        assert_eq!(serde_json::to_string(&text).unwrap(), r#"{"text":"hi"}"#);
    }

    #[test]
    fn test_normalized_message_text_joins_parts() {
        let msg = NormalizedMessage {
            role: ChatRole::User,
            parts: vec![
                MessagePart::Text {
                    text: "line one".to_string(),
                },
                MessagePart::Media {
                    media_url: "https://x.test/a.png".to_string(),
                },
                MessagePart::Text {
                    text: "line two".to_string(),
                },
            ],
            is_summary: false,
        };
        assert_eq!(msg.text(), "line one\nline two");
    }

    #[test]
    fn test_content_len_counts_all_parts() {
        let msg = NormalizedMessage {
            role: ChatRole::User,
            parts: vec![
                MessagePart::Text {
                    text: "abcd".to_string(),
                },
                MessagePart::Media {
                    media_url: "http://a".to_string(),
                },
            ],
            is_summary: false,
        };
        assert_eq!(msg.content_len(), 12);
    }

    #[test]
    fn test_summary_constructor() {
        let msg = NormalizedMessage::summary("[Earlier conversation summary: ...]");
        assert_eq!(msg.role, ChatRole::Assistant);
        assert!(msg.is_summary);
        assert!(!msg.parts.is_empty());
    }

    #[test]
    fn test_is_summary_defaults_false_on_wire() {
        let json = r#"{"role":"user","parts":[{"text":"hi"}]}"#;
        let msg: NormalizedMessage = serde_json::from_str(json).unwrap();
        assert!(!msg.is_summary);
    }
}
