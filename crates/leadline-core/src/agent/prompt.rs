//! Prompt builders for primary and fallback turns.
//!
//! Assembles the system prompt from the agent profile, the business
//! knowledge base, and the contact exchange status, using XML tag
//! boundaries for clear section delineation. The fallback builder
//! produces a single flat prompt instead, because the models at the end
//! of the cascade cannot be trusted with separate system messages or
//! structured output.

use leadline_types::agent::{AgentProfile, Knowledge, VoicePreference};
use leadline_types::lead::ContactStatus;
use leadline_types::turn::{ChatRole, NormalizedMessage};

/// Per-document character cap applied in the fallback prompt.
pub const FALLBACK_DOC_CHAR_CAP: usize = 15_000;

/// Number of trailing conversation messages inlined into the fallback prompt.
pub const FALLBACK_TURN_COUNT: usize = 10;

/// Builds prompts from the agent profile and knowledge base.
///
/// Primary layout:
/// ```text
/// <persona>{name, description, role prompt, tone, style, expertise}</persona>
/// <voice>{grammatical gender hint}</voice>
/// <knowledge>{documents and website URLs}</knowledge>
/// <contact_policy>{collect naturally, or do-not-ask-again warning}</contact_policy>
/// <instructions>{behavior and the JSON response contract}</instructions>
/// ```
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the system prompt for the primary structured turn.
    pub fn build_primary(
        profile: &AgentProfile,
        knowledge: &Knowledge,
        contact: &ContactStatus,
    ) -> String {
        let mut sections = Vec::with_capacity(5);

        // Persona section -- who the agent is on this website
        sections.push(format!("<persona>\n{}\n</persona>", persona_block(profile)));

        // Voice section -- grammatical gender for languages that mark it
        if let Some(voice) = profile.voice_preference {
            sections.push(format!("<voice>\n{}\n</voice>", voice_hint(voice)));
        }

        // Knowledge section -- business documents and site pages
        if !knowledge.is_empty() {
            sections.push(format!(
                "<knowledge>\n{}\n</knowledge>",
                knowledge_block(knowledge, None)
            ));
        }

        // Contact policy section -- ask once, never nag
        sections.push(format!(
            "<contact_policy>\n{}\n</contact_policy>",
            contact_policy(contact)
        ));

        // Instructions section -- behavior plus the response contract
        sections.push(
            "<instructions>\n\
            You are chatting with a visitor on the business's website. Answer from the\n\
            knowledge provided; when it does not cover the question, consult your tools\n\
            before admitting a gap. Keep replies short, warm, and concrete.\n\
            \n\
            Respond with a single JSON object and nothing else, using exactly these keys:\n\
            \"responseText\" (string): your conversational reply to the visitor.\n\
            \"leadName\", \"leadEmail\", \"leadPhone\" (string or null): contact details the visitor has shared in this conversation.\n\
            \"conversationSummary\" (string or null): one or two sentences describing the conversation so far.\n\
            \"knowledgeGapQuery\" (string or null): if the knowledge cannot answer the question, the search query that would.\n\
            \"knowledgeGapCategory\" (string or null): a short label for that gap, such as \"pricing\" or \"shipping\".\n\
            Use null for anything unknown. Never invent contact details.\n\
            </instructions>"
                .to_string(),
        );

        sections.join("\n\n")
    }

    /// Build the flat prompt for a fallback attempt.
    ///
    /// Everything the degraded model needs travels in one text block:
    /// persona, capped knowledge, the tail of the conversation, and the
    /// visitor's question. The reply contract is plain text.
    pub fn build_fallback(
        profile: &AgentProfile,
        knowledge: &Knowledge,
        window: &[NormalizedMessage],
        contact: &ContactStatus,
        query: &str,
    ) -> String {
        let mut blocks = Vec::with_capacity(6);

        blocks.push(persona_block(profile));

        if !knowledge.is_empty() {
            blocks.push(format!(
                "Business knowledge:\n{}",
                knowledge_block(knowledge, Some(FALLBACK_DOC_CHAR_CAP))
            ));
        }

        if contact.suppress_contact_request() {
            blocks.push(contact_policy(contact));
        }

        let tail_from = window.len().saturating_sub(FALLBACK_TURN_COUNT);
        let tail = &window[tail_from..];
        if !tail.is_empty() {
            let lines: Vec<String> = tail
                .iter()
                .map(|message| {
                    let speaker = match message.role {
                        ChatRole::User => "Visitor",
                        ChatRole::Assistant => "Assistant",
                    };
                    format!("{speaker}: {}", message.text())
                })
                .collect();
            blocks.push(format!("Recent conversation:\n{}", lines.join("\n")));
        }

        blocks.push(format!("Visitor's question: {query}"));

        blocks.push(
            "Reply as the assistant in plain conversational text. Do not use JSON, \
             markdown fences, or headings."
                .to_string(),
        );

        blocks.join("\n\n")
    }
}

fn persona_block(profile: &AgentProfile) -> String {
    let mut lines = vec![format!("You are {}, {}.", profile.name, profile.description)];
    if !profile.role_prompt.trim().is_empty() {
        lines.push(profile.role_prompt.trim().to_string());
    }
    if let Some(tone) = &profile.tone {
        lines.push(format!("Tone: {tone}"));
    }
    if let Some(style) = &profile.style {
        lines.push(format!("Style: {style}"));
    }
    if let Some(expertise) = &profile.expertise {
        lines.push(format!("Areas of expertise: {expertise}"));
    }
    lines.join("\n")
}

fn voice_hint(voice: VoicePreference) -> &'static str {
    match voice {
        VoicePreference::Male => {
            "Refer to yourself with masculine grammatical forms in languages that mark gender."
        }
        VoicePreference::Female => {
            "Refer to yourself with feminine grammatical forms in languages that mark gender."
        }
        VoicePreference::Neutral => {
            "Avoid gendered grammatical forms when referring to yourself; prefer neutral phrasing."
        }
    }
}

fn knowledge_block(knowledge: &Knowledge, doc_char_cap: Option<usize>) -> String {
    let mut parts = Vec::with_capacity(knowledge.documents.len() + 1);
    for document in &knowledge.documents {
        let text = match doc_char_cap {
            Some(cap) => truncate_chars(&document.text, cap),
            None => &document.text,
        };
        parts.push(format!("--- {} ---\n{}", document.name, text.trim()));
    }
    if !knowledge.website_urls.is_empty() {
        parts.push(format!(
            "Website pages: {}",
            knowledge.website_urls.join(", ")
        ));
    }
    parts.join("\n\n")
}

fn contact_policy(contact: &ContactStatus) -> String {
    if contact.suppress_contact_request() {
        "The visitor has already been asked for or has already shared their contact \
         details. Do not ask for contact information again."
            .to_string()
    } else {
        "When the visitor shows real interest, you may ask once, naturally, for their \
         name and an email address or phone number so the business can follow up. \
         Never press if they decline."
            .to_string()
    }
}

/// First `max_chars` characters of `text`, on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadline_types::agent::KnowledgeDocument;
    use leadline_types::lead::ContactDetails;

    fn profile() -> AgentProfile {
        AgentProfile {
            name: "Mia".to_string(),
            description: "the assistant for Brightleaf Plants".to_string(),
            role_prompt: "Help visitors pick the right plants and care products.".to_string(),
            voice_preference: Some(VoicePreference::Female),
            tone: Some("friendly".to_string()),
            style: None,
            expertise: Some("indoor plants, care schedules".to_string()),
        }
    }

    fn knowledge() -> Knowledge {
        Knowledge {
            website_urls: vec!["https://brightleaf.example/faq".to_string()],
            documents: vec![KnowledgeDocument {
                name: "care-guide.md".to_string(),
                text: "Water ferns twice a week.".to_string(),
            }],
        }
    }

    fn open_contact() -> ContactStatus {
        ContactStatus::default()
    }

    fn exchanged_contact() -> ContactStatus {
        ContactStatus {
            already_asked: true,
            already_provided: false,
            details: ContactDetails::default(),
        }
    }

    #[test]
    fn primary_prompt_has_all_sections() {
        let prompt = PromptBuilder::build_primary(&profile(), &knowledge(), &open_contact());
        assert!(prompt.contains("<persona>"));
        assert!(prompt.contains("You are Mia, the assistant for Brightleaf Plants."));
        assert!(prompt.contains("<voice>"));
        assert!(prompt.contains("feminine"));
        assert!(prompt.contains("<knowledge>"));
        assert!(prompt.contains("--- care-guide.md ---"));
        assert!(prompt.contains("https://brightleaf.example/faq"));
        assert!(prompt.contains("<contact_policy>"));
        assert!(prompt.contains("<instructions>"));
    }

    #[test]
    fn primary_prompt_lists_response_contract_keys() {
        let prompt = PromptBuilder::build_primary(&profile(), &knowledge(), &open_contact());
        for key in [
            "responseText",
            "leadName",
            "leadEmail",
            "leadPhone",
            "conversationSummary",
            "knowledgeGapQuery",
            "knowledgeGapCategory",
        ] {
            assert!(prompt.contains(key), "missing contract key {key}");
        }
    }

    #[test]
    fn empty_knowledge_omits_the_section() {
        let prompt =
            PromptBuilder::build_primary(&profile(), &Knowledge::default(), &open_contact());
        assert!(!prompt.contains("<knowledge>"));
    }

    #[test]
    fn voice_section_is_optional() {
        let mut quiet = profile();
        quiet.voice_preference = None;
        let prompt = PromptBuilder::build_primary(&quiet, &knowledge(), &open_contact());
        assert!(!prompt.contains("<voice>"));
    }

    #[test]
    fn contact_policy_flips_once_exchanged() {
        let open = PromptBuilder::build_primary(&profile(), &knowledge(), &open_contact());
        assert!(open.contains("you may ask once"));

        let done = PromptBuilder::build_primary(&profile(), &knowledge(), &exchanged_contact());
        assert!(done.contains("Do not ask for contact information again"));
        assert!(!done.contains("you may ask once"));
    }

    #[test]
    fn fallback_prompt_is_flat_and_plain_text() {
        let window = vec![
            NormalizedMessage::user("do you sell pots?"),
            NormalizedMessage::assistant("We do, ceramic and terracotta."),
        ];
        let prompt = PromptBuilder::build_fallback(
            &profile(),
            &knowledge(),
            &window,
            &open_contact(),
            "which is cheaper?",
        );
        assert!(!prompt.contains('<'));
        assert!(prompt.contains("Visitor: do you sell pots?"));
        assert!(prompt.contains("Assistant: We do, ceramic and terracotta."));
        assert!(prompt.contains("Visitor's question: which is cheaper?"));
        assert!(prompt.contains("plain conversational text"));
    }

    #[test]
    fn fallback_prompt_keeps_only_the_conversation_tail() {
        let mut window = Vec::new();
        for i in 0..15 {
            window.push(NormalizedMessage::user(format!("question {i}")));
        }
        let prompt = PromptBuilder::build_fallback(
            &profile(),
            &Knowledge::default(),
            &window,
            &open_contact(),
            "latest",
        );
        assert!(!prompt.contains("question 4"));
        assert!(prompt.contains("question 5"));
        assert!(prompt.contains("question 14"));
    }

    #[test]
    fn fallback_prompt_caps_document_length() {
        let big = Knowledge {
            website_urls: Vec::new(),
            documents: vec![KnowledgeDocument {
                name: "catalog.md".to_string(),
                text: "é".repeat(FALLBACK_DOC_CHAR_CAP + 500),
            }],
        };
        let prompt =
            PromptBuilder::build_fallback(&profile(), &big, &[], &open_contact(), "hi");
        let doc_chars = prompt.chars().filter(|c| *c == 'é').count();
        assert_eq!(doc_chars, FALLBACK_DOC_CHAR_CAP);
    }

    #[test]
    fn fallback_prompt_carries_suppression_warning() {
        let prompt = PromptBuilder::build_fallback(
            &profile(),
            &knowledge(),
            &[],
            &exchanged_contact(),
            "hello",
        );
        assert!(prompt.contains("Do not ask for contact information again"));
    }
}
