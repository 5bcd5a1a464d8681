//! Inbound transcript normalization.
//!
//! Widget embeds send whatever their host page accumulated: roles named
//! `agent` or `system`, flat strings next to part arrays, empty filler
//! turns, and duplicated sends from double-clicked submit buttons. The
//! normalizer flattens all of that into the strict two-role shape the
//! rest of the pipeline consumes.

use leadline_types::turn::{
    ChatRole, MessagePart, NormalizedMessage, Turn, TurnContent, TurnRole,
};

pub struct MessageNormalizer;

impl MessageNormalizer {
    /// Normalize a raw transcript into provider-ready messages.
    ///
    /// Folds `system` turns into the user role, flattens content into
    /// non-empty parts, drops turns with nothing left after trimming,
    /// and collapses a turn that exactly repeats the last kept message.
    /// Running the output through `normalize` again is a no-op.
    pub fn normalize(turns: &[Turn]) -> Vec<NormalizedMessage> {
        let mut out: Vec<NormalizedMessage> = Vec::with_capacity(turns.len());
        for turn in turns {
            let role = match turn.role {
                TurnRole::User | TurnRole::System => ChatRole::User,
                TurnRole::Assistant => ChatRole::Assistant,
            };
            let parts = Self::flatten_content(&turn.content);
            if parts.is_empty() {
                continue;
            }
            // Dedup compares against the last kept message, not the last
            // raw turn, so A-B-A survives while A-A-B collapses.
            if let Some(last) = out.last() {
                if last.role == role && last.parts == parts {
                    continue;
                }
            }
            out.push(NormalizedMessage {
                role,
                parts,
                is_summary: false,
            });
        }
        out
    }

    fn flatten_content(content: &TurnContent) -> Vec<MessagePart> {
        match content {
            TurnContent::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Vec::new()
                } else {
                    vec![MessagePart::Text {
                        text: trimmed.to_string(),
                    }]
                }
            }
            TurnContent::Parts(parts) => parts
                .iter()
                .filter_map(|part| {
                    if let Some(text) = &part.text {
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            return Some(MessagePart::Text {
                                text: trimmed.to_string(),
                            });
                        }
                    }
                    if let Some(url) = &part.media_url {
                        let trimmed = url.trim();
                        if !trimmed.is_empty() {
                            return Some(MessagePart::Media {
                                media_url: trimmed.to_string(),
                            });
                        }
                    }
                    None
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadline_types::turn::TurnPart;

    fn part_turn(role: TurnRole, parts: Vec<TurnPart>) -> Turn {
        Turn {
            role,
            content: TurnContent::Parts(parts),
        }
    }

    fn text_part(text: &str) -> TurnPart {
        TurnPart {
            text: Some(text.to_string()),
            media_url: None,
        }
    }

    fn media_part(url: &str) -> TurnPart {
        TurnPart {
            text: None,
            media_url: Some(url.to_string()),
        }
    }

    #[test]
    fn folds_roles_into_two() {
        let turns = vec![
            Turn::system("welcome context"),
            Turn::user("hello"),
            Turn::assistant("hi there"),
        ];
        let messages = MessageNormalizer::normalize(&turns);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[2].role, ChatRole::Assistant);
    }

    #[test]
    fn trims_and_drops_empty_turns() {
        let turns = vec![
            Turn::user("  spaced out  "),
            Turn::user("   "),
            Turn::assistant(""),
            part_turn(TurnRole::User, vec![text_part(" "), text_part("")]),
        ];
        let messages = MessageNormalizer::normalize(&turns);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text(), "spaced out");
    }

    #[test]
    fn keeps_media_parts_without_text() {
        let turns = vec![part_turn(
            TurnRole::User,
            vec![text_part("look at this"), media_part("https://cdn.example/one.png")],
        )];
        let messages = MessageNormalizer::normalize(&turns);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].parts.len(), 2);
        assert_eq!(
            messages[0].parts[1],
            MessagePart::Media {
                media_url: "https://cdn.example/one.png".to_string()
            }
        );
    }

    #[test]
    fn collapses_adjacent_duplicates() {
        let turns = vec![
            Turn::user("is there a free trial?"),
            Turn::user("is there a free trial?"),
            Turn::user("is there a free trial?"),
            Turn::assistant("Yes, fourteen days."),
        ];
        let messages = MessageNormalizer::normalize(&turns);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text(), "is there a free trial?");
    }

    #[test]
    fn duplicate_collapse_is_insensitive_to_run_length() {
        for copies in 1..=5 {
            let mut turns = vec![Turn::assistant("How can I help?")];
            for _ in 0..copies {
                turns.push(Turn::user("pricing please"));
            }
            let messages = MessageNormalizer::normalize(&turns);
            assert_eq!(messages.len(), 2, "run of {copies} should collapse to one");
        }
    }

    #[test]
    fn dedup_compares_against_last_kept_message() {
        // The empty turn between the duplicates is dropped, so the second
        // "hello" still collapses against the first.
        let turns = vec![Turn::user("hello"), Turn::user("   "), Turn::user("hello")];
        assert_eq!(MessageNormalizer::normalize(&turns).len(), 1);

        // A different message in between means both copies stay.
        let turns = vec![
            Turn::user("hello"),
            Turn::assistant("hi"),
            Turn::user("hello"),
        ];
        assert_eq!(MessageNormalizer::normalize(&turns).len(), 3);
    }

    #[test]
    fn same_text_different_role_is_not_a_duplicate() {
        let turns = vec![Turn::user("thanks"), Turn::assistant("thanks")];
        assert_eq!(MessageNormalizer::normalize(&turns).len(), 2);
    }

    #[test]
    fn normalization_is_idempotent() {
        let turns = vec![
            Turn::system("page context"),
            Turn::user("  hi  "),
            Turn::user("hi"),
            part_turn(
                TurnRole::Assistant,
                vec![text_part("hello!"), media_part(" https://cdn.example/a.png ")],
            ),
        ];
        let first = MessageNormalizer::normalize(&turns);

        // Feed the normalized output back through as part-shaped turns.
        let round_trip: Vec<Turn> = first
            .iter()
            .map(|message| {
                let parts = message
                    .parts
                    .iter()
                    .map(|part| match part {
                        MessagePart::Text { text } => text_part(text),
                        MessagePart::Media { media_url } => media_part(media_url),
                    })
                    .collect();
                let role = match message.role {
                    ChatRole::User => TurnRole::User,
                    ChatRole::Assistant => TurnRole::Assistant,
                };
                part_turn(role, parts)
            })
            .collect();
        let second = MessageNormalizer::normalize(&round_trip);
        assert_eq!(first, second);
    }
}
