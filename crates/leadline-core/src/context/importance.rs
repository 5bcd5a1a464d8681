//! Importance classification for older messages.
//!
//! When the window manager walks past the recency tier it only keeps
//! messages that would hurt to lose: volunteered contact details, a
//! self-introduction, or clear buying intent.

use leadline_types::turn::NormalizedMessage;

use crate::context::patterns;

pub struct ImportanceClassifier;

impl ImportanceClassifier {
    /// Whether a message outside the recency tier is worth retaining.
    pub fn is_important(message: &NormalizedMessage) -> bool {
        let text = message.text();
        patterns::find_email(&text).is_some()
            || patterns::find_phone(&text).is_some()
            || patterns::find_name(&text).is_some()
            || patterns::has_intent_keyword(&text)
    }
}
