//! Contact exchange detection across the conversation.
//!
//! Scans the normalized history once and answers two questions the rest
//! of the turn needs: has the assistant already asked for contact
//! details, and has the visitor already volunteered any. The prompt
//! suppression check passes on either signal; the webhook gate in the
//! lead notifier only looks at what a visitor actually provided.

use leadline_types::lead::ContactStatus;
use leadline_types::turn::{ChatRole, NormalizedMessage};

use crate::context::patterns;

pub struct ContactStatusTracker;

impl ContactStatusTracker {
    /// Derive the contact exchange status from a normalized history.
    pub fn status(history: &[NormalizedMessage]) -> ContactStatus {
        let mut status = ContactStatus::default();
        for message in history {
            let text = message.text();
            match message.role {
                ChatRole::Assistant => {
                    if patterns::asks_for_contact(&text) {
                        status.already_asked = true;
                    }
                }
                ChatRole::User => {
                    if patterns::find_email(&text).is_some() {
                        status.details.has_email = true;
                    }
                    if patterns::find_phone(&text).is_some() {
                        status.details.has_phone = true;
                    }
                    if patterns::find_name(&text).is_some() {
                        status.details.has_name = true;
                    }
                }
            }
        }
        status.already_provided =
            status.details.has_email || status.details.has_phone || status.details.has_name;
        status
    }
}
