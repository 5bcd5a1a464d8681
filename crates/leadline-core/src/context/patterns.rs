//! Shared contact and intent patterns.
//!
//! One place for every regex the pipeline relies on: the importance
//! classifier, the contact status tracker, and the lead extractor all
//! read the same definitions, so a message the window manager retains
//! as "important" is the same message the extractor can mine later.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

// Loose candidate shape; `find_phone` applies the minimum-digit filter so
// that order numbers and short codes do not qualify.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\s().-]{6,}\d").expect("valid phone regex"));

// The introduction phrase matches case-insensitively but the captured name
// must be capitalized, which keeps "my name is on the form" from producing
// a lead called "on".
static NAME_INTRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?i:my name is|i am|i'm|this is|call me)) +([A-Z][A-Za-z'-]*(?: +[A-Z][A-Za-z'-]*){0,2})")
        .expect("valid name intro regex")
});

static CONTACT_ASK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(your (full |first |last )?name|your (work |business )?email|email address|phone number|contact (details|info|information)|how can (we|i) reach you|may i have your|could you share your|best (email|number|way) to reach)",
    )
    .expect("valid contact ask regex")
});

/// Business-intent vocabulary used by the importance classifier:
/// purchase and evaluation signals plus support and scheduling phrases.
const INTENT_KEYWORDS: &[&str] = &[
    "problem",
    "issue",
    "error",
    "help",
    "need",
    "want",
    "looking for",
    "interested",
    "pricing",
    "price",
    "cost",
    "quote",
    "demo",
    "schedule",
    "book",
    "buy",
    "purchase",
    "cancel",
    "refund",
    "contact",
    "budget",
    "trial",
    "subscribe",
    "upgrade",
    "enterprise",
    "onboarding",
    "contract",
    "sales",
];

/// First email address in `text`, if any.
pub fn find_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// First plausible phone number in `text`, if any.
///
/// Candidates need at least eight digits, so street numbers and years
/// embedded in prose do not register as phone numbers.
pub fn find_phone(text: &str) -> Option<String> {
    PHONE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| candidate.chars().filter(char::is_ascii_digit).count() >= 8)
        .map(str::to_string)
}

/// Name following a self-introduction phrase, if any.
pub fn find_name(text: &str) -> Option<String> {
    NAME_INTRO
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Whether assistant text asks the visitor for contact details.
pub fn asks_for_contact(text: &str) -> bool {
    CONTACT_ASK.is_match(text)
}

/// Whether user text carries a purchase, support, or scheduling signal.
pub fn has_intent_keyword(text: &str) -> bool {
    let lowered = text.to_lowercase();
    INTENT_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
