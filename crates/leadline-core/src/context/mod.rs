//! Conversation context handling for Leadline.
//!
//! This module turns tolerant inbound chat transcripts into the normalized
//! message shape the providers consume, and reduces long histories to a
//! token budget:
//! - `MessageNormalizer`: role folding, part flattening, adjacent dedup
//! - `ContextWindowManager`: recency tier plus important-older selection
//! - `ContactStatusTracker`: detects asked-for and volunteered contact info

pub mod contact;
pub mod estimate;
pub mod importance;
pub mod normalize;
pub mod patterns;
pub mod window;
