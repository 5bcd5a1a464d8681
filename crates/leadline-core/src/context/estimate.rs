//! Character-based token estimation.
//!
//! The window manager only needs a monotonic proxy for provider token
//! counts, not an exact tokenizer: four characters per token is the
//! usual rule of thumb and overshoots short messages, which is the safe
//! direction for budget enforcement.

use leadline_types::turn::NormalizedMessage;

/// Estimated token count for a piece of text, rounded up.
pub fn estimate_tokens(text: &str) -> u32 {
    estimate_chars(text.chars().count())
}

/// Estimated token count for a raw character count, rounded up.
pub fn estimate_chars(chars: usize) -> u32 {
    chars.div_ceil(4) as u32
}

/// Estimated token count for one normalized message, media URLs included.
pub fn estimate_message_tokens(message: &NormalizedMessage) -> u32 {
    estimate_chars(message.content_len())
}

/// Estimated token count for a whole window.
pub fn estimate_window_tokens(messages: &[NormalizedMessage]) -> u32 {
    messages.iter().map(estimate_message_tokens).sum()
}
