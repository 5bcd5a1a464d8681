//! OpenRouter fallback backend.
//!
//! This module provides the [`OpenRouterBackend`] which implements the
//! [`GenerationBackend`](leadline_core::llm::backend::GenerationBackend)
//! trait for the OpenRouter chat-completions API. It is the plain-text
//! workhorse behind the fallback cascade: one model id in, one text
//! answer out, no tools.

pub mod client;
pub mod types;

pub use client::OpenRouterBackend;
