//! Gemini primary backend.
//!
//! This module provides the [`GeminiBackend`] which implements the
//! [`GenerationBackend`](leadline_core::llm::backend::GenerationBackend)
//! trait for the Gemini `generateContent` API, including the
//! functionCall/functionResponse loop that executes the context tools.

pub mod client;
pub mod types;

pub use client::GeminiBackend;
