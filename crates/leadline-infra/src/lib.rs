//! Outbound adapters for Leadline.
//!
//! Contains implementations of the ports defined in `leadline-core`:
//! the Gemini primary backend, the OpenRouter fallback backend, the HTTP
//! context tools (website reader, web search), and the lead webhook sink.
//! Also owns config-file loading and API-key resolution from the
//! environment.

pub mod config;
pub mod llm;
pub mod tools;
pub mod webhook;
