//! Core orchestration logic for Leadline.
//!
//! This crate is transport-agnostic: it defines the context window
//! reduction pipeline, the generation backend traits with their timeout
//! and fallback machinery, and the lead capture pipeline. Concrete HTTP
//! clients live in `leadline-infra`.

pub mod agent;
pub mod context;
pub mod lead;
pub mod llm;
pub mod tools;
