//! Turn orchestration for Leadline agents.
//!
//! This module assembles prompts from the agent profile and knowledge
//! base, races the primary backend against its deadline, degrades to
//! the fallback cascade when needed, and drives the post-processing
//! pipeline that every response passes through before it leaves.

pub mod orchestrator;
pub mod prompt;
pub mod service;
