//! Shared domain types for Leadline.
//!
//! This crate contains the types used across the Leadline response
//! orchestrator: inbound turns, normalized messages, agent profiles,
//! lead payloads, generation requests, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod agent;
pub mod config;
pub mod error;
pub mod lead;
pub mod llm;
pub mod turn;
