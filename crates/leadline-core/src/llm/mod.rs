//! Generation backend abstractions for Leadline.
//!
//! This module defines the traits and utilities the orchestrator builds on:
//! - `GenerationBackend`: RPITIT trait for concrete provider implementations
//! - `BoxGenerationBackend`: Object-safe wrapper for dynamic dispatch
//! - `FallbackCascade`: ordered first-success model sweep for degraded turns

pub mod backend;
pub mod box_backend;
pub mod cascade;
