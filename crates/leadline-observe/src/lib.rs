//! Observability utilities for Leadline.
//!
//! Owns tracing subscriber setup (structured logging plus an optional
//! OpenTelemetry bridge) and the GenAI semantic-convention attribute
//! constants used to instrument generation calls.

pub mod genai_attrs;
pub mod tracing_setup;

pub use tracing_setup::{init_tracing, shutdown_tracing};
