//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! These follow the OTel GenAI Semantic Conventions specification for
//! consistent generation-call instrumentation across the codebase. All
//! constants are string slices usable in `tracing::span!` and
//! `tracing::info_span!` field names.
//!
//! Span naming convention: `"{operation} {model}"` (e.g., `"generate_content gemini-2.5-flash"`)

// --- Required attributes ---

/// The name of the operation being performed (e.g., "respond", "generate_content").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "gcp.gemini").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

// --- Recommended attributes ---

/// The model ID requested (e.g., "gemini-2.5-flash").
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The sampling temperature for the request.
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";

/// The maximum number of output tokens requested.
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

/// The finish reasons for the response (e.g., "STOP", "MAX_TOKENS").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

// --- Agent-specific attributes ---

/// The display name of the agent persona answering the turn.
pub const GEN_AI_AGENT_NAME: &str = "gen_ai.agent.name";

// --- Operation name values ---

/// Full visitor-turn pipeline (normalize, reduce, generate, post-process).
pub const OP_RESPOND: &str = "respond";

/// Primary tool-calling generation call.
pub const OP_GENERATE_CONTENT: &str = "generate_content";

/// One attempt inside the fallback cascade.
pub const OP_FALLBACK_GENERATE: &str = "fallback_generate";

// --- Provider name values ---

/// Gemini API provider identifier.
pub const PROVIDER_GEMINI: &str = "gcp.gemini";

/// OpenRouter provider identifier.
pub const PROVIDER_OPENROUTER: &str = "openrouter";
