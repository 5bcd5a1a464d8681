//! The `GenerationBackend` trait definition.

use leadline_types::llm::{GenerationOutcome, GenerationRequest, LlmError};

/// A generation backend that turns one request into one structured outcome.
///
/// Uses RPITIT (return position impl trait in trait) so implementations
/// write ordinary async functions. Code that needs dynamic dispatch wraps
/// implementations in [`super::box_backend::BoxGenerationBackend`].
pub trait GenerationBackend: Send + Sync {
    /// Stable identifier used in logs, e.g. `"gemini"` or `"openrouter"`.
    fn name(&self) -> &str;

    /// Run one generation pass for `request`.
    ///
    /// The request names the model to use; backends serving several
    /// models route on that field. Whether tool calling is offered to
    /// the model follows `request.tools_enabled`.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<GenerationOutcome, LlmError>> + Send;
}
