//! Ordered model fallback for degraded turns.
//!
//! When the primary backend fails, the orchestrator sweeps a configured
//! list of model ids on the fallback backend. First success wins, every
//! failure is logged and skipped, and there is deliberately no retry or
//! backoff inside the sweep: a visitor is waiting on the other end, so
//! the only currency spent is one attempt per candidate.

use leadline_types::llm::{GenerationOutcome, GenerationRequest, LlmError};

use crate::llm::box_backend::BoxGenerationBackend;

/// Ordered first-success sweep over fallback model candidates.
#[derive(Debug, Clone)]
pub struct FallbackCascade {
    candidates: Vec<String>,
}

impl FallbackCascade {
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Run `request` against each candidate model in order until one
    /// succeeds.
    ///
    /// The request's `model` field is replaced per attempt; everything
    /// else is passed through unchanged. When every candidate fails the
    /// last error is propagated as the terminal error.
    pub async fn run(
        &self,
        backend: &BoxGenerationBackend,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for model in &self.candidates {
            let attempt = GenerationRequest {
                model: model.clone(),
                ..request.clone()
            };
            match backend.generate(&attempt).await {
                Ok(outcome) => {
                    tracing::info!(model = %model, "Fallback generation succeeded");
                    return Ok(outcome);
                }
                Err(error) => {
                    tracing::warn!(
                        model = %model,
                        error = %error,
                        "Fallback candidate failed, trying next"
                    );
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::Provider {
            message: "fallback cascade has no candidates configured".to_string(),
        }))
    }
}
