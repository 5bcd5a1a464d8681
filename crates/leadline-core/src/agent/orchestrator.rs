//! Primary/fallback generation state machine.
//!
//! One turn takes at most one primary attempt and one sweep of the
//! fallback cascade. The primary attempt runs as a spawned task raced
//! against a deadline: on timeout the task is abandoned, not cancelled,
//! so a transport-level hang cannot wedge the turn, and the visitor gets
//! a fixed apologetic reply instead of a spinner. Everything that leaves
//! here is a usable outcome except true exhaustion, which the service
//! layer converts into its own canned reply, and a crashed primary
//! task, which surfaces as an internal error.

use std::sync::Arc;
use std::time::Duration;

use leadline_types::llm::{GenerationOutcome, GenerationRequest, LlmError};

use crate::lead::guard::truncate_on_word;
use crate::llm::box_backend::BoxGenerationBackend;
use crate::llm::cascade::FallbackCascade;

/// Reply used when the primary attempt exceeds its deadline.
pub const TIMEOUT_RESPONSE: &str =
    "I'm sorry, that took longer than expected. Could you try asking again in a moment?";

/// Reply used when the model rejects the content itself (bad image, unsupported type).
pub const UNSUPPORTED_CONTENT_RESPONSE: &str =
    "I'm sorry, I can't process that kind of content. Could you describe it in text instead?";

/// Reply used by the service layer when every backend attempt failed.
pub const TECHNICAL_ISSUE_RESPONSE: &str =
    "I'm having a technical issue on my end right now. Please try again shortly.";

/// Maximum characters of the visitor query echoed into a derived summary.
const DERIVED_SUMMARY_QUERY_CAP: usize = 80;

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// Primary failed and every fallback candidate failed after it.
    #[error("all generation attempts exhausted: {source}")]
    Exhausted {
        #[source]
        source: LlmError,
    },

    /// The spawned primary task panicked or was aborted.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Drives one generation turn through primary, timeout, and fallback states.
pub struct GenerationOrchestrator {
    primary: Arc<BoxGenerationBackend>,
    fallback: BoxGenerationBackend,
    cascade: FallbackCascade,
    primary_timeout: Duration,
}

impl GenerationOrchestrator {
    pub fn new(
        primary: BoxGenerationBackend,
        fallback: BoxGenerationBackend,
        cascade: FallbackCascade,
        primary_timeout: Duration,
    ) -> Self {
        Self {
            primary: Arc::new(primary),
            fallback,
            cascade,
            primary_timeout,
        }
    }

    /// Run one turn.
    ///
    /// `primary_request` is the tool-enabled structured attempt;
    /// `fallback_request` carries the flat degraded prompt and is only
    /// touched when the primary fails with a retryable error. A timeout
    /// and an unsupported-content rejection both short-circuit to fixed
    /// replies without entering the cascade: more model calls cannot fix
    /// either of those.
    #[tracing::instrument(
        name = "generation.run",
        skip_all,
        fields(primary_model = %primary_request.model)
    )]
    pub async fn run(
        &self,
        primary_request: GenerationRequest,
        fallback_request: GenerationRequest,
    ) -> Result<GenerationOutcome, OrchestratorError> {
        let backend = Arc::clone(&self.primary);
        let handle = tokio::spawn(async move { backend.generate(&primary_request).await });

        match tokio::time::timeout(self.primary_timeout, handle).await {
            Err(_elapsed) => {
                // The spawned attempt keeps running detached; whatever it
                // eventually produces is discarded.
                tracing::warn!(
                    timeout_secs = self.primary_timeout.as_secs(),
                    "Primary generation timed out, abandoning the attempt"
                );
                Ok(GenerationOutcome::text_only(TIMEOUT_RESPONSE))
            }
            Ok(Err(join_error)) => {
                // A panicked or aborted task is a bug in this process,
                // not a provider failure; the cascade cannot help.
                tracing::error!(error = %join_error, "Primary generation task aborted");
                Err(OrchestratorError::Internal(format!(
                    "primary generation task aborted: {join_error}"
                )))
            }
            Ok(Ok(Ok(outcome))) => Ok(outcome),
            Ok(Ok(Err(LlmError::UnsupportedContent(detail)))) => {
                tracing::warn!(detail = %detail, "Primary rejected the content as unsupported");
                Ok(GenerationOutcome::text_only(UNSUPPORTED_CONTENT_RESPONSE))
            }
            Ok(Ok(Err(error))) => {
                tracing::warn!(
                    error = %error,
                    "Primary generation failed, degrading to the fallback cascade"
                );
                self.degrade(fallback_request).await
            }
        }
    }

    async fn degrade(
        &self,
        mut request: GenerationRequest,
    ) -> Result<GenerationOutcome, OrchestratorError> {
        request.tools_enabled = false;
        let query = request.query.clone();
        match self.cascade.run(&self.fallback, &request).await {
            Ok(mut outcome) => {
                // Fallback attempts are text-only; give downstream
                // consumers at least a derived summary to work with.
                if outcome.conversation_summary.is_none() {
                    outcome.conversation_summary = Some(format!(
                        "Visitor asked about: {}",
                        truncate_on_word(&query, DERIVED_SUMMARY_QUERY_CAP)
                    ));
                }
                Ok(outcome)
            }
            Err(source) => Err(OrchestratorError::Exhausted { source }),
        }
    }
}
