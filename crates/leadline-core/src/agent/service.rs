//! The turn service: everything between an inbound request and its reply.
//!
//! `AgentService` owns the full pipeline. Normalization, contact
//! tracking, and window reduction happen before generation; the
//! orchestrator produces an outcome; the extractor and guard then mutate
//! the result in place, in that order, before the notifier decides
//! whether the turn produced a deliverable lead. The service is generic
//! over the lead sink so tests can capture deliveries in memory.

use std::time::Duration;

use leadline_types::agent::{AgentTurnRequest, AgentTurnResult};
use leadline_types::config::LeadlineConfig;
use leadline_types::llm::{GenerationConfig, GenerationRequest};

use crate::agent::orchestrator::{
    GenerationOrchestrator, OrchestratorError, TECHNICAL_ISSUE_RESPONSE,
};
use crate::agent::prompt::PromptBuilder;
use crate::context::contact::ContactStatusTracker;
use crate::context::normalize::MessageNormalizer;
use crate::context::window::ContextWindowManager;
use crate::lead::extract::LeadExtractor;
use crate::lead::guard::ResponseGuard;
use crate::lead::notify::{LeadNotifier, LeadSink};
use crate::llm::box_backend::BoxGenerationBackend;
use crate::llm::cascade::FallbackCascade;

pub struct AgentService<S> {
    orchestrator: GenerationOrchestrator,
    window: ContextWindowManager,
    notifier: LeadNotifier<S>,
    primary_model: String,
    sampling: GenerationConfig,
    default_webhook_url: Option<String>,
}

impl<S: LeadSink + 'static> AgentService<S> {
    pub fn new(
        config: &LeadlineConfig,
        primary: BoxGenerationBackend,
        fallback: BoxGenerationBackend,
        sink: S,
    ) -> Self {
        Self {
            orchestrator: GenerationOrchestrator::new(
                primary,
                fallback,
                FallbackCascade::new(config.fallback.candidates.clone()),
                Duration::from_secs(config.generation.primary_timeout_secs),
            ),
            window: ContextWindowManager::from_config(&config.context),
            notifier: LeadNotifier::new(sink),
            primary_model: config.generation.primary_model.clone(),
            sampling: config.generation.sampling,
            default_webhook_url: config.webhook.default_url.clone(),
        }
    }

    /// Produce the reply for one visitor turn.
    ///
    /// Always resolves to a usable result when generation got anywhere
    /// at all; even full exhaustion maps to a canned reply rather than
    /// an error, because the widget has nothing sensible to do with a
    /// failed turn except apologize anyway.
    #[tracing::instrument(
        name = "agent.respond",
        skip_all,
        fields(history_len = request.history.len(), has_image = request.image.is_some())
    )]
    pub async fn respond(
        &self,
        request: AgentTurnRequest,
    ) -> Result<AgentTurnResult, OrchestratorError> {
        let normalized = MessageNormalizer::normalize(&request.history);
        let contact = ContactStatusTracker::status(&normalized);
        let window = self.window.reduce(&normalized);

        let fallback_prompt = PromptBuilder::build_fallback(
            &request.profile,
            &request.knowledge,
            &window,
            &contact,
            &request.query,
        );
        let primary_request = GenerationRequest {
            model: self.primary_model.clone(),
            system_prompt: PromptBuilder::build_primary(
                &request.profile,
                &request.knowledge,
                &contact,
            ),
            messages: window,
            query: request.query.clone(),
            image: request.image.clone(),
            config: self.sampling,
            tools_enabled: true,
        };
        // The model id is filled in per cascade attempt.
        let fallback_request = GenerationRequest {
            model: String::new(),
            system_prompt: fallback_prompt,
            messages: Vec::new(),
            query: request.query.clone(),
            image: request.image.clone(),
            config: self.sampling,
            tools_enabled: false,
        };

        let mut result: AgentTurnResult = match self
            .orchestrator
            .run(primary_request, fallback_request)
            .await
        {
            Ok(outcome) => outcome.into(),
            Err(OrchestratorError::Exhausted { source }) => {
                tracing::error!(error = %source, "Every generation attempt failed for this turn");
                AgentTurnResult::text_only(TECHNICAL_ISSUE_RESPONSE)
            }
            Err(other) => return Err(other),
        };

        LeadExtractor::apply(&mut result, &request.query);
        ResponseGuard::ensure(&mut result, &request.query);

        let webhook_url = request
            .webhook_url
            .clone()
            .or_else(|| self.default_webhook_url.clone());
        if let Some(url) = webhook_url {
            if LeadNotifier::<S>::should_dispatch(&result) {
                let payload = LeadNotifier::<S>::build_payload(
                    &result,
                    &normalized,
                    &request.profile,
                    request.source_website.as_deref(),
                );
                self.notifier.dispatch_detached(url, payload);
            }
        }

        Ok(result)
    }
}
