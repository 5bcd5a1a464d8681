//! Application state wiring the turn service together.
//!
//! AppState holds the concrete service instance used by both the CLI and
//! the REST API. The service is generic over the lead sink, but AppState
//! pins it to the HTTP webhook implementation.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use leadline_core::agent::service::AgentService;
use leadline_infra::config::Credentials;
use leadline_infra::llm::build_backends;
use leadline_infra::webhook::HttpLeadSink;
use leadline_types::config::LeadlineConfig;

/// Concrete type alias for the service generic pinned to the infra sink.
pub type ConcreteAgentService = AgentService<HttpLeadSink>;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConcreteAgentService>,
    /// Parent token for tool retrievals; cancelled on shutdown.
    pub cancel: CancellationToken,
}

impl AppState {
    /// Initialize the application state: resolve API keys, wire backends
    /// and the turn service.
    pub fn init(config: &LeadlineConfig) -> anyhow::Result<Self> {
        let credentials = Credentials::from_env()?;
        let cancel = CancellationToken::new();

        let (primary, fallback) = build_backends(credentials, config, cancel.child_token());
        let service = AgentService::new(config, primary, fallback, HttpLeadSink::new());

        Ok(Self {
            service: Arc::new(service),
            cancel,
        })
    }
}
