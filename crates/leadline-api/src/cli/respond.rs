//! One-shot turn runner.
//!
//! `ldln respond --file turn.json` reads an [`AgentTurnRequest`], runs
//! the full pipeline once against the real backends, and prints the
//! result JSON. Useful for smoke-testing a deployment without the HTTP
//! layer.

use std::path::Path;

use leadline_types::agent::AgentTurnRequest;
use leadline_types::config::LeadlineConfig;

use crate::state::AppState;

pub async fn run(config: &LeadlineConfig, file: &Path) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(file).await?;
    let request: AgentTurnRequest = serde_json::from_str(&raw)?;

    let state = AppState::init(config)?;
    let result = state.service.respond(request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    state.cancel.cancel();
    Ok(())
}
