//! The turn endpoint.
//!
//! POST /api/v1/respond
//!
//! Accepts one visitor turn, runs the full pipeline (normalize, reduce,
//! generate with fallback, extract, guard, notify), and returns the
//! structured result in the response envelope. Degraded turns (timeout,
//! exhausted cascade) still return HTTP 200 with canned text; only
//! invalid input produces an HTTP error.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use tracing::Instrument;

use leadline_observe::genai_attrs;
use leadline_types::agent::{AgentTurnRequest, AgentTurnResult};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/respond — answer one visitor turn.
pub async fn respond(
    State(state): State<AppState>,
    Json(request): Json<AgentTurnRequest>,
) -> Result<ApiResponse<AgentTurnResult>, AppError> {
    let started = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query must not be empty".to_string()));
    }
    if request.profile.name.trim().is_empty() {
        return Err(AppError::Validation(
            "profile.name must not be empty".to_string(),
        ));
    }

    let span = tracing::info_span!(
        "respond",
        request_id = %request_id,
        { genai_attrs::GEN_AI_OPERATION_NAME } = genai_attrs::OP_RESPOND,
        { genai_attrs::GEN_AI_AGENT_NAME } = %request.profile.name,
    );
    let result = state.service.respond(request).instrument(span).await?;

    Ok(ApiResponse::success(
        result,
        request_id,
        started.elapsed().as_millis() as u64,
    )
    .with_link("self", "/api/v1/respond"))
}
