//! Axum route handler for the JD match endpoint.

use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::gate::{client_key, screen, ScreenedInput, REFUSAL_TEXT};
use crate::llm_client::{LlmError, Message};
use crate::matcher::models::{MatchOutcome, MatchRequest};
use crate::matcher::prompts::{build_match_system_prompt, MATCH_USER_TURN};
use crate::matcher::validation::{enforce_jd_bounds, parse_match_outcome};
use crate::state::AppState;

const MATCH_MAX_TOKENS: u32 = 4096;

/// POST /api/match
///
/// Pipeline: rate limit → field validation → injection screen + sanitize →
/// length bounds → model call → response-shape guard. Rejection at any stage
/// is terminal; nothing is retried.
pub async fn handle_match(
    State(state): State<AppState>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchOutcome>, AppError> {
    let key = client_key(&headers, peer.map(|ConnectInfo(addr)| addr));
    if !state.match_limiter.check(&key) {
        return Err(AppError::RateLimited);
    }

    let raw_jd = payload
        .ok()
        .and_then(|Json(req)| req.raw_jd)
        .unwrap_or_default();
    if raw_jd.trim().is_empty() {
        return Err(AppError::Validation("Missing jd field".to_string()));
    }

    let jd = match screen(&raw_jd) {
        // Refused input is still forwarded — as the fixed refusal text, which
        // skips the length bounds so the model can answer it harmlessly.
        ScreenedInput::Refused => {
            info!("match request refused by injection filter");
            REFUSAL_TEXT.to_string()
        }
        ScreenedInput::Sanitized(text) => {
            enforce_jd_bounds(&text, state.config.jd_min_chars, state.config.jd_max_chars)?;
            text
        }
    };

    let system = build_match_system_prompt(&state.resume, &jd);
    let response = state
        .llm
        .complete(&system, &[Message::user(MATCH_USER_TURN)], MATCH_MAX_TOKENS)
        .await?;

    let text = response.text().ok_or(LlmError::EmptyContent)?;
    let outcome = parse_match_outcome(text)?;

    Ok(Json(outcome))
}
