//! Axum route handler for the resume chat endpoint.

use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chat::prompts::build_chat_system_prompt;
use crate::errors::AppError;
use crate::gate::{client_key, screen, ScreenedInput, REFUSAL_TEXT};
use crate::llm_client::Message;
use crate::state::AppState;

const CHAT_MAX_TOKENS: u32 = 1024;
/// Only the trailing entries of the caller-owned history are forwarded.
const HISTORY_WINDOW: usize = 6;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub history: Option<Vec<ChatHistoryItem>>,
}

/// One prior turn as the caller stores it. Role is kept as a plain string so
/// unexpected roles are dropped silently instead of failing the request.
#[derive(Debug, Deserialize)]
pub struct ChatHistoryItem {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Serialize)]
pub struct TokenUsage {
    pub input: u32,
    pub output: u32,
}

/// POST /api/chat
///
/// Same gate as the match endpoint minus the length bounds: rate limit →
/// field validation → injection screen + sanitize → model call. History is
/// reduced to the trailing window of well-formed user/assistant turns.
pub async fn handle_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let key = client_key(&headers, peer.map(|ConnectInfo(addr)| addr));
    if !state.chat_limiter.check(&key) {
        return Err(AppError::RateLimited);
    }

    let (raw_message, history) = match payload {
        Ok(Json(req)) => (
            req.message.unwrap_or_default(),
            req.history.unwrap_or_default(),
        ),
        Err(_) => (String::new(), Vec::new()),
    };
    if raw_message.trim().is_empty() {
        return Err(AppError::Validation("Missing message".to_string()));
    }

    let message = match screen(&raw_message) {
        ScreenedInput::Refused => {
            info!("chat message refused by injection filter");
            REFUSAL_TEXT.to_string()
        }
        ScreenedInput::Sanitized(text) => {
            // A message that sanitizes to nothing has nothing to ask.
            if text.is_empty() {
                return Err(AppError::Validation("Missing message".to_string()));
            }
            text
        }
    };

    let safe_history = trailing_turns(&history);
    let mut messages: Vec<Message<'_>> = safe_history
        .iter()
        .map(|turn| Message {
            role: &turn.role,
            content: &turn.content,
        })
        .collect();
    messages.push(Message::user(&message));

    let system = build_chat_system_prompt(&state.resume);
    let response = state
        .llm
        .complete(&system, &messages, CHAT_MAX_TOKENS)
        .await?;

    Ok(Json(ChatResponse {
        message: response.text().unwrap_or_default().to_string(),
        usage: TokenUsage {
            input: response.usage.input_tokens,
            output: response.usage.output_tokens,
        },
    }))
}

/// Keeps only well-formed user/assistant turns, then the trailing window.
fn trailing_turns(history: &[ChatHistoryItem]) -> Vec<&ChatHistoryItem> {
    let filtered: Vec<&ChatHistoryItem> = history
        .iter()
        .filter(|turn| {
            (turn.role == "user" || turn.role == "assistant") && !turn.content.trim().is_empty()
        })
        .collect();
    let start = filtered.len().saturating_sub(HISTORY_WINDOW);
    filtered[start..].to_vec()
}
