use std::sync::Arc;

use crate::config::Config;
use crate::gate::RateLimiter;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Resume/recommendation corpus, loaded once at startup and injected
    /// verbatim into system prompts. Opaque to the gate.
    pub resume: Arc<String>,
    /// Independent limiters — the endpoints must not share key-space or
    /// counters.
    pub match_limiter: RateLimiter,
    pub chat_limiter: RateLimiter,
}
