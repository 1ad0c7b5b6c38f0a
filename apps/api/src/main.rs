mod chat;
mod config;
mod errors;
mod gate;
mod llm_client;
mod matcher;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gate::RateLimiter;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
const LIMITER_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Tracing targets use the crate name with underscores
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting folio API v{}", env!("CARGO_PKG_VERSION"));

    // Load the resume corpus injected into system prompts
    let resume = std::fs::read_to_string(&config.resume_path)
        .with_context(|| format!("Failed to read resume corpus at '{}'", config.resume_path))?;
    info!("Resume corpus loaded ({} bytes)", resume.len());

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Independent per-endpoint limiters; the match endpoint is the costly one
    let match_limiter = RateLimiter::new(config.match_rpm, RATE_LIMIT_WINDOW);
    let chat_limiter = RateLimiter::new(config.chat_rpm, RATE_LIMIT_WINDOW);
    spawn_limiter_sweep(match_limiter.clone(), chat_limiter.clone());

    let cors = build_cors_layer(&config)?;

    // Build app state
    let state = AppState {
        llm,
        resume: Arc::new(resume),
        match_limiter,
        chat_limiter,
        config: config.clone(),
    };

    // Build router; hardening headers go on every response, error or not
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=63072000; includeSubDomains"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'"),
        ));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Builds the CORS layer: wildcard by default, a single fixed origin when
/// `CORS_ORIGIN` is set. Preflight OPTIONS is answered by this layer.
fn build_cors_layer(config: &Config) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.cors_origin == "*" {
        Ok(layer.allow_origin(Any))
    } else {
        let origin = config
            .cors_origin
            .parse::<HeaderValue>()
            .with_context(|| format!("Invalid CORS_ORIGIN '{}'", config.cors_origin))?;
        Ok(layer.allow_origin(origin))
    }
}

/// Periodically drops expired rate-limit windows so the per-key maps stay
/// bounded under many distinct client IPs.
fn spawn_limiter_sweep(match_limiter: RateLimiter, chat_limiter: RateLimiter) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(LIMITER_SWEEP_INTERVAL);
        ticker.tick().await; // first tick fires immediately; skip it
        loop {
            ticker.tick().await;
            match_limiter.cleanup();
            chat_limiter.cleanup();
        }
    });
}
