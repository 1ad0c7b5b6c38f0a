pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers::handle_chat;
use crate::errors::AppError;
use crate::matcher::handlers::handle_match;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/match", post(handle_match))
        .route("/api/chat", post(handle_chat))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::gate::RateLimiter;
    use crate::llm_client::LlmClient;

    fn test_state(match_rpm: u32) -> AppState {
        let config = Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            cors_origin: "*".to_string(),
            resume_path: String::new(),
            jd_min_chars: 250,
            jd_max_chars: 3000,
            match_rpm,
            chat_rpm: 20,
        };
        AppState {
            llm: LlmClient::new(config.anthropic_api_key.clone()),
            resume: Arc::new("Test resume corpus".to_string()),
            match_limiter: RateLimiter::new(config.match_rpm, Duration::from_secs(60)),
            chat_limiter: RateLimiter::new(config.chat_rpm, Duration::from_secs(60)),
            config,
        }
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_match_missing_jd_field() {
        let app = build_router(test_state(10));
        let response = app.oneshot(post_json("/api/match", json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Missing jd field"}));
    }

    #[tokio::test]
    async fn test_match_blank_jd_is_missing() {
        let app = build_router(test_state(10));
        let response = app
            .oneshot(post_json("/api/match", json!({"rawJd": "   "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Missing jd field"}));
    }

    #[tokio::test]
    async fn test_match_accepts_jd_alias_and_rejects_short_text() {
        let app = build_router(test_state(10));
        let response = app
            .oneshot(post_json("/api/match", json!({"jd": "too short to be a JD"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Too short"}));
    }

    #[tokio::test]
    async fn test_match_rejects_overlong_text() {
        let app = build_router(test_state(10));
        // Word-separated filler: long unbroken runs would be eaten by the
        // sanitizer's base64 heuristic before the length check.
        let jd = "word ".repeat(700);
        let response = app
            .oneshot(post_json("/api/match", json!({"rawJd": jd})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Too long"}));
    }

    #[tokio::test]
    async fn test_match_malformed_body_is_missing_field() {
        let app = build_router(test_state(10));
        let request = Request::builder()
            .method("POST")
            .uri("/api/match")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Missing jd field"}));
    }

    #[tokio::test]
    async fn test_match_rate_limit_trips_on_third_request() {
        // Limit 2/min; the limiter is checked before validation, so cheap 400
        // responses still consume budget.
        let app = build_router(test_state(2));
        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(post_json("/api/match", json!({})))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
        let response = app.oneshot(post_json("/api/match", json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body_json(response).await, json!({"error": "Too many requests"}));
    }

    #[tokio::test]
    async fn test_rate_limit_keys_on_forwarded_header() {
        let app = build_router(test_state(1));
        let mut first = post_json("/api/match", json!({}));
        first
            .headers_mut()
            .insert("x-forwarded-for", "198.51.100.1".parse().unwrap());
        assert_eq!(
            app.clone().oneshot(first).await.unwrap().status(),
            StatusCode::BAD_REQUEST
        );

        // Different client, fresh budget
        let mut second = post_json("/api/match", json!({}));
        second
            .headers_mut()
            .insert("x-forwarded-for", "198.51.100.2".parse().unwrap());
        assert_eq!(
            app.oneshot(second).await.unwrap().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_chat_missing_message() {
        let app = build_router(test_state(10));
        let response = app
            .oneshot(post_json("/api/chat", json!({"history": []})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Missing message"}));
    }

    #[tokio::test]
    async fn test_chat_and_match_limiters_are_independent() {
        let app = build_router(test_state(1));
        // Exhaust the match budget
        app.clone()
            .oneshot(post_json("/api/match", json!({})))
            .await
            .unwrap();
        let response = app
            .clone()
            .oneshot(post_json("/api/match", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        // Chat still has its own budget for the same client key
        let response = app.oneshot(post_json("/api/chat", json!({}))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state(10));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = build_router(test_state(10));
        let request = Request::builder()
            .uri("/api/nope")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({"error": "Not found"}));
    }
}
