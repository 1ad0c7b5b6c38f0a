use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Allowed CORS origin; `*` means any.
    pub cors_origin: String,
    /// Path to the resume/recommendation corpus injected into system prompts.
    pub resume_path: String,
    /// Bounds on the sanitized job-description length, in characters.
    pub jd_min_chars: usize,
    pub jd_max_chars: usize,
    /// Per-client requests per minute for each endpoint. The match endpoint
    /// is the expensive one and gets the small budget.
    pub match_rpm: u32,
    pub chat_rpm: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cors_origin: std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string()),
            resume_path: std::env::var("RESUME_PATH")
                .unwrap_or_else(|_| "apps/api/data/resume.txt".to_string()),
            jd_min_chars: parse_env("JD_MIN_CHARS", 250)?,
            jd_max_chars: parse_env("JD_MAX_CHARS", 5000)?,
            match_rpm: parse_env("MATCH_RATE_LIMIT_RPM", 2)?,
            chat_rpm: parse_env("CHAT_RATE_LIMIT_RPM", 20)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' is not a valid value")),
        Err(_) => Ok(default),
    }
}
