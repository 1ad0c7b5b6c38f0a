// Inbound request gate for the LLM-backed endpoints.
// Screening order: injection detection on the raw text first, then the
// structural strips. A detected injection discards the whole input.

pub mod injection;
pub mod rate_limit;
pub mod sanitize;

pub use injection::REFUSAL_TEXT;
pub use rate_limit::{client_key, RateLimiter};

/// Outcome of screening one free-text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenedInput {
    /// Input passed the injection filter; carries the sanitized text.
    Sanitized(String),
    /// Injection signature matched — the caller forwards [`REFUSAL_TEXT`]
    /// instead of anything derived from the input.
    Refused,
}

/// Screens raw free-text input: binary injection check on the untouched text,
/// then the sanitizer pipeline.
pub fn screen(raw: &str) -> ScreenedInput {
    if injection::detect(raw) {
        return ScreenedInput::Refused;
    }
    ScreenedInput::Sanitized(sanitize::sanitize_text(raw))
}
