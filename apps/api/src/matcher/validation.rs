//! Request-side length bounds and the response-shape guard for the match
//! endpoint.
//!
//! The model is instructed to emit a bare JSON object but may wrap it in
//! prose or fences. Extraction and validation failures are fatal for the
//! request — nothing partially valid is ever returned.

use crate::errors::AppError;
use crate::llm_client::extract_json_object;
use crate::matcher::models::MatchOutcome;

/// Enforces the configured bounds on sanitized JD length, in characters.
/// Admits iff `min <= len <= max`.
pub fn enforce_jd_bounds(text: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = text.chars().count();
    if len < min {
        return Err(AppError::Validation("Too short".to_string()));
    }
    if len > max {
        return Err(AppError::Validation("Too long".to_string()));
    }
    Ok(())
}

/// Extracts, parses, and structurally validates the model's reply.
pub fn parse_match_outcome(text: &str) -> Result<MatchOutcome, AppError> {
    let json = extract_json_object(text)
        .ok_or_else(|| AppError::ModelOutput("no JSON object in completion".to_string()))?;

    serde_json::from_str(json)
        .map_err(|e| AppError::ModelOutput(format!("completion failed schema validation: {e}")))
}
