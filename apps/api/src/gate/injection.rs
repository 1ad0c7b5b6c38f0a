//! Injection Filter — pattern screen for instruction-override attempts in
//! free-text input.
//!
//! The signature list is a floor, not a guarantee: it catches the common
//! copy-paste override phrasings, fake conversation turns, and known jailbreak
//! tokens. It is not a classifier and makes no stronger claim.

use std::sync::LazyLock;

use regex::Regex;

/// Substituted for the whole input when any signature matches. The raw text is
/// never forwarded to the model after a match.
pub const REFUSAL_TEXT: &str = "Input contains disallowed content.";

/// Signatures checked in order; the first match short-circuits.
/// `\bDAN\b` is intentionally case-sensitive — "dan" is a name.
static INJECTION_SIGNATURES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)ignore\s+(?:all\s+)?(?:previous|prior|above|system)\s+instructions",
        r"(?i)forget\s+(?:all|everything|previous|prior|your)",
        r"(?i)you\s+are\s+now\s+(?:a|an|the)",
        r"(?i)new\s+(?:role|persona|instructions|task|prompt)",
        r"(?i)act\s+as\s+(?:a|an|if)",
        r"(?i)pretend\s+(?:to\s+be|you\s+are)",
        r"(?i)override\s+(?:previous|prior|all|system)",
        r"(?i)disregard\s+(?:previous|prior|all|the)",
        r"(?i)\bsystem\s*:",
        r"(?i)\bassistant\s*:",
        r"(?i)\bhuman\s*:",
        r"(?i)\buser\s*:",
        r"(?i)<\|im_(?:start|end|sep)\|>",
        r"(?i)\[INST\]",
        r"\bDAN\b",
        r"(?i)jailbreak",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid injection signature"))
    .collect()
});

/// Returns `true` if the raw text matches any known injection signature.
/// Pure predicate — no redaction, no mutation. Match is binary on the whole
/// input; the caller substitutes [`REFUSAL_TEXT`] on `true`.
pub fn detect(raw: &str) -> bool {
    INJECTION_SIGNATURES.iter().any(|sig| sig.is_match(raw))
}
