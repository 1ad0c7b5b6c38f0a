//! Wire types for the job-description match endpoint.

use serde::{Deserialize, Serialize};

/// Request body. The deployed frontend sends `rawJd`; an older variant sent
/// `jd`, so both are accepted.
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(rename = "rawJd", alias = "jd")]
    pub raw_jd: Option<String>,
}

/// Categorical match strength. Deserialization rejects anything outside this
/// set, which is how out-of-vocabulary model output gets caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrength {
    #[serde(rename = "Perfect Match")]
    Perfect,
    #[serde(rename = "Strong Match")]
    Strong,
    #[serde(rename = "High Match")]
    High,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Weak Match")]
    Weak,
}

/// One required skill the resume covers only indirectly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedExperience {
    pub required: String,
    pub related: String,
}

/// The structured analysis produced by the model. Every field is required;
/// a response missing any of them fails the shape guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub position: String,
    pub overall_match: MatchStrength,
    pub summary: String,
    pub direct_matches: Vec<String>,
    pub missing_must_have_skills: Vec<String>,
    pub related_experience: Vec<RelatedExperience>,
    pub transferable_strengths: Vec<String>,
    pub quick_learner_note: String,
    pub why_this_candidate: Vec<String>,
}

/// Model-signalled failure ("Invalid JD", "Not relevant"). Passed through to
/// the caller as-is with 200 and exempt from the full schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFailure {
    pub error: String,
}

/// Validated outcome of a match call. `Failure` is tried first so any object
/// carrying a string `error` field short-circuits the schema check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchOutcome {
    Failure(ModelFailure),
    Result(Box<MatchResult>),
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESULT: &str = r#"{
        "position": "Senior Rust Engineer",
        "overallMatch": "Strong Match",
        "summary": "Close alignment on backend and systems work.",
        "directMatches": ["Rust", "PostgreSQL"],
        "missingMustHaveSkills": ["Kubernetes"],
        "relatedExperience": [{"required": "Kubernetes", "related": "Ran Docker Swarm in production"}],
        "transferableStrengths": ["Distributed systems"],
        "quickLearnerNote": "Picked up Go in two weeks on a prior team.",
        "whyThisCandidate": ["Deep async experience", "Owns services end to end"]
    }"#;

    #[test]
    fn test_full_result_deserializes() {
        let outcome: MatchOutcome = serde_json::from_str(FULL_RESULT).unwrap();
        match outcome {
            MatchOutcome::Result(r) => {
                assert_eq!(r.overall_match, MatchStrength::Strong);
                assert_eq!(r.related_experience[0].required, "Kubernetes");
            }
            MatchOutcome::Failure(_) => panic!("full result parsed as failure"),
        }
    }

    #[test]
    fn test_error_object_is_failure_passthrough() {
        let outcome: MatchOutcome = serde_json::from_str(r#"{"error": "Invalid JD"}"#).unwrap();
        match outcome {
            MatchOutcome::Failure(f) => assert_eq!(f.error, "Invalid JD"),
            MatchOutcome::Result(_) => panic!("error object parsed as result"),
        }
    }

    #[test]
    fn test_failure_serializes_back_unchanged() {
        let outcome: MatchOutcome = serde_json::from_str(r#"{"error": "Not relevant"}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"error":"Not relevant"}"#
        );
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(FULL_RESULT).unwrap();
        value.as_object_mut().unwrap().remove("summary");
        assert!(serde_json::from_value::<MatchOutcome>(value).is_err());
    }

    #[test]
    fn test_unknown_match_strength_is_rejected() {
        let patched = FULL_RESULT.replace("Strong Match", "Mediocre Match");
        assert!(serde_json::from_str::<MatchOutcome>(&patched).is_err());
    }

    #[test]
    fn test_malformed_related_experience_is_rejected() {
        let patched = FULL_RESULT.replace(
            r#"{"required": "Kubernetes", "related": "Ran Docker Swarm in production"}"#,
            r#"{"required": "Kubernetes"}"#,
        );
        assert!(serde_json::from_str::<MatchOutcome>(&patched).is_err());
    }

    #[test]
    fn test_non_string_array_entry_is_rejected() {
        let patched = FULL_RESULT.replace(r#"["Rust", "PostgreSQL"]"#, r#"["Rust", 42]"#);
        assert!(serde_json::from_str::<MatchOutcome>(&patched).is_err());
    }

    #[test]
    fn test_match_strength_round_trips_labels() {
        for label in [
            "Perfect Match",
            "Strong Match",
            "High Match",
            "Good Match",
            "Weak Match",
        ] {
            let json = format!("\"{label}\"");
            let parsed: MatchStrength = serde_json::from_str(&json).unwrap();
            assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
        }
    }
}
