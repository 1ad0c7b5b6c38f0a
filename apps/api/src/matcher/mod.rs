// JD match endpoint: sanitized job-description analysis against the resume
// corpus. All LLM calls go through llm_client — no direct API calls here.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod validation;
