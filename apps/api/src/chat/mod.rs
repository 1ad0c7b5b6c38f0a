// Resume chat endpoint: first-person Q&A over the resume corpus with a
// bounded history window. All LLM calls go through llm_client.

pub mod handlers;
pub mod prompts;
