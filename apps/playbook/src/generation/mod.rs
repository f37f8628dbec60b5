// Playbook generation: prompt building, the orchestration pipeline and the JSON API.
// All completion calls go through llm_client::CompletionBackend.

pub mod builder;
pub mod guidance;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
