// Resume API: structured extraction from uploads, summary generation,
// job optimization, skill suggestions and the template catalog.
// All LLM calls go through llm_client.

pub mod assistant;
pub mod document;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod prompts;
pub mod templates;
