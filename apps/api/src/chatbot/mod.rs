// Smart chatbot: keyword triage (guardrails, web search, resume advice,
// general chat), language detection, web scraping and session memory.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod language;
pub mod memory;
pub mod prompts;
pub mod rules;
pub mod search;
pub mod service;
pub mod suggestions;
