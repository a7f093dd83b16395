use std::sync::Arc;

use crate::chatbot::service::ChatbotService;
use crate::config::Config;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. `LlmClient` in production, a scripted fake in tests.
    pub llm: Arc<dyn ChatModel>,
    /// Owns the in-memory chat sessions for the lifetime of the process.
    pub chatbot: Arc<ChatbotService>,
    pub config: Config,
}
