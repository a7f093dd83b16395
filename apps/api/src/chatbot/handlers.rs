//! Axum route handlers for the chatbot API.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::chatbot::language::{CannedReply, Language, ENGLISH};
use crate::chatbot::prompts::QUICK_ACTIONS;
use crate::chatbot::service::{ChatContext, ChatReply};
use crate::errors::AppError;
use crate::state::AppState;

const DEFAULT_SESSION: &str = "default";

fn default_session() -> String {
    DEFAULT_SESSION.to_string()
}

// `null` is accepted for every field.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub context: Option<ChatContext>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

impl SessionRequest {
    fn session_id(self) -> String {
        self.session_id.unwrap_or_else(default_session)
    }
}

#[derive(Debug, Serialize)]
pub struct ClearSessionResponse {
    pub cleared: bool,
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct WelcomeQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub language: Language,
    pub message: &'static str,
}

/// POST /api/chatbot
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let message = request.message.unwrap_or_default();
    if message.trim().is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    let context = request.context.unwrap_or_default();
    let session_id = request.session_id.unwrap_or_else(default_session);
    let reply = state
        .chatbot
        .process_message(&message, &context, &session_id)
        .await;
    Ok(Json(reply))
}

/// POST /api/chatbot/session/summary
pub async fn handle_session_summary(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Json<Value> {
    let body = match state.chatbot.session_summary(&request.session_id()) {
        Some(summary) => json!(summary),
        None => json!({ "message": "No conversation history found" }),
    };
    Json(body)
}

/// POST /api/chatbot/session/clear
pub async fn handle_clear_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Json<ClearSessionResponse> {
    let session_id = request.session_id();
    let cleared = state.chatbot.clear_session(&session_id);
    Json(ClearSessionResponse {
        cleared,
        session_id,
    })
}

/// GET /api/chatbot/quick-actions
pub async fn handle_quick_actions() -> Json<BTreeMap<&'static str, &'static [&'static str]>> {
    Json(QUICK_ACTIONS.iter().copied().collect())
}

/// GET /api/chatbot/welcome?lang=ur
pub async fn handle_welcome(Query(query): Query<WelcomeQuery>) -> Json<WelcomeResponse> {
    let language = query
        .lang
        .as_deref()
        .and_then(Language::from_code)
        .unwrap_or(ENGLISH);
    Json(WelcomeResponse {
        language,
        message: CannedReply::Welcome.text(language),
    })
}
