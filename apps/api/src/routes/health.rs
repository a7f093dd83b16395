use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::error;

use crate::llm_client::{CompletionParams, LlmError};
use crate::state::AppState;

const PING_PARAMS: CompletionParams = CompletionParams::new(10, 0.0);

/// GET /
/// Returns a simple status object with service version.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Resume Craft API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy",
        "timestamp": Utc::now(),
    }))
}

/// GET /health
/// Pings the model with a tiny prompt and reports whether it answered.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let llm_status = match state.llm.complete("Hello", PING_PARAMS).await {
        // A reply with no text still proves the endpoint and key work.
        Ok(_) | Err(LlmError::EmptyContent) => "connected",
        Err(e) => {
            error!("LLM connection failed: {e}");
            "disconnected"
        }
    };

    Json(json!({
        "api_status": "healthy",
        "llm_status": llm_status,
        "llm_model": state.config.llm_model,
        "timestamp": Utc::now(),
    }))
}
