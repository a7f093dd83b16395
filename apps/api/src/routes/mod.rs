pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::chatbot::handlers as chatbot;
use crate::errors::AppError;
use crate::resume::handlers as resume;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/resume/summary", post(resume::handle_summary))
        .route("/api/resume/extract", post(resume::handle_extract))
        .route("/api/resume/optimize", post(resume::handle_optimize))
        .route("/api/resume/edit", post(resume::handle_edit))
        .route(
            "/api/resume/skills/suggest",
            post(resume::handle_suggest_skills),
        )
        .route("/api/templates", get(resume::handle_templates))
        // Chatbot API
        .route("/api/chatbot", post(chatbot::handle_chat))
        .route(
            "/api/chatbot/session/summary",
            post(chatbot::handle_session_summary),
        )
        .route(
            "/api/chatbot/session/clear",
            post(chatbot::handle_clear_session),
        )
        .route(
            "/api/chatbot/quick-actions",
            get(chatbot::handle_quick_actions),
        )
        .route("/api/chatbot/welcome", get(chatbot::handle_welcome))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::chatbot::search::{SearchHit, SearchProvider};
    use crate::chatbot::service::ChatbotService;
    use crate::config::{ChatbotSettings, Config};
    use crate::llm_client::testing::ScriptedModel;

    struct NoSearch;

    #[async_trait]
    impl SearchProvider for NoSearch {
        fn name(&self) -> &'static str {
            "none"
        }

        async fn search(&self, _query: &str, _max: usize) -> anyhow::Result<Vec<SearchHit>> {
            Ok(Vec::new())
        }
    }

    fn test_config() -> Config {
        Config {
            gemini_api_key: "test-key".into(),
            llm_base_url: "http://localhost:9".into(),
            llm_model: "test-model".into(),
            host: "127.0.0.1".into(),
            port: 0,
            rust_log: "debug".into(),
            cors_allowed_origins: vec![],
            max_upload_bytes: 1024 * 1024,
            chatbot: ChatbotSettings::default(),
        }
    }

    fn app(model: Arc<ScriptedModel>) -> Router {
        let config = test_config();
        let chatbot = ChatbotService::new(model.clone(), Arc::new(NoSearch), &config.chatbot);
        build_router(AppState {
            llm: model,
            chatbot: Arc::new(chatbot),
            config,
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart(filename: &str, content: &[u8]) -> Request<Body> {
        multipart_field("file", filename, content)
    }

    fn multipart_field(field: &str, filename: &str, content: &[u8]) -> Request<Body> {
        let boundary = "craftboundary";
        let mut body = Vec::new();
        write!(
            body,
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .unwrap();
        body.extend_from_slice(content);
        write!(body, "\r\n--{boundary}--\r\n").unwrap();

        Request::post("/api/resume/extract")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_reports_healthy() {
        let response = app(Arc::new(ScriptedModel::new("")))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_health_reports_llm_status() {
        let response = app(Arc::new(ScriptedModel::new("Hi")))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["llm_status"], "connected");
        assert_eq!(body["llm_model"], "test-model");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app(Arc::new(ScriptedModel::new("")))
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_summary_validates_input() {
        let response = app(Arc::new(ScriptedModel::new("summary")))
            .oneshot(post_json(
                "/api/resume/summary",
                json!({ "education": [" "], "skills": ["Rust"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_summary_returns_model_text() {
        let response = app(Arc::new(ScriptedModel::new(" A focused Rust engineer. ")))
            .oneshot(post_json(
                "/api/resume/summary",
                json!({ "education": ["BSc"], "skills": ["Rust"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["summary"], "A focused Rust engineer.");
    }

    #[tokio::test]
    async fn test_edit_normalizes_payload() {
        let response = app(Arc::new(ScriptedModel::new("")))
            .oneshot(post_json(
                "/api/resume/edit",
                json!({ "name": "Jane", "skills": "Rust, Go", "email": null }),
            ))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["skills"], json!(["Rust", "Go"]));
        assert_eq!(body["email"], "");
        assert_eq!(body["languages"], json!([]));
    }

    #[tokio::test]
    async fn test_templates_catalog() {
        let response = app(Arc::new(ScriptedModel::new("")))
            .oneshot(Request::get("/api/templates").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["templates"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["templates"][0]["id"], "modern");
    }

    #[tokio::test]
    async fn test_extract_rejects_unsupported_format() {
        let response = app(Arc::new(ScriptedModel::new("{}")))
            .oneshot(multipart("resume.txt", b"plain text"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body["error"]["message"],
            "Unsupported file format. Only PDF and DOCX files are supported."
        );
    }

    #[tokio::test]
    async fn test_extract_without_file_field() {
        let model = Arc::new(ScriptedModel::new("{}"));
        let response = app(model.clone())
            .oneshot(multipart_field("attachment", "resume.pdf", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["message"], "No file provided");
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_extract_with_empty_filename() {
        let response = app(Arc::new(ScriptedModel::new("{}")))
            .oneshot(multipart("", b"content"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["message"], "No file provided");
    }

    #[tokio::test]
    async fn test_extract_docx_end_to_end() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
            <w:p><w:r><w:t>Skills: Rust, Go</w:t></w:r></w:p>
        </w:body></w:document>"#;
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        let docx = writer.finish().unwrap().into_inner();

        let model = Arc::new(ScriptedModel::new(
            r#"{"name": "Jane Doe", "skills": ["Rust", "Go"]}"#,
        ));
        let response = app(model.clone())
            .oneshot(multipart("Resume.DOCX", &docx))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["name"], "Jane Doe");
        assert_eq!(body["skills"], json!(["Rust", "Go"]));
        assert!(model.last_prompt().unwrap().contains("Skills: Rust, Go"));
    }

    #[tokio::test]
    async fn test_optimize_returns_suggestions() {
        let model = Arc::new(ScriptedModel::new(
            &json!({
                "optimized_summary": "Backend engineer shipping Rust services",
                "suggested_skills": ["Tokio"],
                "keyword_matches": ["Rust"],
                "improvement_suggestions": ["Quantify latency wins"]
            })
            .to_string(),
        ));
        let response = app(model.clone())
            .oneshot(post_json(
                "/api/resume/optimize",
                json!({
                    "job_description": "Senior Rust engineer",
                    "resume_data": { "name": "Jane", "skills": "Rust, SQL" }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["suggested_skills"], json!(["Tokio"]));
        assert_eq!(body["keyword_matches"], json!(["Rust"]));
        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains("Senior Rust engineer"));
        assert!(prompt.contains("Rust, SQL"));
    }

    #[tokio::test]
    async fn test_optimize_accepts_blank_job_description() {
        let model = Arc::new(ScriptedModel::new(
            &json!({
                "optimized_summary": "",
                "suggested_skills": [],
                "keyword_matches": [],
                "improvement_suggestions": []
            })
            .to_string(),
        ));
        let response = app(model.clone())
            .oneshot(post_json(
                "/api/resume/optimize",
                json!({ "job_description": "  ", "resume_data": {} }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_optimize_incomplete_reply_is_500() {
        let response = app(Arc::new(ScriptedModel::new(r#"{"optimized_summary": "x"}"#)))
            .oneshot(post_json(
                "/api/resume/optimize",
                json!({ "job_description": "Rust role", "resume_data": {} }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_suggest_skills_filters_current() {
        let model = Arc::new(ScriptedModel::new(r#"["Docker", "rust", "Kubernetes"]"#));
        let response = app(model)
            .oneshot(post_json(
                "/api/resume/skills/suggest",
                json!({ "profession": "DevOps Engineer", "current_skills": ["Rust"] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({ "suggested_skills": ["Docker", "Kubernetes"] })
        );
    }

    #[tokio::test]
    async fn test_suggest_skills_defaults_missing_fields() {
        let response = app(Arc::new(ScriptedModel::new("no list here")))
            .oneshot(post_json("/api/resume/skills/suggest", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "suggested_skills": [] }));
    }

    #[tokio::test]
    async fn test_chatbot_null_message_is_required_error() {
        let response = app(Arc::new(ScriptedModel::new("")))
            .oneshot(post_json("/api/chatbot", json!({ "message": null })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Message is required");
    }

    #[tokio::test]
    async fn test_chatbot_null_session_uses_default() {
        let app = app(Arc::new(ScriptedModel::new("ok")));
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/chatbot",
                json!({ "message": "Tell me a joke", "session_id": null, "context": null }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(post_json(
                "/api/chatbot/session/summary",
                json!({ "session_id": null }),
            ))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["total_messages"], 1);
    }

    #[tokio::test]
    async fn test_chatbot_rejects_blank_message() {
        let response = app(Arc::new(ScriptedModel::new("")))
            .oneshot(post_json("/api/chatbot", json!({ "message": "   " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chatbot_session_lifecycle() {
        let app = app(Arc::new(ScriptedModel::new("Happy to help with that.")));

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/chatbot",
                json!({ "message": "Tell me a joke", "session_id": "abc" }),
            ))
            .await
            .unwrap();
        let reply = json_body(response).await;
        assert_eq!(reply["type"], "general");
        assert_eq!(reply["response"], "Happy to help with that.");

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/chatbot/session/summary",
                json!({ "session_id": "abc" }),
            ))
            .await
            .unwrap();
        let summary = json_body(response).await;
        assert_eq!(summary["total_messages"], 1);
        assert_eq!(summary["topics_discussed"], json!(["general"]));

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/chatbot/session/clear",
                json!({ "session_id": "abc" }),
            ))
            .await
            .unwrap();
        assert_eq!(
            json_body(response).await,
            json!({ "cleared": true, "session_id": "abc" })
        );

        let response = app
            .oneshot(post_json(
                "/api/chatbot/session/summary",
                json!({ "session_id": "abc" }),
            ))
            .await
            .unwrap();
        assert_eq!(
            json_body(response).await["message"],
            "No conversation history found"
        );
    }

    #[tokio::test]
    async fn test_chatbot_default_session() {
        let app = app(Arc::new(ScriptedModel::new("ok")));
        app.clone()
            .oneshot(post_json("/api/chatbot", json!({ "message": "Tell me a joke" })))
            .await
            .unwrap();

        let response = app
            .oneshot(post_json("/api/chatbot/session/clear", json!({})))
            .await
            .unwrap();
        assert_eq!(
            json_body(response).await,
            json!({ "cleared": true, "session_id": "default" })
        );
    }

    #[tokio::test]
    async fn test_welcome_is_localized() {
        let response = app(Arc::new(ScriptedModel::new("")))
            .oneshot(
                Request::get("/api/chatbot/welcome?lang=ur")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["language"]["code"], "ur");
        assert!(body["message"].as_str().unwrap().starts_with("سلام"));
    }

    #[tokio::test]
    async fn test_quick_actions_catalog() {
        let response = app(Arc::new(ScriptedModel::new("")))
            .oneshot(
                Request::get("/api/chatbot/quick-actions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body.as_object().map(|o| o.len()), Some(4));
        assert_eq!(body["job_search"].as_array().map(Vec::len), Some(5));
    }
}
