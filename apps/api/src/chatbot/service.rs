//! Smart chatbot: routes each message to the guardrail, web search, resume
//! advice or general handler and keeps per-session memory.
//!
//! Model failures never escape as HTTP errors: the caller always gets a
//! `ChatReply`, with `type = "error"` when the model could not answer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::chatbot::language::{detect_language, CannedReply, Language};
use crate::chatbot::memory::{transcript, Exchange, SessionStore, SessionSummary, Topic};
use crate::chatbot::prompts::{
    GENERAL_ERROR, GENERAL_FALLBACK, GENERAL_HISTORY, GENERAL_PARAMS, GENERAL_PROMPT,
    RESUME_ADVICE_ERROR, RESUME_ADVICE_FALLBACK, RESUME_ADVICE_PARAMS, RESUME_ADVICE_PROMPT,
    RESUME_CONTEXT_BLOCK, RESUME_HISTORY, SEARCH_ERROR, SEARCH_FALLBACK, SEARCH_PARAMS,
    SEARCH_PROMPT,
};
use crate::chatbot::rules::{extract_search_query, route, Route};
use crate::chatbot::search::{SearchHit, SearchProvider};
use crate::chatbot::suggestions::extract_suggestions;
use crate::config::ChatbotSettings;
use crate::llm_client::prompts::render;
use crate::llm_client::{ChatModel, CompletionParams, LlmError};
use crate::resume::models::ResumeData;

/// Optional client-side context sent with a chat message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatContext {
    #[serde(default)]
    pub resume_data: Option<ResumeData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    GuardrailResponse,
    WebSearchResponse,
    SearchFailed,
    ResumeAdvice,
    General,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(rename = "type")]
    pub kind: ReplyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceLink>>,
    pub timestamp: DateTime<Utc>,
}

impl ChatReply {
    fn new(response: impl Into<String>, kind: ReplyKind) -> Self {
        Self {
            response: response.into(),
            kind,
            suggestions: None,
            sources: None,
            timestamp: Utc::now(),
        }
    }
}

pub struct ChatbotService {
    llm: Arc<dyn ChatModel>,
    search: Arc<dyn SearchProvider>,
    sessions: SessionStore,
    max_search_results: usize,
}

impl ChatbotService {
    pub fn new(
        llm: Arc<dyn ChatModel>,
        search: Arc<dyn SearchProvider>,
        settings: &ChatbotSettings,
    ) -> Self {
        Self {
            llm,
            search,
            sessions: SessionStore::new(settings.max_session_memory),
            max_search_results: settings.max_search_results,
        }
    }

    /// Main entry point: triage the message and answer it.
    pub async fn process_message(
        &self,
        message: &str,
        context: &ChatContext,
        session_id: &str,
    ) -> ChatReply {
        self.sessions.ensure(session_id);
        let language = detect_language(message);

        match route(message) {
            Route::Guardrail => {
                info!(session_id, "Message blocked by guardrails");
                ChatReply::new(
                    CannedReply::Guardrail.text(language),
                    ReplyKind::GuardrailResponse,
                )
            }
            Route::WebSearch => self.handle_web_search(message, session_id, language).await,
            Route::ResumeAdvice => {
                self.handle_resume_query(message, context, session_id, language)
                    .await
            }
            Route::General => self.handle_general_query(message, session_id, language).await,
        }
    }

    pub fn session_summary(&self, session_id: &str) -> Option<SessionSummary> {
        self.sessions.summary(session_id)
    }

    pub fn clear_session(&self, session_id: &str) -> bool {
        self.sessions.clear(session_id)
    }

    async fn handle_web_search(
        &self,
        message: &str,
        session_id: &str,
        language: Language,
    ) -> ChatReply {
        let query = extract_search_query(message);
        // A provider outage answers like a search with no results.
        let hits = match self.search.search(&query, self.max_search_results).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Web search via {} failed: {e:#}", self.search.name());
                Vec::new()
            }
        };
        info!(session_id, query = %query, hits = hits.len(), "Web search completed");

        let reply = self.answer_from_hits(message, &hits, language).await;
        self.sessions.record(
            session_id,
            Exchange::new(message, &reply.response, Topic::WebSearch),
        );
        reply
    }

    async fn answer_from_hits(
        &self,
        message: &str,
        hits: &[SearchHit],
        language: Language,
    ) -> ChatReply {
        if hits.is_empty() {
            return ChatReply::new(
                CannedReply::SearchFailed.text(language),
                ReplyKind::SearchFailed,
            );
        }

        let results = hits
            .iter()
            .map(|hit| format!("Source: {}\nContent: {}\n", hit.title, hit.content))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = render(
            SEARCH_PROMPT,
            &[
                ("message", message),
                ("results", results.as_str()),
                ("language_instruction", language_instruction(language).as_str()),
            ],
        );

        let Some(response) = self.ask(&prompt, SEARCH_PARAMS, SEARCH_FALLBACK).await else {
            return ChatReply::new(SEARCH_ERROR, ReplyKind::Error);
        };

        ChatReply {
            sources: Some(
                hits.iter()
                    .map(|hit| SourceLink {
                        title: hit.title.clone(),
                        url: hit.url.clone(),
                    })
                    .collect(),
            ),
            ..ChatReply::new(response, ReplyKind::WebSearchResponse)
        }
    }

    async fn handle_resume_query(
        &self,
        message: &str,
        context: &ChatContext,
        session_id: &str,
        language: Language,
    ) -> ChatReply {
        let history = transcript(&self.sessions.recent(session_id, RESUME_HISTORY));
        let resume_context = context
            .resume_data
            .as_ref()
            .map(resume_context_block)
            .unwrap_or_default();

        let prompt = render(
            RESUME_ADVICE_PROMPT,
            &[
                ("resume_context", resume_context.as_str()),
                ("history", history.as_str()),
                ("message", message),
                ("language_instruction", language_instruction(language).as_str()),
            ],
        );

        let Some(response) = self
            .ask(&prompt, RESUME_ADVICE_PARAMS, RESUME_ADVICE_FALLBACK)
            .await
        else {
            return ChatReply::new(RESUME_ADVICE_ERROR, ReplyKind::Error);
        };

        self.sessions.record(
            session_id,
            Exchange::new(message, &response, Topic::ResumeAdvice),
        );

        ChatReply {
            suggestions: Some(extract_suggestions(&response)),
            ..ChatReply::new(response, ReplyKind::ResumeAdvice)
        }
    }

    async fn handle_general_query(
        &self,
        message: &str,
        session_id: &str,
        language: Language,
    ) -> ChatReply {
        let history = transcript(&self.sessions.recent(session_id, GENERAL_HISTORY));
        let prompt = render(
            GENERAL_PROMPT,
            &[
                ("history", history.as_str()),
                ("message", message),
                ("language_instruction", language_instruction(language).as_str()),
            ],
        );

        let Some(response) = self.ask(&prompt, GENERAL_PARAMS, GENERAL_FALLBACK).await else {
            return ChatReply::new(GENERAL_ERROR, ReplyKind::Error);
        };

        self.sessions.record(
            session_id,
            Exchange::new(message, &response, Topic::General),
        );
        ChatReply::new(response, ReplyKind::General)
    }

    /// Calls the model. Empty content is replaced by `fallback`; any other
    /// failure is logged and reported as `None`.
    async fn ask(&self, prompt: &str, params: CompletionParams, fallback: &str) -> Option<String> {
        match self.llm.complete(prompt, params).await {
            Ok(text) => Some(text),
            Err(LlmError::EmptyContent) => Some(fallback.to_string()),
            Err(e) => {
                warn!("Chatbot model call failed: {e}");
                None
            }
        }
    }
}

fn language_instruction(language: Language) -> String {
    if language.is_english() {
        String::new()
    } else {
        format!("- Respond in {} ({})", language.name, language.code)
    }
}

fn or_not_provided(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not provided"
    } else {
        value
    }
}

fn resume_context_block(resume: &ResumeData) -> String {
    render(
        RESUME_CONTEXT_BLOCK,
        &[
            ("name", or_not_provided(&resume.name)),
            ("tag", or_not_provided(&resume.tag)),
            ("skills", resume.skills.join(", ").as_str()),
            ("experience", resume.experience.join(", ").as_str()),
            ("education", resume.education.join(", ").as_str()),
        ],
    )
}
