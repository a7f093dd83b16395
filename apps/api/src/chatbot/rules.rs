//! Keyword rules that triage a chat message before any model call.
//!
//! All matching is lowercase substring matching against fixed lists, checked in
//! the order guardrail → web search → resume advice → general.

use serde::Serialize;

pub const RESTRICTED_TOPICS: &[&str] = &[
    "illegal activities",
    "harmful content",
    "violence",
    "hate speech",
    "discrimination",
    "personal information",
    "private data",
    "passwords",
    "financial details",
    "medical advice",
    "legal advice",
    "adult content",
];

pub const WARNING_KEYWORDS: &[&str] = &[
    "hack", "crack", "pirate", "steal", "fraud", "scam", "illegal", "drugs", "weapons",
    "violence", "suicide", "self-harm",
];

pub const RESUME_KEYWORDS: &[&str] = &[
    "resume",
    "cv",
    "curriculum vitae",
    "job",
    "career",
    "skills",
    "experience",
    "education",
    "interview",
    "application",
    "hiring",
    "employment",
    "work",
    "professional",
    "qualification",
    "achievement",
    "accomplishment",
    "portfolio",
    "linkedin",
    "networking",
    "salary",
    "promotion",
    "manager",
    "leadership",
    "teamwork",
    "project",
    "certification",
    "training",
    "internship",
];

pub const SEARCH_TRIGGERS: &[&str] = &[
    "search for",
    "find information",
    "look up",
    "what is",
    "who is",
    "latest news",
    "current",
    "recent",
    "trending",
    "company info",
    "salary",
    "market rate",
    "industry trends",
    "job market",
    "hiring trends",
    "company culture",
    "interview questions",
    "skill requirements",
    "certification requirements",
    "course recommendations",
];

const QUESTION_WORDS: &[&str] = &["what", "who", "where", "when", "why", "how", "is", "are", "the"];

/// Which handler a message is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Guardrail,
    WebSearch,
    ResumeAdvice,
    General,
}

fn contains_any(message: &str, needles: &[&str]) -> bool {
    let lower = message.to_lowercase();
    needles.iter().any(|needle| lower.contains(needle))
}

/// True when the message touches a restricted topic or warning keyword.
pub fn violates_guardrails(message: &str) -> bool {
    contains_any(message, RESTRICTED_TOPICS) || contains_any(message, WARNING_KEYWORDS)
}

pub fn needs_web_search(message: &str) -> bool {
    contains_any(message, SEARCH_TRIGGERS)
}

pub fn is_resume_related(message: &str) -> bool {
    contains_any(message, RESUME_KEYWORDS)
}

pub fn route(message: &str) -> Route {
    if violates_guardrails(message) {
        Route::Guardrail
    } else if needs_web_search(message) {
        Route::WebSearch
    } else if is_resume_related(message) {
        Route::ResumeAdvice
    } else {
        Route::General
    }
}

/// Reduces a chat message to search keywords: trigger phrases and question
/// words are removed. Falls back to the original message if nothing is left.
pub fn extract_search_query(message: &str) -> String {
    let mut query = message.to_lowercase();
    for trigger in SEARCH_TRIGGERS {
        query = query.replace(trigger, "");
    }

    let filtered: Vec<&str> = query
        .split_whitespace()
        .filter(|word| !QUESTION_WORDS.contains(word))
        .collect();

    if filtered.is_empty() {
        message.to_string()
    } else {
        filtered.join(" ")
    }
}
