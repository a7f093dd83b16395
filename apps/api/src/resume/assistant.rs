//! Resume operations backed by the LLM: summary generation, structured
//! extraction, job optimization and skill suggestions.

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{render, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{complete_json, ChatModel, LlmError};
use crate::resume::models::{OptimizationResponse, ResumeData, ResumeInput};
use crate::resume::normalize::normalize_resume;
use crate::resume::prompts::{
    EXTRACT_PARAMS, EXTRACT_PROMPT, OPTIMIZE_PARAMS, OPTIMIZE_PROMPT, SKILLS_PARAMS,
    SKILLS_PROMPT, SUMMARY_PARAMS, SUMMARY_PROMPT,
};

/// Writes a 3-4 sentence summary from validated education and skills.
pub async fn generate_summary(llm: &dyn ChatModel, input: &ResumeInput) -> Result<String, AppError> {
    let prompt = render(
        SUMMARY_PROMPT,
        &[
            ("education", input.education.join(", ").as_str()),
            ("skills", input.skills.join(", ").as_str()),
        ],
    );

    let summary = match llm.complete(&prompt, SUMMARY_PARAMS).await {
        Ok(text) => text.trim().to_string(),
        Err(LlmError::EmptyContent) => String::new(),
        Err(e) => return Err(AppError::Llm(format!("Failed to generate summary: {e}"))),
    };

    info!("Generated summary for user with {} skills", input.skills.len());
    Ok(summary)
}

/// Turns raw resume text into a normalized `ResumeData`.
pub async fn parse_resume_text(llm: &dyn ChatModel, resume_text: &str) -> Result<ResumeData, AppError> {
    let prompt = render(
        EXTRACT_PROMPT,
        &[
            ("json_only", JSON_ONLY_INSTRUCTION),
            ("resume_text", resume_text),
        ],
    );

    // An empty reply reads as `{}`: every field takes its default.
    let parsed: Value = match complete_json(llm, &prompt, EXTRACT_PARAMS).await {
        Ok(value) => value,
        Err(LlmError::EmptyContent) => {
            warn!("Model returned no content for resume extraction");
            Value::Object(Default::default())
        }
        Err(e) => return Err(AppError::Llm(format!("Failed to parse AI response: {e}"))),
    };

    Ok(normalize_resume(parsed))
}

/// Tailors the summary and skills of a resume to a job description.
pub async fn optimize_for_job(
    llm: &dyn ChatModel,
    job_description: &str,
    resume: &ResumeData,
) -> Result<OptimizationResponse, AppError> {
    let prompt = render(
        OPTIMIZE_PROMPT,
        &[
            ("job_description", job_description),
            ("name", resume.name.as_str()),
            ("summary", resume.summary.as_str()),
            ("skills", resume.skills.join(", ").as_str()),
            ("experience", resume.experience.join(", ").as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );

    complete_json::<OptimizationResponse>(llm, &prompt, OPTIMIZE_PARAMS)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to parse optimization suggestions: {e}")))
}

/// Suggests skills for a profession. An unparseable reply yields no suggestions.
/// Skills the user already lists, and repeats, are filtered out.
pub async fn suggest_skills(
    llm: &dyn ChatModel,
    profession: &str,
    current_skills: &[String],
) -> Result<Vec<String>, AppError> {
    let prompt = render(
        SKILLS_PROMPT,
        &[
            ("profession", profession),
            ("current_skills", current_skills.join(", ").as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );

    let suggested = match complete_json::<Vec<Value>>(llm, &prompt, SKILLS_PARAMS).await {
        Ok(items) => items,
        Err(LlmError::Parse(e)) => {
            warn!("Skill suggestions were not a JSON array: {e}");
            Vec::new()
        }
        Err(LlmError::EmptyContent) => Vec::new(),
        Err(e) => return Err(AppError::Llm(format!("Failed to suggest skills: {e}"))),
    };

    Ok(filter_new_skills(suggested, current_skills))
}

fn filter_new_skills(suggested: Vec<Value>, current_skills: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = current_skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();

    let mut out = Vec::new();
    for item in suggested {
        let Value::String(skill) = item else { continue };
        let skill = skill.trim().to_string();
        let key = skill.to_lowercase();
        if skill.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(skill);
    }
    out
}
