use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::resume::normalize::normalize_resume;

/// Structured resume record shared by extraction, editing, optimization and
/// the chatbot context.
///
/// Deserialization always goes through `normalize_resume`, so any JSON shape
/// (missing fields, comma separated strings, nulls) yields a complete record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct ResumeData {
    pub name: String,
    pub tag: String,
    pub email: String,
    pub location: String,
    pub number: String,
    pub summary: String,
    pub websites: Vec<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub student: Vec<String>,
    pub courses: Vec<String>,
    pub internships: Vec<String>,
    pub extracurriculars: Vec<String>,
    pub hobbies: Vec<String>,
    pub references: Vec<String>,
    pub languages: Vec<String>,
}

impl From<Value> for ResumeData {
    fn from(value: Value) -> Self {
        normalize_resume(value)
    }
}

/// Input for summary generation.
#[derive(Debug, Deserialize)]
pub struct ResumeInput {
    pub education: Vec<String>,
    pub skills: Vec<String>,
}

impl ResumeInput {
    /// Trims entries and drops blanks. Each list must keep at least one item.
    pub fn validated(self) -> Result<Self, AppError> {
        Ok(Self {
            education: non_empty_list("education", self.education)?,
            skills: non_empty_list("skills", self.skills)?,
        })
    }
}

fn non_empty_list(field: &str, items: Vec<String>) -> Result<Vec<String>, AppError> {
    let cleaned: Vec<String> = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();

    if cleaned.is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "{field}: List cannot be empty or contain only empty strings"
        )));
    }
    Ok(cleaned)
}

#[derive(Debug, Deserialize)]
pub struct JobDescriptionInput {
    pub job_description: String,
    pub resume_data: ResumeData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResponse {
    pub optimized_summary: String,
    pub suggested_skills: Vec<String>,
    pub keyword_matches: Vec<String>,
    pub improvement_suggestions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SkillSuggestRequest {
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub current_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct SkillSuggestResponse {
    pub suggested_skills: Vec<String>,
}
