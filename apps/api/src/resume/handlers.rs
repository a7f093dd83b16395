//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::assistant::{generate_summary, optimize_for_job, parse_resume_text, suggest_skills};
use crate::resume::document::extract_document_text;
use crate::resume::models::{
    JobDescriptionInput, OptimizationResponse, ResumeData, ResumeInput, SkillSuggestRequest,
    SkillSuggestResponse, SummaryResponse,
};
use crate::resume::templates::{ResumeTemplate, TEMPLATES};
use crate::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: &'static [ResumeTemplate],
}

/// POST /api/resume/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Json(input): Json<ResumeInput>,
) -> Result<Json<SummaryResponse>, AppError> {
    let input = input.validated()?;
    let summary = generate_summary(state.llm.as_ref(), &input).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// POST /api/resume/extract
///
/// Multipart upload with a single `file` field (PDF or DOCX).
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeData>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((filename, content));
        break;
    }

    let (filename, content) = upload
        .filter(|(filename, _)| !filename.is_empty())
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let text = extract_document_text(&filename, content).await?;
    let data = parse_resume_text(state.llm.as_ref(), &text).await?;

    info!("Successfully extracted data from {filename}");
    Ok(Json(data))
}

/// POST /api/resume/optimize
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(input): Json<JobDescriptionInput>,
) -> Result<Json<OptimizationResponse>, AppError> {
    let response =
        optimize_for_job(state.llm.as_ref(), &input.job_description, &input.resume_data).await?;
    Ok(Json(response))
}

/// POST /api/resume/edit
///
/// Echoes the submitted resume back in normalized form.
pub async fn handle_edit(Json(data): Json<ResumeData>) -> Json<ResumeData> {
    info!("Resume data edited successfully");
    Json(data)
}

/// POST /api/resume/skills/suggest
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    Json(request): Json<SkillSuggestRequest>,
) -> Result<Json<SkillSuggestResponse>, AppError> {
    let suggested_skills = suggest_skills(
        state.llm.as_ref(),
        &request.profession,
        &request.current_skills,
    )
    .await?;
    Ok(Json(SkillSuggestResponse { suggested_skills }))
}

/// GET /api/templates
pub async fn handle_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: TEMPLATES,
    })
}
