use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::analyzer::{analyze_resume, ResumeAnalysis};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub job_id: Option<Uuid>,
    /// Missing or `null` is analyzed as an empty resume.
    #[serde(default)]
    pub resume_text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub analysis: ResumeAnalysis,
    pub job_title: Option<String>,
}

/// POST /api/v1/analytics/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    _user: AuthUser,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(req) = body.map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))?;
    let job_id = req
        .job_id
        .ok_or_else(|| AppError::Validation("jobId is required".to_string()))?;

    let (title, requirements): (Option<String>, Vec<String>) = sqlx::query_as(
        "SELECT title, COALESCE(requirements, '{}') FROM jobs WHERE id = $1",
    )
    .bind(job_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis: analyze_resume(req.resume_text.as_deref().unwrap_or_default(), &requirements),
        job_title: title,
    }))
}
