use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_role, AuthUser};
use crate::db::contains_pattern;
use crate::errors::AppError;
use crate::jobs::validation::{ensure_can_post, validate_new_job, NewJobRequest};
use crate::models::company::CompanyRow;
use crate::models::job::{JobDetailRow, JobRow};
use crate::models::user::Role;
use crate::state::AppState;

const JOB_DETAIL_SELECT: &str = r#"
    SELECT j.id, j.title, j.description, j.location, j.salary, j.job_type,
           j.experience_level, j.position, COALESCE(j.requirements, '{}') AS requirements,
           j.company_id, c.name AS company_name, c.logo AS company_logo,
           j.created_by, j.created_at
    FROM jobs j
    LEFT JOIN companies c ON c.id = j.company_id
"#;

#[derive(Debug, Deserialize)]
pub struct JobSearchQuery {
    pub keyword: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize)]
pub struct JobResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub job: T,
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub success: bool,
    pub jobs: Vec<JobDetailRow>,
}

/// POST /api/v1/jobs
pub async fn handle_post_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<NewJobRequest>,
) -> Result<(StatusCode, Json<JobResponse<JobRow>>), AppError> {
    let recruiter = require_role(&state.db, user.id, &[Role::Recruiter]).await?;
    ensure_can_post(&recruiter)?;
    let new_job = validate_new_job(req)?;

    let company: CompanyRow = sqlx::query_as("SELECT id, name, logo FROM companies WHERE id = $1")
        .bind(new_job.company_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;

    let job: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs
            (title, description, location, salary, job_type, experience_level,
             position, requirements, company_id, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(&new_job.title)
    .bind(&new_job.description)
    .bind(&new_job.location)
    .bind(new_job.salary)
    .bind(&new_job.job_type)
    .bind(new_job.experience_level)
    .bind(new_job.position)
    .bind(&new_job.requirements)
    .bind(new_job.company_id)
    .bind(recruiter.id)
    .fetch_one(&state.db)
    .await?;

    info!(
        "Job {} posted for {} by recruiter {}",
        job.id, company.name, recruiter.id
    );
    Ok((
        StatusCode::CREATED,
        Json(JobResponse {
            success: true,
            message: Some("New job created successfully.".to_string()),
            job,
        }),
    ))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobResponse<JobDetailRow>>, AppError> {
    let job: JobDetailRow = sqlx::query_as(&format!("{JOB_DETAIL_SELECT} WHERE j.id = $1"))
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found.".to_string()))?;
    Ok(Json(JobResponse {
        success: true,
        message: None,
        job,
    }))
}

/// GET /api/v1/jobs?keyword=&location=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<JobSearchQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    let keyword = non_blank(query.keyword.as_deref()).map(contains_pattern);
    let location = non_blank(query.location.as_deref()).map(contains_pattern);

    let jobs: Vec<JobDetailRow> = sqlx::query_as(&format!(
        r#"{JOB_DETAIL_SELECT}
        WHERE ($1::TEXT IS NULL OR j.title ILIKE $1 OR j.description ILIKE $1)
          AND ($2::TEXT IS NULL OR j.location ILIKE $2)
        ORDER BY j.created_at DESC, j.id"#
    ))
    .bind(keyword)
    .bind(location)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(JobListResponse {
        success: true,
        jobs,
    }))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
