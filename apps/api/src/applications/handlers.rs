use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::applications::status::validate_status_update;
use crate::auth::{require_role, AuthUser};
use crate::errors::AppError;
use crate::models::application::{ApplicantRow, ApplicationDetailRow, ApplicationRow};
use crate::models::job::JobRow;
use crate::models::user::Role;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct MyApplicationsResponse {
    pub success: bool,
    pub applications: Vec<ApplicationDetailRow>,
}

#[derive(Serialize)]
pub struct ApplicantsResponse {
    pub success: bool,
    pub job: JobRow,
    pub applicants: Vec<ApplicantRow>,
}

#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
    pub message: Option<String>,
}

/// POST /api/v1/applications/apply/:job_id
pub async fn handle_apply(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let job_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?;
    if job_exists.is_none() {
        return Err(AppError::NotFound("Job not found.".to_string()));
    }

    // The (job_id, applicant_id) unique constraint turns a repeat application into no row.
    let created: Option<ApplicationRow> = sqlx::query_as(
        r#"
        INSERT INTO applications (job_id, applicant_id, status)
        VALUES ($1, $2, 'pending')
        ON CONFLICT (job_id, applicant_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?;

    let created = created.ok_or_else(|| {
        AppError::Validation("You have already applied for this job.".to_string())
    })?;
    info!("User {} applied to job {job_id} (application {})", user.id, created.id);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            success: true,
            message: "Job application submitted successfully!".to_string(),
        }),
    ))
}

/// GET /api/v1/applications
pub async fn handle_my_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<MyApplicationsResponse>, AppError> {
    let applications: Vec<ApplicationDetailRow> = sqlx::query_as(
        r#"
        SELECT a.id, a.job_id, a.status, a.feedback, a.created_at, a.updated_at,
               j.title AS job_title, j.location AS job_location, j.job_type,
               j.salary, j.experience_level,
               COALESCE(j.requirements, '{}') AS requirements,
               c.name AS company_name, c.logo AS company_logo
        FROM applications a
        LEFT JOIN jobs j ON j.id = a.job_id
        LEFT JOIN companies c ON c.id = j.company_id
        WHERE a.applicant_id = $1
        ORDER BY a.created_at DESC, a.id
        "#,
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    if applications.is_empty() {
        return Err(AppError::NotFound("No applications found.".to_string()));
    }
    Ok(Json(MyApplicationsResponse {
        success: true,
        applications,
    }))
}

/// GET /api/v1/applications/job/:job_id/applicants
pub async fn handle_job_applicants(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApplicantsResponse>, AppError> {
    let caller = require_role(&state.db, user.id, &[Role::Recruiter, Role::Admin]).await?;

    let job: JobRow = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found.".to_string()))?;

    if caller.role() != Some(Role::Admin) && job.created_by != caller.id {
        return Err(AppError::Forbidden(
            "Only the recruiter who posted this job can view its applicants".to_string(),
        ));
    }

    let applicants: Vec<ApplicantRow> = sqlx::query_as(
        r#"
        SELECT a.id, a.status, a.feedback, a.created_at,
               u.id AS applicant_id, u.fullname AS applicant_name,
               u.email AS applicant_email, u.phone_number AS applicant_phone,
               u.skills AS applicant_skills
        FROM applications a
        JOIN users u ON u.id = a.applicant_id
        WHERE a.job_id = $1
        ORDER BY a.created_at DESC, a.id
        "#,
    )
    .bind(job_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ApplicantsResponse {
        success: true,
        job,
        applicants,
    }))
}

/// POST /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(application_id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    require_role(&state.db, user.id, &[Role::Recruiter, Role::Admin]).await?;
    let update = validate_status_update(req.status.as_deref(), req.message.as_deref())?;

    let updated = sqlx::query(
        r#"
        UPDATE applications
        SET status = $1, feedback = $2, updated_at = now()
        WHERE id = $3
        "#,
    )
    .bind(update.status.as_str())
    .bind(&update.feedback)
    .bind(application_id)
    .execute(&state.db)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound("Application not found.".to_string()));
    }
    info!(
        "Application {application_id} moved to {} by {}",
        update.status.as_str(),
        user.id
    );

    Ok(Json(MessageResponse {
        success: true,
        message: "Application status updated successfully!".to_string(),
    }))
}
