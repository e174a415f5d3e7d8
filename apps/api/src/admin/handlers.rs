use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{require_role, AuthUser};
use crate::errors::AppError;
use crate::models::user::{Role, UserRow, VerificationStatus};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EmployerFilter {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct RejectRequest {
    pub reason: Option<String>,
}

#[derive(Serialize)]
pub struct EmployerListResponse {
    pub success: bool,
    pub employers: Vec<UserRow>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct EmployerResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub employer: UserRow,
}

/// GET /api/v1/admin/employers/pending
pub async fn handle_pending_employers(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<EmployerListResponse>, AppError> {
    require_role(&state.db, user.id, &[Role::Admin]).await?;
    let employers = list_employers(&state, Some(VerificationStatus::Pending)).await?;
    Ok(Json(EmployerListResponse {
        success: true,
        count: employers.len(),
        employers,
    }))
}

/// GET /api/v1/admin/employers?status=pending|approved|rejected|all
pub async fn handle_list_employers(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<EmployerFilter>,
) -> Result<Json<EmployerListResponse>, AppError> {
    require_role(&state.db, user.id, &[Role::Admin]).await?;
    let status = parse_status_filter(filter.status.as_deref())?;
    let employers = list_employers(&state, status).await?;
    Ok(Json(EmployerListResponse {
        success: true,
        count: employers.len(),
        employers,
    }))
}

/// GET /api/v1/admin/employers/:id
pub async fn handle_employer_details(
    State(state): State<AppState>,
    user: AuthUser,
    Path(employer_id): Path<Uuid>,
) -> Result<Json<EmployerResponse>, AppError> {
    require_role(&state.db, user.id, &[Role::Admin]).await?;
    let employer: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = $1 AND role = 'recruiter'")
        .bind(employer_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(employer_not_found)?;
    Ok(Json(EmployerResponse {
        success: true,
        message: None,
        employer,
    }))
}

/// POST /api/v1/admin/employers/:id/approve
pub async fn handle_approve_employer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(employer_id): Path<Uuid>,
) -> Result<Json<EmployerResponse>, AppError> {
    require_role(&state.db, user.id, &[Role::Admin]).await?;
    let employer: UserRow = sqlx::query_as(
        r#"
        UPDATE users
        SET verification_status = 'approved', is_verified = TRUE,
            rejection_reason = NULL, updated_at = now()
        WHERE id = $1 AND role = 'recruiter'
        RETURNING *
        "#,
    )
    .bind(employer_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(employer_not_found)?;

    info!("Recruiter {employer_id} approved by admin {}", user.id);
    Ok(Json(EmployerResponse {
        success: true,
        message: Some(format!("{} has been approved successfully", employer.fullname)),
        employer,
    }))
}

/// POST /api/v1/admin/employers/:id/reject
pub async fn handle_reject_employer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(employer_id): Path<Uuid>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<EmployerResponse>, AppError> {
    require_role(&state.db, user.id, &[Role::Admin]).await?;
    let reason = req
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::Validation("Rejection reason is required".to_string()))?;

    let employer: UserRow = sqlx::query_as(
        r#"
        UPDATE users
        SET verification_status = 'rejected', is_verified = FALSE,
            rejection_reason = $2, updated_at = now()
        WHERE id = $1 AND role = 'recruiter'
        RETURNING *
        "#,
    )
    .bind(employer_id)
    .bind(reason)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(employer_not_found)?;

    info!("Recruiter {employer_id} rejected by admin {}", user.id);
    Ok(Json(EmployerResponse {
        success: true,
        message: Some(format!("{} has been rejected", employer.fullname)),
        employer,
    }))
}

async fn list_employers(
    state: &AppState,
    status: Option<VerificationStatus>,
) -> Result<Vec<UserRow>, AppError> {
    let employers = sqlx::query_as(
        r#"
        SELECT * FROM users
        WHERE role = 'recruiter'
          AND ($1::TEXT IS NULL OR verification_status = $1)
        ORDER BY created_at DESC, id
        "#,
    )
    .bind(status.map(VerificationStatus::as_str))
    .fetch_all(&state.db)
    .await?;
    Ok(employers)
}

/// `None`, empty or `all` means no filter.
pub fn parse_status_filter(raw: Option<&str>) -> Result<Option<VerificationStatus>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => VerificationStatus::parse(s)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Unknown verification status '{s}'"))),
    }
}

fn employer_not_found() -> AppError {
    AppError::NotFound("Employer not found".to_string())
}
