//! Checks applied before a job posting is written.

use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, UserRow, VerificationStatus};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub salary: Option<i64>,
    pub job_type: Option<String>,
    pub experience_level: Option<i32>,
    pub position: Option<i32>,
}

/// A request that passed validation, with text fields trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub company_id: Uuid,
    pub requirements: Vec<String>,
    pub salary: Option<i64>,
    pub job_type: Option<String>,
    pub experience_level: Option<i32>,
    pub position: i32,
}

/// Only recruiters whose account an admin has approved may post.
pub fn ensure_can_post(user: &UserRow) -> Result<(), AppError> {
    if user.role() != Some(Role::Recruiter) {
        return Err(AppError::Forbidden(
            "Only recruiters can post jobs".to_string(),
        ));
    }
    match user.verification() {
        Some(VerificationStatus::Approved) => Ok(()),
        Some(VerificationStatus::Rejected) => Err(AppError::Forbidden(
            "Your employer account was rejected. Please contact support.".to_string(),
        )),
        _ => Err(AppError::Forbidden(
            "Your employer account is pending admin verification. You can post jobs once approved."
                .to_string(),
        )),
    }
}

pub fn validate_new_job(req: NewJobRequest) -> Result<NewJob, AppError> {
    let title = required_text(req.title, "title")?;
    let description = required_text(req.description, "description")?;
    let location = required_text(req.location, "location")?;
    let company_id = req
        .company_id
        .ok_or_else(|| AppError::Validation("companyId is required".to_string()))?;

    if req.salary.is_some_and(|s| s < 0) {
        return Err(AppError::Validation("salary cannot be negative".to_string()));
    }
    if req.experience_level.is_some_and(|e| e < 0) {
        return Err(AppError::Validation(
            "experienceLevel cannot be negative".to_string(),
        ));
    }
    let position = req.position.unwrap_or(1);
    if position < 1 {
        return Err(AppError::Validation("position must be at least 1".to_string()));
    }

    Ok(NewJob {
        title,
        description,
        location,
        company_id,
        requirements: req
            .requirements
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(String::from)
            .collect(),
        salary: req.salary,
        job_type: req
            .job_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
        experience_level: req.experience_level,
        position,
    })
}

fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}
