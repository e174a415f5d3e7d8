//! Status decisions made by recruiters on an application.

use crate::errors::AppError;
use crate::models::application::ApplicationStatus;

/// What to write back after a status decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    pub feedback: String,
}

/// Validates a decision. A rejection must carry feedback; any other status
/// without a message clears the previous feedback.
pub fn validate_status_update(
    status: Option<&str>,
    message: Option<&str>,
) -> Result<StatusUpdate, AppError> {
    let raw = status
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Status is required".to_string()))?;
    let status = ApplicationStatus::parse(raw)
        .ok_or_else(|| AppError::Validation(format!("Invalid status '{raw}'")))?;

    let feedback = message.map(str::trim).filter(|m| !m.is_empty());
    if status == ApplicationStatus::Rejected && feedback.is_none() {
        return Err(AppError::Validation(
            "Rejection feedback is required".to_string(),
        ));
    }
    Ok(StatusUpdate {
        status,
        feedback: feedback.unwrap_or_default().to_string(),
    })
}
