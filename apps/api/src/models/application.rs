use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Shortlisted,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ApplicationStatus::Pending),
            "reviewing" => Some(ApplicationStatus::Reviewing),
            "shortlisted" => Some(ApplicationStatus::Shortlisted),
            "accepted" => Some(ApplicationStatus::Accepted),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub status: String,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An application with its job and company flattened in. Job columns are
/// nullable because the job may have been removed after the application.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ApplicationDetailRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub status: String,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub job_title: Option<String>,
    pub job_location: Option<String>,
    pub job_type: Option<String>,
    pub salary: Option<i64>,
    pub experience_level: Option<i32>,
    pub requirements: Vec<String>,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
}

/// An application joined with the applicant's contact details, for recruiters.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub status: String,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
    pub applicant_id: Uuid,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: Option<String>,
    pub applicant_skills: Vec<String>,
}
