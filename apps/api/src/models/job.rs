use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting. Text columns are nullable because legacy rows predate validation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<i64>,
    pub job_type: Option<String>,
    pub experience_level: Option<i32>,
    pub position: Option<i32>,
    pub requirements: Vec<String>,
    pub company_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job joined with its (optional) company, as returned by location search.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct JobListingRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<i64>,
    pub job_type: Option<String>,
    pub experience_level: Option<i32>,
    pub position: Option<i32>,
    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A job with its company, as returned by the job endpoints.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobDetailRow {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<i64>,
    pub job_type: Option<String>,
    pub experience_level: Option<i32>,
    pub position: Option<i32>,
    pub requirements: Vec<String>,
    pub company_id: Option<Uuid>,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}
