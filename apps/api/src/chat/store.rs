//! Read-only data access used by the chat flow.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::contains_pattern;
use crate::models::application::ApplicationDetailRow;
use crate::models::job::JobListingRow;
use crate::models::user::UserProfileRow;

/// Queries the chat flow needs. `Ok(None)` / empty vectors mean "nothing there";
/// `Err` means the backend could not answer.
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn find_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfileRow>, sqlx::Error>;

    /// Most recently updated first.
    async fn recent_applications(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ApplicationDetailRow>, sqlx::Error>;

    /// Case-insensitive containment on the job location, newest first.
    async fn jobs_by_location(
        &self,
        location: &str,
        limit: i64,
    ) -> Result<Vec<JobListingRow>, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgChatStore {
    pool: PgPool,
}

impl PgChatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatStore for PgChatStore {
    async fn find_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfileRow>, sqlx::Error> {
        sqlx::query_as::<_, UserProfileRow>(
            r#"
            SELECT fullname, role, skills, verification_status, rejection_reason
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn recent_applications(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ApplicationDetailRow>, sqlx::Error> {
        // `a.id` breaks ties so repeated reads return the same order.
        sqlx::query_as::<_, ApplicationDetailRow>(
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
            ORDER BY a.updated_at DESC, a.id
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn jobs_by_location(
        &self,
        location: &str,
        limit: i64,
    ) -> Result<Vec<JobListingRow>, sqlx::Error> {
        sqlx::query_as::<_, JobListingRow>(
            r#"
            SELECT j.id, j.title, j.description, j.location, j.salary, j.job_type,
                   j.experience_level, j.position, j.created_at,
                   c.id AS company_id, c.name AS company_name, c.logo AS company_logo
            FROM jobs j
            LEFT JOIN companies c ON c.id = j.company_id
            WHERE j.location ILIKE $1
            ORDER BY j.created_at DESC, j.id
            LIMIT $2
            "#,
        )
        .bind(contains_pattern(location))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}
