//! In-memory fakes for exercising the chat flow without Postgres or a model key.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::chat::context::ChatContext;
use crate::chat::fallback::{FallbackError, FallbackResponder};
use crate::chat::store::ChatStore;
use crate::llm_client::{ChatMessage, ChatModel, GenerationOptions, LlmError};
use crate::models::application::ApplicationDetailRow;
use crate::models::job::JobListingRow;
use crate::models::user::UserProfileRow;

#[derive(Default)]
pub struct FakeStore {
    pub profile: Option<UserProfileRow>,
    pub applications: Vec<ApplicationDetailRow>,
    pub jobs: Vec<JobListingRow>,
    pub fail_context: bool,
    pub fail_jobs: bool,
    pub job_queries: AtomicUsize,
}

impl FakeStore {
    pub fn job_query_count(&self) -> usize {
        self.job_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatStore for FakeStore {
    async fn find_user_profile(&self, _user_id: Uuid) -> Result<Option<UserProfileRow>, sqlx::Error> {
        if self.fail_context {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self.profile.clone())
    }

    async fn recent_applications(
        &self,
        _user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ApplicationDetailRow>, sqlx::Error> {
        if self.fail_context {
            return Err(sqlx::Error::PoolTimedOut);
        }
        let mut apps = self.applications.clone();
        apps.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        apps.truncate(limit as usize);
        Ok(apps)
    }

    async fn jobs_by_location(
        &self,
        location: &str,
        limit: i64,
    ) -> Result<Vec<JobListingRow>, sqlx::Error> {
        self.job_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_jobs {
            return Err(sqlx::Error::PoolTimedOut);
        }
        let needle = location.to_lowercase();
        let mut jobs: Vec<JobListingRow> = self
            .jobs
            .iter()
            .filter(|j| {
                j.location
                    .as_deref()
                    .is_some_and(|l| l.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs.truncate(limit as usize);
        Ok(jobs)
    }
}

/// Records every call and answers with a canned reply, or fails.
pub struct FakeModel {
    pub reply: Option<String>,
    pub calls: Mutex<Vec<(Vec<ChatMessage>, String)>>,
}

impl FakeModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<(Vec<ChatMessage>, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for FakeModel {
    fn model_name(&self) -> &str {
        "fake-model"
    }

    async fn send_message(
        &self,
        history: &[ChatMessage],
        message: &str,
        _options: GenerationOptions,
    ) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((history.to_vec(), message.to_string()));
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        })
    }
}

/// Fallback responder that always fails, counting attempts.
#[derive(Default)]
pub struct FailingFallback {
    calls: AtomicUsize,
}

impl FailingFallback {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FallbackResponder for FailingFallback {
    fn respond(&self, _message: &str, _context: &ChatContext) -> Result<String, FallbackError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FallbackError::EmptyMessage)
    }
}

pub fn profile(name: &str, role: &str, skills: &[&str]) -> UserProfileRow {
    UserProfileRow {
        fullname: name.to_string(),
        role: role.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        verification_status: "approved".to_string(),
        rejection_reason: None,
    }
}

/// `age_days` pushes `updated_at` into the past so ordering is controllable.
pub fn application(
    title: &str,
    company: &str,
    status: &str,
    feedback: &str,
    requirements: &[&str],
    age_days: i64,
) -> ApplicationDetailRow {
    let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    ApplicationDetailRow {
        id: Uuid::new_v4(),
        job_id: Uuid::new_v4(),
        status: status.to_string(),
        feedback: feedback.to_string(),
        created_at: base - Duration::days(age_days + 7),
        updated_at: base - Duration::days(age_days),
        job_title: Some(title.to_string()),
        job_location: Some("Pune".to_string()),
        job_type: Some("Full-time".to_string()),
        salary: Some(1_200_000),
        experience_level: Some(2),
        requirements: requirements.iter().map(|s| s.to_string()).collect(),
        company_name: Some(company.to_string()),
        company_logo: None,
    }
}

pub fn job_listing(title: &str, location: &str, description: &str) -> JobListingRow {
    job_listing_posted(title, location, description, 0)
}

/// `age_days` pushes `created_at` into the past so ordering is controllable.
pub fn job_listing_posted(
    title: &str,
    location: &str,
    description: &str,
    age_days: i64,
) -> JobListingRow {
    JobListingRow {
        id: Uuid::new_v4(),
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        location: Some(location.to_string()),
        salary: Some(900_000),
        job_type: Some("Full-time".to_string()),
        experience_level: Some(1),
        position: Some(2),
        company_id: Some(Uuid::new_v4()),
        company_name: Some("Acme Labs".to_string()),
        company_logo: None,
        created_at: Utc.with_ymd_and_hms(2025, 5, 20, 9, 0, 0).unwrap() - Duration::days(age_days),
    }
}
