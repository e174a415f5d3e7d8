//! Job Locator: best-effort job search by location for chat replies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::store::ChatStore;
use crate::models::job::JobListingRow;

pub const DEFAULT_JOB_LIMIT: i64 = 5;
pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: Option<Uuid>,
    pub name: String,
    pub logo: Option<String>,
}

/// Compact, fully-defaulted job record for the chat widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: i64,
    pub job_type: String,
    pub experience_level: i32,
    pub position: i32,
    pub company: CompanySummary,
    pub created_at: DateTime<Utc>,
}

/// Never fails: a query error is logged and yields no jobs.
pub async fn find_jobs_near(store: &dyn ChatStore, location: &str, limit: i64) -> Vec<JobSummary> {
    match store.jobs_by_location(location, limit).await {
        Ok(rows) => {
            info!("Found {} jobs in {location}", rows.len());
            rows.into_iter().map(summarize_job).collect()
        }
        Err(e) => {
            warn!("Job search for location '{location}' failed: {e}");
            Vec::new()
        }
    }
}

pub fn summarize_job(row: JobListingRow) -> JobSummary {
    let company = match row.company_name.filter(|n| !n.is_empty()) {
        Some(name) => CompanySummary {
            id: row.company_id,
            name,
            logo: row.company_logo,
        },
        None => CompanySummary {
            id: None,
            name: "Unknown Company".to_string(),
            logo: None,
        },
    };

    JobSummary {
        id: row.id,
        title: text_or(row.title, "No title"),
        description: preview_description(row.description.as_deref()),
        location: text_or(row.location, "Not specified"),
        salary: row.salary.unwrap_or(0),
        job_type: text_or(row.job_type, "Not specified"),
        experience_level: row.experience_level.unwrap_or(0),
        position: row.position.filter(|p| *p != 0).unwrap_or(1),
        company,
        created_at: row.created_at,
    }
}

/// Truncates to `DESCRIPTION_PREVIEW_CHARS` characters plus an ellipsis.
pub fn preview_description(description: Option<&str>) -> String {
    match description.filter(|d| !d.is_empty()) {
        None => "No description available".to_string(),
        Some(d) if d.chars().count() > DESCRIPTION_PREVIEW_CHARS => {
            let truncated: String = d.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{truncated}...")
        }
        Some(d) => d.to_string(),
    }
}

fn text_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::testing::{job_listing, job_listing_posted, FakeStore};

    #[test]
    fn test_long_description_truncated_with_ellipsis() {
        let long = "a".repeat(151);
        let preview = preview_description(Some(&long));
        assert_eq!(preview.len(), 153);
        assert!(preview.ends_with("..."));
        assert_eq!(&preview[..150], &long[..150]);
    }

    #[test]
    fn test_description_at_limit_unchanged() {
        let exact = "b".repeat(150);
        assert_eq!(preview_description(Some(&exact)), exact);
        assert_eq!(preview_description(Some("short")), "short");
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = "é".repeat(160);
        let preview = preview_description(Some(&text));
        assert_eq!(preview.chars().count(), 153);
    }

    #[test]
    fn test_missing_fields_are_defaulted() {
        let mut row = job_listing("x", "Pune", "y");
        row.title = None;
        row.description = Some(String::new());
        row.location = None;
        row.salary = None;
        row.job_type = None;
        row.experience_level = None;
        row.position = Some(0);
        row.company_name = None;

        let job = summarize_job(row);
        assert_eq!(job.title, "No title");
        assert_eq!(job.description, "No description available");
        assert_eq!(job.location, "Not specified");
        assert_eq!(job.salary, 0);
        assert_eq!(job.job_type, "Not specified");
        assert_eq!(job.experience_level, 0);
        assert_eq!(job.position, 1);
        assert_eq!(
            job.company,
            CompanySummary {
                id: None,
                name: "Unknown Company".to_string(),
                logo: None
            }
        );
    }

    #[tokio::test]
    async fn test_find_jobs_near_matches_case_insensitively() {
        let store = FakeStore {
            jobs: vec![
                job_listing("Rust Dev", "Pune, Maharashtra", "Build services"),
                job_listing("Go Dev", "Mumbai", "Build APIs"),
            ],
            ..Default::default()
        };
        let jobs = find_jobs_near(&store, "pune", DEFAULT_JOB_LIMIT).await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Rust Dev");
        assert_eq!(jobs[0].company.name, "Acme Labs");
    }

    #[tokio::test]
    async fn test_find_jobs_near_respects_limit() {
        let store = FakeStore {
            jobs: (0..8)
                .map(|i| job_listing(&format!("Job {i}"), "Delhi", "d"))
                .collect(),
            ..Default::default()
        };
        assert_eq!(find_jobs_near(&store, "Delhi", DEFAULT_JOB_LIMIT).await.len(), 5);
    }

    #[tokio::test]
    async fn test_find_jobs_near_returns_newest_first() {
        let store = FakeStore {
            jobs: vec![
                job_listing_posted("Older", "Chennai", "d", 10),
                job_listing_posted("Newest", "Chennai", "d", 0),
                job_listing_posted("Middle", "Chennai", "d", 3),
            ],
            ..Default::default()
        };
        let titles: Vec<String> = find_jobs_near(&store, "chennai", DEFAULT_JOB_LIMIT)
            .await
            .into_iter()
            .map(|j| j.title)
            .collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Older"]);
    }

    #[tokio::test]
    async fn test_find_jobs_near_keeps_newest_when_limited() {
        let store = FakeStore {
            jobs: (0..7)
                .map(|i| job_listing_posted(&format!("Job {i}"), "Delhi", "d", i))
                .rev()
                .collect(),
            ..Default::default()
        };
        let jobs = find_jobs_near(&store, "Delhi", 2).await;
        assert_eq!(jobs[0].title, "Job 0");
        assert_eq!(jobs[1].title, "Job 1");
    }

    #[tokio::test]
    async fn test_find_jobs_near_swallows_store_errors() {
        let store = FakeStore {
            jobs: vec![job_listing("Rust Dev", "Pune", "d")],
            fail_jobs: true,
            ..Default::default()
        };
        assert!(find_jobs_near(&store, "Pune", DEFAULT_JOB_LIMIT).await.is_empty());
    }
}
