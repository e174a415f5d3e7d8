pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::analytics::handlers as analytics;
use crate::applications::handlers as applications;
use crate::chat::handlers as chat;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chat assistant
        .route("/api/v1/chat", post(chat::handle_chat))
        .route("/api/v1/chat/test", get(chat::handle_chat_test))
        // Applications
        .route(
            "/api/v1/applications",
            get(applications::handle_my_applications),
        )
        .route(
            "/api/v1/applications/apply/:job_id",
            post(applications::handle_apply),
        )
        .route(
            "/api/v1/applications/job/:job_id/applicants",
            get(applications::handle_job_applicants),
        )
        .route(
            "/api/v1/applications/:id/status",
            post(applications::handle_update_status),
        )
        // Recruiter verification (admin)
        .route(
            "/api/v1/admin/employers",
            get(admin::handle_list_employers),
        )
        .route(
            "/api/v1/admin/employers/pending",
            get(admin::handle_pending_employers),
        )
        .route(
            "/api/v1/admin/employers/:id",
            get(admin::handle_employer_details),
        )
        .route(
            "/api/v1/admin/employers/:id/approve",
            post(admin::handle_approve_employer),
        )
        .route(
            "/api/v1/admin/employers/:id/reject",
            post(admin::handle_reject_employer),
        )
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_post_job),
        )
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        // Resume analyzer
        .route("/api/v1/analytics/analyze", post(analytics::handle_analyze))
        .with_state(state)
}
