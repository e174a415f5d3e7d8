//! Chat Responder: orchestrates one chat request end to end.
//!
//! Steps run sequentially:
//! 1. fetch context, summarize applications (always)
//! 2. status questions short-circuit with the digest
//! 3. location extraction → job lookup (best effort)
//! 4. hosted model if configured, else the rule-based responder
//! 5. on failure, one retry through the rule-based responder
//!
//! Only the model call (or a responder error) reaches step 5; lookups degrade locally.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::chat::context::{fetch_context, ChatContext};
use crate::chat::fallback::{FallbackError, FallbackResponder};
use crate::chat::intent::is_application_status_query;
use crate::chat::jobs::{find_jobs_near, JobSummary, DEFAULT_JOB_LIMIT};
use crate::chat::location::LocationMatcher;
use crate::chat::prompts::{compose_message, personalization_block, to_model_history, ChatTurn};
use crate::chat::store::ChatStore;
use crate::chat::summary::{summarize_applications, ApplicationCard, ApplicationSummary};
use crate::config::Environment;
use crate::errors::AppError;
use crate::llm_client::{ChatModel, GenerationOptions, LlmError};

/// Which branch produced the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatMode {
    ApplicationStatus,
    RuleBased,
    AiPowered,
    RuleBasedFallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub success: bool,
    pub reply: String,
    pub jobs: Vec<JobSummary>,
    pub applications: Vec<ApplicationCard>,
    pub location: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub mode: ChatMode,
}

#[derive(Debug, Error)]
enum ChatFailure {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Rule-based responder failed: {0}")]
    Fallback(#[from] FallbackError),
}

pub struct ChatResponder {
    store: Arc<dyn ChatStore>,
    locator: Arc<dyn LocationMatcher>,
    model: Option<Arc<dyn ChatModel>>,
    fallback: Arc<dyn FallbackResponder>,
    environment: Environment,
}

impl ChatResponder {
    /// A responder without a hosted model answers every general question with `fallback`.
    pub fn new(
        store: Arc<dyn ChatStore>,
        locator: Arc<dyn LocationMatcher>,
        fallback: Arc<dyn FallbackResponder>,
        environment: Environment,
    ) -> Self {
        Self {
            store,
            locator,
            model: None,
            fallback,
            environment,
        }
    }

    pub fn with_model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().map(|m| m.model_name())
    }

    pub fn is_model_configured(&self) -> bool {
        self.model.is_some()
    }

    pub async fn respond(
        &self,
        user_id: Uuid,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<ChatReply, AppError> {
        if message.trim().is_empty() {
            return Err(AppError::Validation(
                "Message is required and must be a string".to_string(),
            ));
        }

        let context = fetch_context(self.store.as_ref(), user_id).await;
        let summary = summarize_applications(&context);

        if is_application_status_query(message) {
            return Ok(reply(
                summary.reply,
                Vec::new(),
                summary.cards,
                None,
                ChatMode::ApplicationStatus,
            ));
        }

        let location = self.locator.find_location(message);
        let jobs = match location.as_deref() {
            Some(loc) => {
                info!("Detected location query: {loc}");
                find_jobs_near(self.store.as_ref(), loc, DEFAULT_JOB_LIMIT).await
            }
            None => Vec::new(),
        };

        let attempt = match self.model.as_deref() {
            None => {
                info!("No hosted model configured, using rule-based responder");
                self.fallback
                    .respond(message, &context)
                    .map(|text| (text, ChatMode::RuleBased))
                    .map_err(ChatFailure::from)
            }
            Some(model) => self
                .ask_model(model, message, history, &context, &summary)
                .await
                .map(|text| (text, ChatMode::AiPowered))
                .map_err(ChatFailure::from),
        };

        let (text, mode) = match attempt {
            Ok(answer) => answer,
            Err(failure) => {
                warn!("Chat responder failed, falling back to rule-based: {failure}");
                match self.fallback.respond(message, &context) {
                    Ok(text) => (text, ChatMode::RuleBasedFallback),
                    Err(fallback_error) => {
                        error!("Rule-based fallback also failed: {fallback_error}");
                        return Err(AppError::ChatUnavailable {
                            detail: self
                                .environment
                                .is_development()
                                .then(|| failure.to_string()),
                        });
                    }
                }
            }
        };

        let text = text + &job_search_postscript(location.as_deref(), jobs.len());
        Ok(reply(text, jobs, summary.cards, location, mode))
    }

    async fn ask_model(
        &self,
        model: &dyn ChatModel,
        message: &str,
        history: &[ChatTurn],
        context: &ChatContext,
        summary: &ApplicationSummary,
    ) -> Result<String, LlmError> {
        let personalization = personalization_block(context, summary);
        let outgoing = compose_message(message, history.is_empty(), &personalization);
        let model_history = to_model_history(history);

        info!(
            "Sending chat message to {} ({} prior turns)",
            model.model_name(),
            model_history.len()
        );
        model
            .send_message(&model_history, &outgoing, GenerationOptions::default())
            .await
    }
}

/// Appended to general replies whenever a location was detected.
pub fn job_search_postscript(location: Option<&str>, job_count: usize) -> String {
    match location {
        None => String::new(),
        Some(loc) if job_count > 0 => format!(
            "\n\nI found {job_count} job{} in {loc}! Here they are:",
            if job_count > 1 { "s" } else { "" }
        ),
        Some(loc) => format!(
            "\n\nNo jobs found in {loc} at the moment.\n\nTry:\n\
             - Searching in nearby cities\n\
             - Adjusting your filters\n\
             - Checking back later for new postings\n\
             - Using Job Alerts to get notified!"
        ),
    }
}

fn reply(
    text: String,
    jobs: Vec<JobSummary>,
    applications: Vec<ApplicationCard>,
    location: Option<String>,
    mode: ChatMode,
) -> ChatReply {
    ChatReply {
        success: true,
        reply: text,
        jobs,
        applications,
        location,
        timestamp: Utc::now(),
        mode,
    }
}
