//! Application Summarizer: pure projection of the caller's applications into a
//! status digest plus structured cards for the frontend.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::chat::context::ChatContext;
use crate::models::application::ApplicationStatus;

pub const NO_APPLICATIONS_REPLY: &str = "I couldn't find any applications linked to your account yet. \
Once you apply for roles, I'll keep track of their status here.";

const DIGEST_HEADER: &str = "Here is the latest update on your applications:";
const DIGEST_FOOTER: &str =
    "Let me know if you'd like help improving any of those skills or finding similar roles.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCard {
    pub id: Uuid,
    pub job_title: String,
    pub company_name: String,
    /// Lower-cased status as stored.
    pub status: String,
    pub feedback: String,
    pub applied_on: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Job requirements the user does not list among their skills.
    pub suggested_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationSummary {
    pub reply: String,
    pub cards: Vec<ApplicationCard>,
}

pub fn summarize_applications(context: &ChatContext) -> ApplicationSummary {
    if context.applications.is_empty() {
        return ApplicationSummary {
            reply: NO_APPLICATIONS_REPLY.to_string(),
            cards: Vec::new(),
        };
    }

    let cards: Vec<ApplicationCard> = context
        .applications
        .iter()
        .map(|app| {
            let status = if app.status.trim().is_empty() {
                ApplicationStatus::Pending.as_str().to_string()
            } else {
                app.status.to_lowercase()
            };
            ApplicationCard {
                id: app.id,
                job_title: non_empty_or(app.job_title.as_deref(), "Unknown Role"),
                company_name: non_empty_or(app.company_name.as_deref(), "Unknown Company"),
                status,
                feedback: app.feedback.clone(),
                applied_on: app.created_at,
                updated_at: app.updated_at,
                suggested_skills: suggested_skills(&app.requirements, context.skills()),
            }
        })
        .collect();

    let mut reply = DIGEST_HEADER.to_string();
    for (index, card) in cards.iter().enumerate() {
        reply.push_str(&format!(
            "\n{}. {} at {} - Status: {}.",
            index + 1,
            card.job_title,
            card.company_name,
            card.status.to_uppercase()
        ));
        if !card.feedback.is_empty() {
            reply.push_str(&format!(" Feedback from the employer: {}.", card.feedback));
        } else if card.status == ApplicationStatus::Rejected.as_str() {
            reply.push_str(" No specific feedback was provided.");
        }
        if !card.suggested_skills.is_empty() {
            reply.push_str(&format!(
                " Suggested skills to strengthen: {}.",
                card.suggested_skills.join(", ")
            ));
        }
    }
    reply.push_str("\n\n");
    reply.push_str(DIGEST_FOOTER);

    ApplicationSummary { reply, cards }
}

/// Requirements whose lowercase form is not exactly one of the user's lowercase skills.
pub fn suggested_skills(requirements: &[String], user_skills: &[String]) -> Vec<String> {
    let known: Vec<String> = user_skills.iter().map(|s| s.to_lowercase()).collect();
    requirements
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .filter(|r| !known.contains(&r.to_lowercase()))
        .map(String::from)
        .collect()
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}
