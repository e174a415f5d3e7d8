// Prompt text and conversation shaping for the hosted chat model.

use serde_json::Value;

use crate::chat::context::ChatContext;
use crate::chat::summary::ApplicationSummary;
use crate::llm_client::{ChatMessage, ChatRole};
use crate::models::user::Role;

pub const SYSTEM_CONTEXT: &str = "You are a helpful AI assistant for a Job Portal platform. \
Help job seekers find jobs, answer application questions, and guide employers on posting jobs. \
Be professional, friendly, and concise (2-3 sentences unless more detail is needed). \
Tailor your answers using the provided user context.";

/// A turn as supplied by the client. Roles other than `user`/`assistant` are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    /// `None` unless the value is an object with string `role` and `content`.
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            role: value.get("role")?.as_str()?.to_string(),
            content: value.get("content")?.as_str()?.to_string(),
        })
    }
}

/// Reads client history leniently: `null` or a non-array is no history, and
/// malformed turns are skipped.
pub fn parse_history(raw: Option<&Value>) -> Vec<ChatTurn> {
    raw.and_then(Value::as_array)
        .map(|turns| turns.iter().filter_map(ChatTurn::from_value).collect())
        .unwrap_or_default()
}

/// Profile and recent-application block appended to what the model sees.
pub fn personalization_block(context: &ChatContext, summary: &ApplicationSummary) -> String {
    let user = context.user.as_ref();
    let name = user.map(|u| u.fullname.as_str()).unwrap_or("Unknown user");
    let role = user
        .and_then(|u| u.role())
        .map(Role::as_str)
        .unwrap_or("unknown role");
    let skills = if context.skills().is_empty() {
        "Not provided".to_string()
    } else {
        context.skills().join(", ")
    };

    let applications = if summary.cards.is_empty() {
        "No applications on record yet.".to_string()
    } else {
        summary
            .cards
            .iter()
            .map(|card| {
                let feedback = if card.feedback.is_empty() {
                    String::new()
                } else {
                    format!(" | Feedback: {}", card.feedback)
                };
                format!(
                    "- {} at {}: {}{}",
                    card.job_title,
                    card.company_name,
                    card.status.to_uppercase(),
                    feedback
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "User Profile:\n- Name: {name}\n- Role: {role}\n- Skills: {skills}\n\nRecent Applications:\n{applications}"
    )
}

/// The first turn carries the system preamble; later turns append the context after the question.
pub fn compose_message(message: &str, is_first_turn: bool, personalization: &str) -> String {
    if is_first_turn {
        format!("{SYSTEM_CONTEXT}\n\n{personalization}\n\nUser: {message}")
    } else {
        format!("{message}\n\n[Context]\n{personalization}")
    }
}

/// Converts client history to model turns. Unknown roles are dropped, then a
/// leading assistant turn is dropped because the conversation must open with the user.
pub fn to_model_history(history: &[ChatTurn]) -> Vec<ChatMessage> {
    let mut messages: Vec<ChatMessage> = history
        .iter()
        .filter_map(|turn| match turn.role.as_str() {
            "user" => Some(ChatMessage::user(turn.content.clone())),
            "assistant" => Some(ChatMessage::assistant(turn.content.clone())),
            _ => None,
        })
        .collect();
    if messages.first().is_some_and(|m| m.role != ChatRole::User) {
        messages.remove(0);
    }
    messages
}
