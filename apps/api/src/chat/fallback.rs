//! Rule-based responder used when no hosted model is configured or the model
//! call fails. Keyword topics are checked in a fixed order; the first hit answers.

use thiserror::Error;

use crate::chat::context::ChatContext;
use crate::models::user::{Role, VerificationStatus};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FallbackError {
    #[error("message is blank")]
    EmptyMessage,
}

/// Answers without a hosted model. The responder holds one as its last resort.
pub trait FallbackResponder: Send + Sync {
    fn respond(&self, message: &str, context: &ChatContext) -> Result<String, FallbackError>;
}

/// Keyword-topic responder backed by [`respond`].
pub struct RuleBasedResponder;

impl FallbackResponder for RuleBasedResponder {
    fn respond(&self, message: &str, context: &ChatContext) -> Result<String, FallbackError> {
        respond(message, context)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Verification,
    PostJob,
    JobSearch,
    Apply,
    Resume,
    Interview,
    Salary,
    Skills,
    Greeting,
    Thanks,
    Help,
    Unknown,
}

struct Words(Vec<String>);

impl Words {
    fn of(message: &str) -> Self {
        Words(
            message
                .to_lowercase()
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    fn any(&self, words: &[&str]) -> bool {
        self.0.iter().any(|w| words.contains(&w.as_str()))
    }

    fn any_prefix(&self, prefixes: &[&str]) -> bool {
        self.0
            .iter()
            .any(|w| prefixes.iter().any(|p| w.starts_with(p)))
    }
}

fn classify(words: &Words) -> Topic {
    if words.any_prefix(&["verif", "approv"]) {
        Topic::Verification
    } else if words.any(&["post", "posting", "hire", "hiring", "recruit", "recruiting"]) {
        Topic::PostJob
    } else if words.any_prefix(&["job", "opening", "vacanc", "opportunit", "position"]) {
        Topic::JobSearch
    } else if words.any_prefix(&["apply", "applying", "appli"]) {
        Topic::Apply
    } else if words.any_prefix(&["resume", "cv"]) {
        Topic::Resume
    } else if words.any_prefix(&["interview"]) {
        Topic::Interview
    } else if words.any(&["salary", "salaries", "pay", "ctc", "package", "compensation"]) {
        Topic::Salary
    } else if words.any_prefix(&["skill", "learn", "course", "upskill"]) {
        Topic::Skills
    } else if words.any(&["hi", "hello", "hey", "hiya", "namaste", "morning", "evening"]) {
        Topic::Greeting
    } else if words.any_prefix(&["thank", "thx"]) {
        Topic::Thanks
    } else if words.any(&["help", "assist", "support"]) {
        Topic::Help
    } else {
        Topic::Unknown
    }
}

/// Answers `message` without a hosted model, personalized from `context` when available.
pub fn respond(message: &str, context: &ChatContext) -> Result<String, FallbackError> {
    if message.trim().is_empty() {
        return Err(FallbackError::EmptyMessage);
    }

    let role = context
        .user
        .as_ref()
        .and_then(|u| u.role())
        .unwrap_or(Role::Student);
    let first_name = context
        .user
        .as_ref()
        .and_then(|u| u.fullname.split_whitespace().next())
        .map(|n| format!(" {n}"))
        .unwrap_or_default();

    let reply = match classify(&Words::of(message)) {
        Topic::Verification => verification_reply(context, role),
        Topic::PostJob if role == Role::Recruiter => {
            let mut reply = "To post a job, open your dashboard, choose \"Post a Job\", \
                fill in the title, description, requirements, salary, location and company, then submit. \
                Listings go live immediately."
                .to_string();
            if !is_approved(context) {
                reply.push_str(
                    " Note: your recruiter account must be approved by an admin before you can post.",
                );
            }
            reply
        }
        Topic::PostJob => "Posting jobs is available to recruiter accounts. \
            If you're hiring, sign up as a recruiter and an admin will verify your account."
            .to_string(),
        Topic::JobSearch => {
            let mut reply = "You can browse all openings on the Jobs page and narrow them down \
                by location, job type and salary. Tip: ask me something like \"jobs in Pune\" \
                and I'll pull the latest listings for that city."
                .to_string();
            if !context.skills().is_empty() {
                reply.push_str(&format!(
                    " Roles that mention {} are a good match for your profile.",
                    context.skills().join(", ")
                ));
            }
            reply
        }
        Topic::Apply => "To apply, open a job's details page and click \"Apply Now\". \
            You can track every application from your profile, and I can summarize their status \
            if you ask about your application status."
            .to_string(),
        Topic::Resume => "A strong resume is one page, leads with measurable results, \
            and mirrors the keywords from the job's requirements. Keep your profile skills up to date \
            so recruiters can find you."
            .to_string(),
        Topic::Interview => "Before an interview, research the company, revisit the job requirements, \
            and prepare two or three short stories that show impact. Practice explaining your projects \
            out loud and have questions ready for the interviewer."
            .to_string(),
        Topic::Salary => "Salaries are listed on each job card. Compare similar roles in the same city \
            and experience level to judge an offer, and factor in growth and benefits, not just the number."
            .to_string(),
        Topic::Skills => {
            if context.skills().is_empty() {
                "Add your skills to your profile so I can suggest what to learn next. \
                    In-demand skills right now include SQL, cloud platforms, and a modern web framework."
                    .to_string()
            } else {
                format!(
                    "Your profile lists {}. Look at the requirements on jobs you like and pick the \
                        skills that come up most often that you don't have yet.",
                    context.skills().join(", ")
                )
            }
        }
        Topic::Greeting => format!(
            "Hello{first_name}! I'm the Job Portal assistant. Ask me about jobs in a city, \
                your application status, or tips for resumes and interviews."
        ),
        Topic::Thanks => "You're welcome! Good luck, and let me know if there's anything else.".to_string(),
        Topic::Help => help_reply(role),
        Topic::Unknown => format!("I'm not sure I understood that. {}", help_reply(role)),
    };

    Ok(reply)
}

fn is_approved(context: &ChatContext) -> bool {
    context
        .user
        .as_ref()
        .and_then(|u| VerificationStatus::parse(&u.verification_status))
        == Some(VerificationStatus::Approved)
}

fn verification_reply(context: &ChatContext, role: Role) -> String {
    if role != Role::Recruiter {
        return "Only recruiter accounts go through admin verification. \
            Job seekers can apply right away."
            .to_string();
    }
    let Some(user) = context.user.as_ref() else {
        return "I couldn't load your account details right now. Please try again shortly.".to_string();
    };
    match VerificationStatus::parse(&user.verification_status) {
        Some(VerificationStatus::Approved) => {
            "Your recruiter account is approved. You can post jobs right away.".to_string()
        }
        Some(VerificationStatus::Rejected) => match user.rejection_reason.as_deref() {
            Some(reason) if !reason.trim().is_empty() => format!(
                "Your recruiter account was not approved. Reason given by the admin: {reason}. \
                    Please update your details and contact support."
            ),
            _ => "Your recruiter account was not approved. Please contact support for details.".to_string(),
        },
        _ => "Your recruiter account is pending admin review. \
            You'll be able to post jobs as soon as it's approved."
            .to_string(),
    }
}

fn help_reply(role: Role) -> String {
    match role {
        Role::Recruiter => "I can help you post jobs, check your verification status, \
            and review applicants."
            .to_string(),
        Role::Admin => "I can explain how recruiter verification works and point you to \
            pending employer approvals."
            .to_string(),
        Role::Student => "I can find jobs in a city, summarize your application status, \
            and share resume and interview tips."
            .to_string(),
    }
}
