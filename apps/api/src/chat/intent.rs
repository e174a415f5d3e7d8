//! Routes a chat message to the application-status digest or general handling.

const APPLICATION_STATUS_PHRASES: &[&str] = &[
    "application status",
    "my application",
    "status of my application",
    "application update",
    "applied job",
    "application feedback",
    "did i get the job",
    "was i selected",
    "selection status",
];

pub fn is_application_status_query(message: &str) -> bool {
    let normalized = message.to_lowercase();
    let asks_why_rejected = normalized.contains("why") && normalized.contains("reject");
    APPLICATION_STATUS_PHRASES
        .iter()
        .any(|phrase| normalized.contains(phrase))
        || (normalized.contains("application") && normalized.contains("status"))
        || asks_why_rejected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_phrases_match() {
        assert!(is_application_status_query("What is my Application Status?"));
        assert!(is_application_status_query("did I get the job at Acme"));
        assert!(is_application_status_query("Selection status please"));
    }

    #[test]
    fn test_application_and_status_anywhere() {
        assert!(is_application_status_query(
            "status check on the application I sent"
        ));
    }

    #[test]
    fn test_why_rejected() {
        assert!(is_application_status_query("Why was I rejected?"));
        assert!(is_application_status_query("why did they reject me"));
    }

    #[test]
    fn test_general_questions_do_not_match() {
        assert!(!is_application_status_query("Show me jobs in Pune"));
        assert!(!is_application_status_query("How do I write an application letter?"));
        assert!(!is_application_status_query("what's the status quo in tech hiring"));
    }
}
