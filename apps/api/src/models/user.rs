use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account kinds. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Recruiter,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Role::Student),
            "recruiter" => Some(Role::Recruiter),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Recruiter => "recruiter",
            Role::Admin => "admin",
        }
    }
}

/// Admin review state of a recruiter account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(VerificationStatus::Pending),
            "approved" => Some(VerificationStatus::Approved),
            "rejected" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

/// Full account row. There is no credential column; sessions live upstream.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub verification_status: String,
    pub is_verified: bool,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn verification(&self) -> Option<VerificationStatus> {
        VerificationStatus::parse(&self.verification_status)
    }
}

/// Projection of a user used to personalize chat replies.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct UserProfileRow {
    pub fullname: String,
    pub role: String,
    pub skills: Vec<String>,
    pub verification_status: String,
    pub rejection_reason: Option<String>,
}

impl UserProfileRow {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("Recruiter"), Some(Role::Recruiter));
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_role_as_str_is_canonical_lowercase() {
        assert_eq!(Role::parse("ADMIN").map(Role::as_str), Some("admin"));
        assert_eq!(Role::Student.as_str(), "student");
    }

    #[test]
    fn test_verification_status_round_trips_through_str() {
        for status in [
            VerificationStatus::Pending,
            VerificationStatus::Approved,
            VerificationStatus::Rejected,
        ] {
            assert_eq!(VerificationStatus::parse(status.as_str()), Some(status));
        }
    }
}
