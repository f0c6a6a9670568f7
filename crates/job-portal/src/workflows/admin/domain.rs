use serde::Serialize;

use crate::workflows::jobs::JobId;

pub const ACTIVE: &str = "Active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UserKind {
    Employer,
    #[serde(rename = "Job Seeker")]
    JobSeeker,
}

/// Row of the admin user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub name: Option<String>,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: UserKind,
    pub status: &'static str,
}

/// Row of the admin job listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub status: &'static str,
}

/// Successful admin login. The token is echoed only when one is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSession {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// What a user deletion actually removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemovedUser {
    pub employer: bool,
    pub seeker: bool,
}
