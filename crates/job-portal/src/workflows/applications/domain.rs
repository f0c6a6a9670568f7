use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::accounts::ResumeBlob;
use crate::workflows::jobs::{JobId, JobPosting};

/// Identifier wrapper for applied-job records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for interview records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterviewId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for InterviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of a live application.
///
/// The status update route accepts any label, so unknown values are kept in
/// `Other` rather than rejected. Withdrawal is a hard delete, not a status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Applied,
    InterviewScheduled,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    pub fn label(&self) -> &str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::InterviewScheduled => "interview scheduled",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ApplicationStatus::Other(_))
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "applied" => ApplicationStatus::Applied,
            "interview scheduled" => ApplicationStatus::InterviewScheduled,
            "rejected" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Other(value),
        }
    }
}

impl From<&str> for ApplicationStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ApplicationStatus> for String {
    fn from(value: ApplicationStatus) -> Self {
        match value {
            ApplicationStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A seeker's live claim on one job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub seeker_email: String,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

impl Application {
    pub fn matches(&self, job_id: &JobId, seeker_email: &str) -> bool {
        &self.job_id == job_id && self.seeker_email == seeker_email
    }
}

/// A scheduled meeting for one (job, seeker) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: InterviewId,
    pub job_id: JobId,
    pub seeker_email: String,
    #[serde(rename = "interviewDate")]
    pub date: String,
    #[serde(rename = "interviewTime")]
    pub time: String,
    pub mode: String,
    pub link: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplyRequest {
    pub job_id: Option<String>,
    #[serde(alias = "seekerEmail")]
    pub user_email: Option<String>,
}

/// Body shared by the withdraw and status routes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationKey {
    pub job_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusUpdateRequest {
    pub job_id: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewRequest {
    pub job_id: Option<String>,
    pub seeker_email: Option<String>,
    pub interview_date: Option<String>,
    pub interview_time: Option<String>,
    pub mode: Option<String>,
    pub link: Option<String>,
    pub message: Option<String>,
}

/// Result of scheduling: the interview always exists, the application update is best-effort.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledInterview {
    pub interview: Interview,
    pub application_updated: bool,
}

/// Seeker-facing read model: the job joined with the application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJobView {
    #[serde(flatten)]
    pub job: JobPosting,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub interview_details: Option<Interview>,
}

/// Employer-facing read model: the seeker profile joined with the application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantView {
    pub name: Option<String>,
    pub email: String,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub bio: Option<String>,
    pub resume: Option<ResumeBlob>,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

/// Interview with its job populated; `job` is null once the posting is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewView {
    #[serde(flatten)]
    pub interview: Interview,
    pub job: Option<JobPosting>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_round_trip_to_variants() {
        assert_eq!(
            ApplicationStatus::from("interview scheduled"),
            ApplicationStatus::InterviewScheduled
        );
        assert_eq!(ApplicationStatus::from("rejected"), ApplicationStatus::Rejected);
        assert_eq!(ApplicationStatus::Applied.label(), "applied");
    }

    #[test]
    fn unknown_labels_are_preserved() {
        let status = ApplicationStatus::from("offer extended");
        assert!(!status.is_known());
        assert_eq!(status.label(), "offer extended");

        let value = serde_json::to_value(&status).expect("serializes");
        assert_eq!(value, serde_json::json!("offer extended"));
    }

    #[test]
    fn status_deserializes_from_plain_string() {
        let status: ApplicationStatus =
            serde_json::from_str("\"interview scheduled\"").expect("decodes");
        assert_eq!(status, ApplicationStatus::InterviewScheduled);
    }

    #[test]
    fn interview_uses_wire_field_names() {
        let now = Utc::now();
        let interview = Interview {
            id: InterviewId("int-000001".to_string()),
            job_id: JobId::from("job-000001"),
            seeker_email: "alice@x.com".to_string(),
            date: "2024-05-01".to_string(),
            time: "10:00".to_string(),
            mode: "video".to_string(),
            link: None,
            message: None,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&interview).expect("serializes");
        assert_eq!(value["interviewDate"], "2024-05-01");
        assert_eq!(value["interviewTime"], "10:00");
        assert_eq!(value["seekerEmail"], "alice@x.com");
        assert_eq!(value["jobId"], "job-000001");
    }
}
