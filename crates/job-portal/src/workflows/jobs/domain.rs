use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An employer-authored listing. `posted_by` is a weak reference to the employer's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub salary: String,
    pub description: String,
    pub posted_by: String,
    pub posted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobPosting {
    /// Overwrite the fields present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: JobUpdate, now: DateTime<Utc>) {
        let JobUpdate {
            title,
            company,
            location,
            job_type,
            salary,
            description,
        } = update;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(company) = company {
            self.company = company;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(job_type) = job_type {
            self.job_type = job_type;
        }
        if let Some(salary) = salary {
            self.salary = salary;
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.updated_at = now;
    }
}

/// Payload for creating a posting. Every field is optional on the wire so that
/// missing values surface as validation errors instead of decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewJobPosting {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub posted_by: Option<String>,
}

/// Partial update for a posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub salary: Option<String>,
    pub description: Option<String>,
}

/// Employer dashboard row: the posting plus how many live applications it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithApplications {
    #[serde(flatten)]
    pub job: JobPosting,
    pub applications_count: usize,
}
