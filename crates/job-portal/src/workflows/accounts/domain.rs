use std::fmt;

use serde::{Deserialize, Serialize};

/// Uploaded resume kept exactly as received; contents are never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeBlob {
    pub data: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

/// Job seeker profile and credential record, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seeker {
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub bio: Option<String>,
    pub resume: Option<ResumeBlob>,
}

impl Seeker {
    pub fn apply(&mut self, update: SeekerUpdate) {
        let SeekerUpdate {
            name,
            age,
            location,
            linkedin,
            bio,
            resume,
        } = update;

        if name.is_some() {
            self.name = name;
        }
        if age.is_some() {
            self.age = age;
        }
        if location.is_some() {
            self.location = location;
        }
        if linkedin.is_some() {
            self.linkedin = linkedin;
        }
        if bio.is_some() {
            self.bio = bio;
        }
        if resume.is_some() {
            self.resume = resume;
        }
    }
}

/// Registration form fields as submitted alongside the resume upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeekerRegistration {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub bio: Option<String>,
}

/// Profile edit; absent fields keep their stored value and the resume is only
/// replaced when a new file is uploaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeekerUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub bio: Option<String>,
    pub resume: Option<ResumeBlob>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployerId(pub String);

impl fmt::Display for EmployerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employer {
    pub id: EmployerId,
    pub company: Option<String>,
    pub email: String,
    pub password: String,
}

impl Employer {
    pub fn view(&self) -> EmployerView {
        EmployerView {
            id: self.id.clone(),
            email: self.email.clone(),
            company: self.company.clone(),
        }
    }

    /// Public profile card; the display name is the local part of the email.
    pub fn profile(&self) -> EmployerProfile {
        let name = self
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        EmployerProfile {
            name,
            company: self.company.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployerView {
    pub id: EmployerId,
    pub email: String,
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployerProfile {
    pub name: String,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmployerRegistration {
    pub company: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}
