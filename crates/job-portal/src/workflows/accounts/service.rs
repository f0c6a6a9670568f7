use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use super::domain::{
    Credentials, Employer, EmployerId, EmployerProfile, EmployerRegistration, ResumeBlob, Seeker,
    SeekerRegistration, SeekerUpdate,
};
use crate::store::{RecordStore, RepositoryError};
use crate::workflows::{optional, required, required_str, PortalError};

static EMPLOYER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_employer_id() -> EmployerId {
    let id = EMPLOYER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EmployerId(format!("emp-{id:06}"))
}

const EMAIL_TAKEN: &str = "Email already used";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

fn email_taken(err: RepositoryError) -> PortalError {
    match err {
        RepositoryError::Conflict => PortalError::InvalidInput(EMAIL_TAKEN.to_string()),
        other => PortalError::Store(other),
    }
}

/// Seeker and employer registration, login, and profile upkeep.
///
/// Passwords are compared as stored; there is no hashing or session issuance.
pub struct AccountService<S> {
    store: Arc<S>,
}

impl<S> AccountService<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn register_seeker(
        &self,
        registration: SeekerRegistration,
        resume: Option<ResumeBlob>,
    ) -> Result<Seeker, PortalError> {
        let email = required(registration.email, "Email is required")?;
        let password = required(registration.password, "Password is required")?;
        if self.store.find_seeker(&email)?.is_some() {
            return Err(PortalError::InvalidInput(EMAIL_TAKEN.to_string()));
        }
        let resume =
            resume.ok_or_else(|| PortalError::InvalidInput("Resume is required".to_string()))?;

        let seeker = Seeker {
            name: optional(registration.name),
            email,
            password,
            age: registration.age,
            location: optional(registration.location),
            linkedin: optional(registration.linkedin),
            bio: optional(registration.bio),
            resume: Some(resume),
        };

        let stored = self.store.insert_seeker(seeker).map_err(email_taken)?;
        info!("seeker registered");
        Ok(stored)
    }

    pub fn seeker_login(&self, credentials: Credentials) -> Result<Seeker, PortalError> {
        let email = optional(credentials.email).unwrap_or_default();
        let password = credentials.password.unwrap_or_default();

        match self.store.find_seeker(&email)? {
            Some(seeker) if !password.is_empty() && seeker.password == password => Ok(seeker),
            _ => Err(PortalError::Unauthorized(INVALID_CREDENTIALS.to_string())),
        }
    }

    pub fn seeker_profile(&self, email: &str) -> Result<Seeker, PortalError> {
        let email = required_str(email, "Email is required")?;
        self.store
            .find_seeker(email)?
            .ok_or_else(|| PortalError::NotFound("User not found".to_string()))
    }

    pub fn update_seeker(&self, email: &str, update: SeekerUpdate) -> Result<Seeker, PortalError> {
        let email = required_str(email, "Email is required")?;
        let update = SeekerUpdate {
            name: optional(update.name),
            location: optional(update.location),
            linkedin: optional(update.linkedin),
            bio: optional(update.bio),
            ..update
        };

        let updated = self
            .store
            .update_seeker(email, update)?
            .ok_or_else(|| PortalError::NotFound("User not found".to_string()))?;
        info!("seeker profile updated");
        Ok(updated)
    }

    pub fn seeker_resume(&self, email: &str) -> Result<ResumeBlob, PortalError> {
        self.seeker_profile(email)?
            .resume
            .ok_or_else(|| PortalError::NotFound("Resume not found".to_string()))
    }

    pub fn register_employer(
        &self,
        registration: EmployerRegistration,
    ) -> Result<Employer, PortalError> {
        let email = required(registration.email, "Email is required")?;
        let password = required(registration.password, "Password is required")?;
        if self.store.find_employer(&email)?.is_some() {
            return Err(PortalError::InvalidInput(EMAIL_TAKEN.to_string()));
        }

        let employer = Employer {
            id: next_employer_id(),
            company: optional(registration.company),
            email,
            password,
        };

        let stored = self.store.insert_employer(employer).map_err(email_taken)?;
        info!(employer_id = %stored.id, "employer registered");
        Ok(stored)
    }

    pub fn employer_login(&self, credentials: Credentials) -> Result<Employer, PortalError> {
        let email = optional(credentials.email).unwrap_or_default();
        let password = credentials.password.unwrap_or_default();

        match self.store.find_employer(&email)? {
            Some(employer) if !password.is_empty() && employer.password == password => {
                Ok(employer)
            }
            _ => Err(PortalError::Unauthorized(INVALID_CREDENTIALS.to_string())),
        }
    }

    pub fn employer_profile(&self, email: &str) -> Result<EmployerProfile, PortalError> {
        let email = required_str(email, "Email required")?;
        self.store
            .find_employer(email)?
            .map(|employer| employer.profile())
            .ok_or_else(|| PortalError::NotFound("Not found".to_string()))
    }
}
