//! Storage abstraction over the portal's document collections.
//!
//! Each collection gets its own repository trait so services can be exercised
//! against narrow doubles; [`RecordStore`] bundles them for the common case.

mod memory;

pub use memory::InMemoryRecordStore;

use crate::workflows::accounts::{Employer, Seeker, SeekerUpdate};
use crate::workflows::applications::{Application, ApplicationStatus, Interview};
use crate::workflows::jobs::{JobId, JobPosting, JobUpdate};

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

pub trait SeekerRepository: Send + Sync {
    /// Fails with [`RepositoryError::Conflict`] when the email is taken.
    fn insert_seeker(&self, seeker: Seeker) -> Result<Seeker, RepositoryError>;
    fn find_seeker(&self, email: &str) -> Result<Option<Seeker>, RepositoryError>;
    fn update_seeker(
        &self,
        email: &str,
        update: SeekerUpdate,
    ) -> Result<Option<Seeker>, RepositoryError>;
    fn delete_seeker(&self, email: &str) -> Result<Option<Seeker>, RepositoryError>;
    fn list_seekers(&self) -> Result<Vec<Seeker>, RepositoryError>;
}

pub trait EmployerRepository: Send + Sync {
    /// Fails with [`RepositoryError::Conflict`] when the email is taken.
    fn insert_employer(&self, employer: Employer) -> Result<Employer, RepositoryError>;
    fn find_employer(&self, email: &str) -> Result<Option<Employer>, RepositoryError>;
    fn delete_employer(&self, email: &str) -> Result<Option<Employer>, RepositoryError>;
    fn list_employers(&self) -> Result<Vec<Employer>, RepositoryError>;
}

pub trait JobRepository: Send + Sync {
    fn insert_job(&self, job: JobPosting) -> Result<JobPosting, RepositoryError>;
    fn fetch_job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    fn update_job(
        &self,
        id: &JobId,
        update: JobUpdate,
    ) -> Result<Option<JobPosting>, RepositoryError>;
    fn delete_job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    fn list_jobs(&self) -> Result<Vec<JobPosting>, RepositoryError>;
    fn jobs_posted_by(&self, email: &str) -> Result<Vec<JobPosting>, RepositoryError>;
}

pub trait ApplicationRepository: Send + Sync {
    /// Fails with [`RepositoryError::Conflict`] when the (job, seeker) pair already has
    /// a live application. The check and the insert happen atomically.
    fn insert_application(&self, application: Application)
        -> Result<Application, RepositoryError>;
    fn find_application(
        &self,
        job_id: &JobId,
        seeker_email: &str,
    ) -> Result<Option<Application>, RepositoryError>;
    fn update_application_status(
        &self,
        job_id: &JobId,
        seeker_email: &str,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, RepositoryError>;
    fn delete_application(
        &self,
        job_id: &JobId,
        seeker_email: &str,
    ) -> Result<Option<Application>, RepositoryError>;
    fn applications_for_seeker(
        &self,
        seeker_email: &str,
    ) -> Result<Vec<Application>, RepositoryError>;
    fn applications_for_job(&self, job_id: &JobId) -> Result<Vec<Application>, RepositoryError>;
    fn count_for_job(&self, job_id: &JobId) -> Result<usize, RepositoryError>;
    fn count_with_status(
        &self,
        job_ids: &[JobId],
        status: &ApplicationStatus,
    ) -> Result<usize, RepositoryError>;
}

pub trait InterviewRepository: Send + Sync {
    fn insert_interview(&self, interview: Interview) -> Result<Interview, RepositoryError>;
    fn interviews_for_seeker(&self, seeker_email: &str)
        -> Result<Vec<Interview>, RepositoryError>;
    fn interviews_for_job(&self, job_id: &JobId) -> Result<Vec<Interview>, RepositoryError>;
}

/// Every collection the portal needs, behind one bound.
pub trait RecordStore:
    SeekerRepository + EmployerRepository + JobRepository + ApplicationRepository + InterviewRepository
{
}

impl<T> RecordStore for T where
    T: SeekerRepository
        + EmployerRepository
        + JobRepository
        + ApplicationRepository
        + InterviewRepository
{
}
