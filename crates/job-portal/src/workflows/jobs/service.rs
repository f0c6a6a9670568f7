use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{JobId, JobPosting, JobUpdate, JobWithApplications, NewJobPosting};
use crate::store::RecordStore;
use crate::workflows::{optional, required, required_str, PortalError};

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

const JOB_NOT_FOUND: &str = "Job not found";

/// Employer-facing job CRUD plus the per-employer dashboard listing.
pub struct JobBoard<S> {
    store: Arc<S>,
}

impl<S> JobBoard<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn post(&self, posting: NewJobPosting) -> Result<JobPosting, PortalError> {
        const MISSING: &str = "Missing required job fields";

        let posted_by = required(posting.posted_by, "Missing postedBy")?;
        let now = Utc::now();
        let job = JobPosting {
            id: next_job_id(),
            title: required(posting.title, MISSING)?,
            company: required(posting.company, MISSING)?,
            location: required(posting.location, MISSING)?,
            job_type: required(posting.job_type, MISSING)?,
            salary: required(posting.salary, MISSING)?,
            description: required(posting.description, MISSING)?,
            posted_by,
            posted_at: now,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert_job(job)?;
        info!(job_id = %stored.id, "job posted");
        Ok(stored)
    }

    pub fn list(&self) -> Result<Vec<JobPosting>, PortalError> {
        Ok(self.store.list_jobs()?)
    }

    pub fn get(&self, id: &str) -> Result<JobPosting, PortalError> {
        let id = JobId::from(required_str(id, "Job ID required")?);
        self.store
            .fetch_job(&id)?
            .ok_or_else(|| PortalError::NotFound("Not found".to_string()))
    }

    /// Blank values in the update are ignored rather than clearing the field.
    pub fn update(&self, id: &str, update: JobUpdate) -> Result<JobPosting, PortalError> {
        let id = JobId::from(required_str(id, "Job ID required")?);
        let update = JobUpdate {
            title: optional(update.title),
            company: optional(update.company),
            location: optional(update.location),
            job_type: optional(update.job_type),
            salary: optional(update.salary),
            description: optional(update.description),
        };

        let updated = self
            .store
            .update_job(&id, update)?
            .ok_or_else(|| PortalError::NotFound(JOB_NOT_FOUND.to_string()))?;
        info!(job_id = %updated.id, "job updated");
        Ok(updated)
    }

    /// Removes the posting only; applications and interviews referencing it
    /// stay in the store and drop out of the read models.
    pub fn delete(&self, id: &str) -> Result<JobPosting, PortalError> {
        let id = JobId::from(required_str(id, "Job ID required")?);
        let removed = self
            .store
            .delete_job(&id)?
            .ok_or_else(|| PortalError::NotFound(JOB_NOT_FOUND.to_string()))?;
        info!(job_id = %removed.id, "job deleted");
        Ok(removed)
    }

    /// Jobs posted by the employer, newest first, with live application counts.
    pub fn for_employer(&self, email: &str) -> Result<Vec<JobWithApplications>, PortalError> {
        let email = required_str(email, "Email required")?;
        let mut jobs = self.store.jobs_posted_by(email)?;
        jobs.sort_by_key(|job| Reverse((job.created_at, job.id.clone())));

        jobs.into_iter()
            .map(|job| {
                let applications_count = self.store.count_for_job(&job.id)?;
                Ok(JobWithApplications {
                    job,
                    applications_count,
                })
            })
            .collect()
    }
}
