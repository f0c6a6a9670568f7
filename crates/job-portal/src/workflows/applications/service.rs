use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{
    ApplicantView, Application, ApplicationId, ApplicationStatus, AppliedJobView, Interview,
    InterviewId, InterviewRequest, InterviewView, ScheduledInterview,
};
use crate::store::{RecordStore, RepositoryError};
use crate::workflows::jobs::{JobId, JobPosting};
use crate::workflows::{optional, required, required_str, PortalError};

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static INTERVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

fn next_interview_id() -> InterviewId {
    let id = INTERVIEW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    InterviewId(format!("int-{id:06}"))
}

const ALREADY_APPLIED: &str = "Already applied";
const APPLICATION_NOT_FOUND: &str = "Application not found";

/// Lifecycle of applied-job records and the interviews attached to them.
///
/// Apply creates a record in `applied`; employer actions overwrite the status;
/// withdrawal deletes the record outright.
pub struct ApplicationWorkflow<S> {
    store: Arc<S>,
}

impl<S> ApplicationWorkflow<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create the application for a (job, seeker) pair, refusing duplicates.
    pub fn apply(&self, job_id: &str, seeker_email: &str) -> Result<Application, PortalError> {
        let job_id = JobId::from(required_str(job_id, "Missing jobId")?);
        let seeker_email = required_str(seeker_email, "Missing seeker email")?;

        if self
            .store
            .find_application(&job_id, seeker_email)?
            .is_some()
        {
            return Err(PortalError::Conflict(ALREADY_APPLIED.to_string()));
        }

        let application = Application {
            id: next_application_id(),
            job_id,
            seeker_email: seeker_email.to_string(),
            applied_at: Utc::now(),
            status: ApplicationStatus::Applied,
        };

        // A concurrent apply for the same pair can pass the check above; the
        // store refuses the second insert.
        let stored = self
            .store
            .insert_application(application)
            .map_err(|err| match err {
                RepositoryError::Conflict => PortalError::Conflict(ALREADY_APPLIED.to_string()),
                other => PortalError::Store(other),
            })?;

        info!(application_id = %stored.id, job_id = %stored.job_id, "application submitted");
        Ok(stored)
    }

    /// Hard-delete the application. Interviews for the pair are left in place.
    pub fn withdraw(&self, job_id: &str, seeker_email: &str) -> Result<Application, PortalError> {
        let job_id = JobId::from(required_str(job_id, "Missing jobId")?);
        let seeker_email = required_str(seeker_email, "Missing seeker email")?;

        let removed = self
            .store
            .delete_application(&job_id, seeker_email)?
            .ok_or_else(|| PortalError::NotFound(APPLICATION_NOT_FOUND.to_string()))?;

        match self.store.interviews_for_job(&job_id) {
            Ok(interviews) => {
                let retained = interviews
                    .iter()
                    .filter(|interview| interview.seeker_email == seeker_email)
                    .count();
                if retained > 0 {
                    info!(
                        application_id = %removed.id,
                        job_id = %job_id,
                        retained,
                        "application withdrawn; interviews for the pair are retained"
                    );
                } else {
                    info!(application_id = %removed.id, job_id = %job_id, "application withdrawn");
                }
            }
            Err(err) => warn!(
                application_id = %removed.id,
                error = %err,
                "application withdrawn; unable to check for retained interviews"
            ),
        }

        Ok(removed)
    }

    /// Overwrite the status with any non-empty label.
    pub fn set_status(
        &self,
        job_id: &str,
        seeker_email: &str,
        status: &str,
    ) -> Result<Application, PortalError> {
        let status = required_str(status, "Missing status")?;
        self.transition(job_id, seeker_email, ApplicationStatus::from(status))
    }

    pub fn reject(&self, job_id: &str, seeker_email: &str) -> Result<Application, PortalError> {
        self.transition(job_id, seeker_email, ApplicationStatus::Rejected)
    }

    fn transition(
        &self,
        job_id: &str,
        seeker_email: &str,
        status: ApplicationStatus,
    ) -> Result<Application, PortalError> {
        let job_id = JobId::from(required_str(job_id, "Missing jobId")?);
        let seeker_email = required_str(seeker_email, "Missing seeker email")?;

        if !status.is_known() {
            warn!(status = %status, job_id = %job_id, "storing unrecognised application status");
        }

        let updated = self
            .store
            .update_application_status(&job_id, seeker_email, status)?
            .ok_or_else(|| PortalError::NotFound(APPLICATION_NOT_FOUND.to_string()))?;

        info!(
            application_id = %updated.id,
            status = %updated.status,
            "application status updated"
        );
        Ok(updated)
    }

    /// Record an interview, then move the matching application to
    /// `interview scheduled` on a best-effort basis.
    pub fn schedule_interview(
        &self,
        request: InterviewRequest,
    ) -> Result<ScheduledInterview, PortalError> {
        const MISSING: &str = "Missing required interview fields";

        let InterviewRequest {
            job_id,
            seeker_email,
            interview_date,
            interview_time,
            mode,
            link,
            message,
        } = request;

        let job_id = JobId(required(job_id, MISSING)?);
        let seeker_email = required(seeker_email, MISSING)?;
        let date = required(interview_date, MISSING)?;
        let time = required(interview_time, MISSING)?;
        let mode = required(mode, MISSING)?;

        let now = Utc::now();
        let interview = self.store.insert_interview(Interview {
            id: next_interview_id(),
            job_id,
            seeker_email,
            date,
            time,
            mode,
            link: optional(link),
            message: optional(message),
            created_at: now,
            updated_at: now,
        })?;

        let application_updated = match self.store.update_application_status(
            &interview.job_id,
            &interview.seeker_email,
            ApplicationStatus::InterviewScheduled,
        ) {
            Ok(Some(_)) => true,
            Ok(None) => {
                warn!(
                    interview_id = %interview.id,
                    job_id = %interview.job_id,
                    "interview scheduled without a matching application"
                );
                false
            }
            Err(err) => {
                warn!(
                    interview_id = %interview.id,
                    job_id = %interview.job_id,
                    error = %err,
                    "interview scheduled but application status update failed"
                );
                false
            }
        };

        info!(interview_id = %interview.id, job_id = %interview.job_id, "interview scheduled");
        Ok(ScheduledInterview {
            interview,
            application_updated,
        })
    }

    /// Seeker read model. Applications whose job was deleted are dropped.
    pub fn applications_for_seeker(
        &self,
        seeker_email: &str,
    ) -> Result<Vec<AppliedJobView>, PortalError> {
        let seeker_email = required_str(seeker_email, "Email required")?;
        let applications = self.store.applications_for_seeker(seeker_email)?;
        let interviews = self.store.interviews_for_seeker(seeker_email)?;

        let mut views = Vec::with_capacity(applications.len());
        for application in applications {
            let Some(job) = self.store.fetch_job(&application.job_id)? else {
                debug!(application_id = %application.id, "skipping application for deleted job");
                continue;
            };

            // Interviews kept from a withdrawn application predate the current one.
            let interview_details = interviews
                .iter()
                .filter(|interview| {
                    interview.job_id == application.job_id
                        && interview.created_at >= application.applied_at
                })
                .max_by_key(|interview| interview.created_at)
                .cloned();

            views.push(AppliedJobView {
                job,
                status: application.status,
                applied_at: application.applied_at,
                interview_details,
            });
        }

        Ok(views)
    }

    /// Employer read model. Applications whose seeker no longer exists are dropped.
    pub fn applicants_for_job(&self, job_id: &str) -> Result<Vec<ApplicantView>, PortalError> {
        let job_id = JobId::from(required_str(job_id, "Missing jobId")?);
        let applications = self.store.applications_for_job(&job_id)?;

        let mut views = Vec::with_capacity(applications.len());
        for application in applications {
            let Some(seeker) = self.store.find_seeker(&application.seeker_email)? else {
                debug!(application_id = %application.id, "skipping application for removed seeker");
                continue;
            };

            views.push(ApplicantView {
                name: seeker.name,
                email: seeker.email,
                age: seeker.age,
                location: seeker.location,
                linkedin: seeker.linkedin,
                bio: seeker.bio,
                resume: seeker.resume,
                applied_at: application.applied_at,
                status: application.status,
            });
        }

        Ok(views)
    }

    /// Applications in `interview scheduled` across every job the employer posted.
    pub fn interview_count_for_employer(&self, employer_email: &str) -> Result<usize, PortalError> {
        let employer_email = required_str(employer_email, "Email required")?;
        let job_ids: Vec<JobId> = self
            .store
            .jobs_posted_by(employer_email)?
            .into_iter()
            .map(|job| job.id)
            .collect();

        if job_ids.is_empty() {
            return Ok(0);
        }

        let count = self
            .store
            .count_with_status(&job_ids, &ApplicationStatus::InterviewScheduled)?;
        Ok(count)
    }

    pub fn interviews_for_seeker(
        &self,
        seeker_email: &str,
    ) -> Result<Vec<InterviewView>, PortalError> {
        let seeker_email = required_str(seeker_email, "Email required")?;
        let interviews = self.store.interviews_for_seeker(seeker_email)?;
        self.populate(interviews)
    }

    pub fn interviews_for_job(&self, job_id: &str) -> Result<Vec<InterviewView>, PortalError> {
        let job_id = JobId::from(required_str(job_id, "Job ID required")?);
        let interviews = self.store.interviews_for_job(&job_id)?;
        self.populate(interviews)
    }

    fn populate(&self, interviews: Vec<Interview>) -> Result<Vec<InterviewView>, PortalError> {
        let mut jobs: BTreeMap<JobId, Option<JobPosting>> = BTreeMap::new();
        let mut views = Vec::with_capacity(interviews.len());

        for interview in interviews {
            let job = match jobs.get(&interview.job_id) {
                Some(cached) => cached.clone(),
                None => {
                    let fetched = self.store.fetch_job(&interview.job_id)?;
                    jobs.insert(interview.job_id.clone(), fetched.clone());
                    fetched
                }
            };
            views.push(InterviewView { interview, job });
        }

        Ok(views)
    }
}
