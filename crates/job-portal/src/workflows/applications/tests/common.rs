use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::store::{
    ApplicationRepository, EmployerRepository, InMemoryRecordStore, InterviewRepository,
    JobRepository, RepositoryError, SeekerRepository,
};
use crate::workflows::accounts::{Employer, ResumeBlob, Seeker, SeekerUpdate};
use crate::workflows::applications::{
    application_router, Application, ApplicationStatus, ApplicationWorkflow, Interview,
    InterviewRequest,
};
use crate::workflows::jobs::{JobId, JobPosting, JobUpdate};

pub(super) const SEEKER: &str = "alice@x.com";
pub(super) const EMPLOYER: &str = "hr@acme.test";

pub(super) fn build_workflow() -> (
    ApplicationWorkflow<InMemoryRecordStore>,
    Arc<InMemoryRecordStore>,
) {
    let store = Arc::new(InMemoryRecordStore::default());
    (ApplicationWorkflow::new(store.clone()), store)
}

pub(super) fn job(id: &str, posted_by: &str) -> JobPosting {
    let now = Utc::now();
    JobPosting {
        id: JobId::from(id),
        title: format!("Role {id}"),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        job_type: "Full-time".to_string(),
        salary: "100k".to_string(),
        description: "Build things".to_string(),
        posted_by: posted_by.to_string(),
        posted_at: now,
        created_at: now,
        updated_at: now,
    }
}

pub(super) fn seed_job<S: JobRepository>(store: &S, id: &str) -> JobPosting {
    store.insert_job(job(id, EMPLOYER)).expect("job stored")
}

pub(super) fn seed_seeker<S: SeekerRepository>(store: &S, email: &str) -> Seeker {
    store
        .insert_seeker(Seeker {
            name: Some("Alice".to_string()),
            email: email.to_string(),
            password: "pw".to_string(),
            age: Some(29),
            location: Some("Porto".to_string()),
            linkedin: None,
            bio: None,
            resume: Some(ResumeBlob {
                data: b"%PDF".to_vec(),
                content_type: "application/pdf".to_string(),
                file_name: "cv.pdf".to_string(),
            }),
        })
        .expect("seeker stored")
}

pub(super) fn interview_request(job_id: &str, seeker_email: &str) -> InterviewRequest {
    InterviewRequest {
        job_id: Some(job_id.to_string()),
        seeker_email: Some(seeker_email.to_string()),
        interview_date: Some("2025-03-01".to_string()),
        interview_time: Some("10:00".to_string()),
        mode: Some("Online".to_string()),
        link: Some("https://meet.example/abc".to_string()),
        message: None,
    }
}

pub(super) fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialise body")))
        .expect("request")
}

pub(super) fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_store(store: Arc<InMemoryRecordStore>) -> axum::Router {
    application_router(Arc::new(ApplicationWorkflow::new(store)))
}

/// Which calls a [`FaultyStore`] refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Fault {
    /// Every call fails.
    Offline,
    /// Only application status updates fail.
    StatusUpdates,
}

/// In-memory store that fails selected calls with `Unavailable`.
#[derive(Debug, Clone)]
pub(super) struct FaultyStore {
    pub(super) inner: InMemoryRecordStore,
    fault: Fault,
}

impl FaultyStore {
    pub(super) fn new(fault: Fault) -> Self {
        Self {
            inner: InMemoryRecordStore::default(),
            fault,
        }
    }

    fn gate(&self) -> Result<(), RepositoryError> {
        match self.fault {
            Fault::Offline => Err(RepositoryError::Unavailable("database offline".to_string())),
            Fault::StatusUpdates => Ok(()),
        }
    }
}

impl SeekerRepository for FaultyStore {
    fn insert_seeker(&self, seeker: Seeker) -> Result<Seeker, RepositoryError> {
        self.gate()?;
        self.inner.insert_seeker(seeker)
    }

    fn find_seeker(&self, email: &str) -> Result<Option<Seeker>, RepositoryError> {
        self.gate()?;
        self.inner.find_seeker(email)
    }

    fn update_seeker(
        &self,
        email: &str,
        update: SeekerUpdate,
    ) -> Result<Option<Seeker>, RepositoryError> {
        self.gate()?;
        self.inner.update_seeker(email, update)
    }

    fn delete_seeker(&self, email: &str) -> Result<Option<Seeker>, RepositoryError> {
        self.gate()?;
        self.inner.delete_seeker(email)
    }

    fn list_seekers(&self) -> Result<Vec<Seeker>, RepositoryError> {
        self.gate()?;
        self.inner.list_seekers()
    }
}

impl EmployerRepository for FaultyStore {
    fn insert_employer(&self, employer: Employer) -> Result<Employer, RepositoryError> {
        self.gate()?;
        self.inner.insert_employer(employer)
    }

    fn find_employer(&self, email: &str) -> Result<Option<Employer>, RepositoryError> {
        self.gate()?;
        self.inner.find_employer(email)
    }

    fn delete_employer(&self, email: &str) -> Result<Option<Employer>, RepositoryError> {
        self.gate()?;
        self.inner.delete_employer(email)
    }

    fn list_employers(&self) -> Result<Vec<Employer>, RepositoryError> {
        self.gate()?;
        self.inner.list_employers()
    }
}

impl JobRepository for FaultyStore {
    fn insert_job(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        self.gate()?;
        self.inner.insert_job(job)
    }

    fn fetch_job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        self.gate()?;
        self.inner.fetch_job(id)
    }

    fn update_job(
        &self,
        id: &JobId,
        update: JobUpdate,
    ) -> Result<Option<JobPosting>, RepositoryError> {
        self.gate()?;
        self.inner.update_job(id, update)
    }

    fn delete_job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        self.gate()?;
        self.inner.delete_job(id)
    }

    fn list_jobs(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        self.gate()?;
        self.inner.list_jobs()
    }

    fn jobs_posted_by(&self, email: &str) -> Result<Vec<JobPosting>, RepositoryError> {
        self.gate()?;
        self.inner.jobs_posted_by(email)
    }
}

impl ApplicationRepository for FaultyStore {
    fn insert_application(
        &self,
        application: Application,
    ) -> Result<Application, RepositoryError> {
        self.gate()?;
        self.inner.insert_application(application)
    }

    fn find_application(
        &self,
        job_id: &JobId,
        seeker_email: &str,
    ) -> Result<Option<Application>, RepositoryError> {
        self.gate()?;
        self.inner.find_application(job_id, seeker_email)
    }

    fn update_application_status(
        &self,
        _job_id: &JobId,
        _seeker_email: &str,
        _status: ApplicationStatus,
    ) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("status writes offline".to_string()))
    }

    fn delete_application(
        &self,
        job_id: &JobId,
        seeker_email: &str,
    ) -> Result<Option<Application>, RepositoryError> {
        self.gate()?;
        self.inner.delete_application(job_id, seeker_email)
    }

    fn applications_for_seeker(
        &self,
        seeker_email: &str,
    ) -> Result<Vec<Application>, RepositoryError> {
        self.gate()?;
        self.inner.applications_for_seeker(seeker_email)
    }

    fn applications_for_job(&self, job_id: &JobId) -> Result<Vec<Application>, RepositoryError> {
        self.gate()?;
        self.inner.applications_for_job(job_id)
    }

    fn count_for_job(&self, job_id: &JobId) -> Result<usize, RepositoryError> {
        self.gate()?;
        self.inner.count_for_job(job_id)
    }

    fn count_with_status(
        &self,
        job_ids: &[JobId],
        status: &ApplicationStatus,
    ) -> Result<usize, RepositoryError> {
        self.gate()?;
        self.inner.count_with_status(job_ids, status)
    }
}

impl InterviewRepository for FaultyStore {
    fn insert_interview(&self, interview: Interview) -> Result<Interview, RepositoryError> {
        self.gate()?;
        self.inner.insert_interview(interview)
    }

    fn interviews_for_seeker(
        &self,
        seeker_email: &str,
    ) -> Result<Vec<Interview>, RepositoryError> {
        self.gate()?;
        self.inner.interviews_for_seeker(seeker_email)
    }

    fn interviews_for_job(&self, job_id: &JobId) -> Result<Vec<Interview>, RepositoryError> {
        self.gate()?;
        self.inner.interviews_for_job(job_id)
    }
}
