use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::{
    ApplicantView, ApplicationKey, ApplyRequest, AppliedJobView, InterviewRequest, InterviewView,
    StatusUpdateRequest,
};
use super::service::ApplicationWorkflow;
use crate::store::RecordStore;
use crate::workflows::{required, EmailQuery, PortalError};

type Workflow<S> = State<Arc<ApplicationWorkflow<S>>>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct JobQuery {
    pub(crate) job_id: Option<String>,
}

/// Router exposing apply/withdraw/status/interview endpoints.
pub fn application_router<S>(workflow: Arc<ApplicationWorkflow<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route("/api/apply", post(apply_handler::<S>))
        .route(
            "/api/withdraw-application",
            delete(withdraw_handler::<S>),
        )
        .route("/api/applied-jobs", get(applied_jobs_handler::<S>))
        .route("/api/applicant/status", put(status_handler::<S>))
        .route(
            "/api/applicant",
            get(applicants_handler::<S>).delete(reject_handler::<S>),
        )
        .route(
            "/api/stats/interview-count",
            get(interview_count_handler::<S>),
        )
        .route(
            "/api/interviews",
            post(schedule_interview_handler::<S>).get(seeker_interviews_handler::<S>),
        )
        .route(
            "/api/interviews/job/:job_id",
            get(job_interviews_handler::<S>),
        )
        .with_state(workflow)
}

pub(crate) async fn apply_handler<S>(
    State(workflow): Workflow<S>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<Value>), PortalError>
where
    S: RecordStore + 'static,
{
    const MISSING: &str = "Missing jobId or userEmail";
    let job_id = required(request.job_id, MISSING)?;
    let user_email = required(request.user_email, MISSING)?;

    let application = workflow.apply(&job_id, &user_email)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Application successful", "newApp": application })),
    ))
}

pub(crate) async fn withdraw_handler<S>(
    State(workflow): Workflow<S>,
    Json(request): Json<ApplicationKey>,
) -> Result<Json<Value>, PortalError>
where
    S: RecordStore + 'static,
{
    const MISSING: &str = "Missing jobId or email";
    let job_id = required(request.job_id, MISSING)?;
    let email = required(request.email, MISSING)?;

    workflow.withdraw(&job_id, &email)?;
    Ok(Json(
        json!({ "message": "Application withdrawn and deleted from DB" }),
    ))
}

pub(crate) async fn applied_jobs_handler<S>(
    State(workflow): Workflow<S>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<AppliedJobView>>, PortalError>
where
    S: RecordStore + 'static,
{
    let email = required(query.email, "Email required")?;
    Ok(Json(workflow.applications_for_seeker(&email)?))
}

pub(crate) async fn status_handler<S>(
    State(workflow): Workflow<S>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Value>, PortalError>
where
    S: RecordStore + 'static,
{
    const MISSING: &str = "Missing jobId, email, or status";
    let job_id = required(request.job_id, MISSING)?;
    let email = required(request.email, MISSING)?;
    let status = required(request.status, MISSING)?;

    let application = workflow.set_status(&job_id, &email, &status)?;
    Ok(Json(
        json!({ "message": "Status updated", "application": application }),
    ))
}

pub(crate) async fn applicants_handler<S>(
    State(workflow): Workflow<S>,
    Query(query): Query<JobQuery>,
) -> Result<Json<Vec<ApplicantView>>, PortalError>
where
    S: RecordStore + 'static,
{
    let job_id = required(query.job_id, "Missing jobId")?;
    Ok(Json(workflow.applicants_for_job(&job_id)?))
}

pub(crate) async fn reject_handler<S>(
    State(workflow): Workflow<S>,
    Query(key): Query<ApplicationKey>,
) -> Result<Json<Value>, PortalError>
where
    S: RecordStore + 'static,
{
    const MISSING: &str = "Missing jobId or email";
    let job_id = required(key.job_id, MISSING)?;
    let email = required(key.email, MISSING)?;

    let application = workflow.reject(&job_id, &email)?;
    Ok(Json(
        json!({ "message": "Applicant rejected", "application": application }),
    ))
}

pub(crate) async fn interview_count_handler<S>(
    State(workflow): Workflow<S>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Value>, PortalError>
where
    S: RecordStore + 'static,
{
    let email = required(query.email, "Email required")?;
    let count = workflow.interview_count_for_employer(&email)?;
    Ok(Json(json!({ "count": count })))
}

pub(crate) async fn schedule_interview_handler<S>(
    State(workflow): Workflow<S>,
    Json(request): Json<InterviewRequest>,
) -> Result<(StatusCode, Json<Value>), PortalError>
where
    S: RecordStore + 'static,
{
    let scheduled = workflow.schedule_interview(request)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Interview scheduled",
            "interview": scheduled.interview,
            "applicationUpdated": scheduled.application_updated,
        })),
    ))
}

pub(crate) async fn seeker_interviews_handler<S>(
    State(workflow): Workflow<S>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<InterviewView>>, PortalError>
where
    S: RecordStore + 'static,
{
    let email = required(query.email, "Email required")?;
    Ok(Json(workflow.interviews_for_seeker(&email)?))
}

pub(crate) async fn job_interviews_handler<S>(
    State(workflow): Workflow<S>,
    Path(job_id): Path<String>,
) -> Result<Json<Vec<InterviewView>>, PortalError>
where
    S: RecordStore + 'static,
{
    Ok(Json(workflow.interviews_for_job(&job_id)?))
}
