use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use super::domain::{JobPosting, JobUpdate, JobWithApplications, NewJobPosting};
use super::service::JobBoard;
use crate::store::RecordStore;
use crate::workflows::{required, EmailQuery, PortalError};

type Board<S> = State<Arc<JobBoard<S>>>;

/// Router exposing job posting CRUD.
pub fn job_router<S>(board: Arc<JobBoard<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route("/api/jobs", get(list_handler::<S>).post(create_handler::<S>))
        .route(
            "/api/jobs/employer-jobs",
            get(employer_jobs_handler::<S>),
        )
        .route(
            "/api/jobs/:id",
            get(fetch_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(board)
}

pub(crate) async fn create_handler<S>(
    State(board): Board<S>,
    Json(posting): Json<NewJobPosting>,
) -> Result<(StatusCode, Json<JobPosting>), PortalError>
where
    S: RecordStore + 'static,
{
    let job = board.post(posting)?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub(crate) async fn list_handler<S>(
    State(board): Board<S>,
) -> Result<Json<Vec<JobPosting>>, PortalError>
where
    S: RecordStore + 'static,
{
    Ok(Json(board.list()?))
}

pub(crate) async fn employer_jobs_handler<S>(
    State(board): Board<S>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<JobWithApplications>>, PortalError>
where
    S: RecordStore + 'static,
{
    let email = required(query.email, "Email required")?;
    Ok(Json(board.for_employer(&email)?))
}

pub(crate) async fn fetch_handler<S>(
    State(board): Board<S>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, PortalError>
where
    S: RecordStore + 'static,
{
    Ok(Json(board.get(&id)?))
}

pub(crate) async fn update_handler<S>(
    State(board): Board<S>,
    Path(id): Path<String>,
    Json(update): Json<JobUpdate>,
) -> Result<Json<JobPosting>, PortalError>
where
    S: RecordStore + 'static,
{
    Ok(Json(board.update(&id, update)?))
}

pub(crate) async fn delete_handler<S>(
    State(board): Board<S>,
    Path(id): Path<String>,
) -> Result<Json<Value>, PortalError>
where
    S: RecordStore + 'static,
{
    board.delete(&id)?;
    Ok(Json(json!({ "message": "Job deleted successfully" })))
}
