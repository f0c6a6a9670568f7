use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::domain::{AdminSession, JobSummary, UserSummary};
use super::service::AdminConsole;
use crate::store::RecordStore;
use crate::workflows::accounts::Credentials;
use crate::workflows::PortalError;

type Console<S> = State<Arc<AdminConsole<S>>>;

/// Router exposing the admin moderation endpoints.
pub fn admin_router<S>(console: Arc<AdminConsole<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route("/api/admin/login", post(login_handler::<S>))
        .route("/api/admin/users", get(users_handler::<S>))
        .route("/api/admin/users/:email", delete(delete_user_handler::<S>))
        .route("/api/admin/jobs", get(jobs_handler::<S>))
        .route("/api/admin/jobs/:id", delete(delete_job_handler::<S>))
        .with_state(console)
}

pub(crate) async fn login_handler<S>(
    State(console): Console<S>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AdminSession>, PortalError>
where
    S: RecordStore + 'static,
{
    Ok(Json(console.login(credentials)?))
}

pub(crate) async fn users_handler<S>(
    State(console): Console<S>,
) -> Result<Json<Vec<UserSummary>>, PortalError>
where
    S: RecordStore + 'static,
{
    Ok(Json(console.users()?))
}

pub(crate) async fn delete_user_handler<S>(
    State(console): Console<S>,
    Path(email): Path<String>,
) -> Result<Json<Value>, PortalError>
where
    S: RecordStore + 'static,
{
    console.delete_user(&email)?;
    Ok(Json(json!({ "message": "User deleted" })))
}

pub(crate) async fn jobs_handler<S>(
    State(console): Console<S>,
) -> Result<Json<Vec<JobSummary>>, PortalError>
where
    S: RecordStore + 'static,
{
    Ok(Json(console.jobs()?))
}

pub(crate) async fn delete_job_handler<S>(
    State(console): Console<S>,
    Path(id): Path<String>,
) -> Result<Json<Value>, PortalError>
where
    S: RecordStore + 'static,
{
    console.delete_job(&id)?;
    Ok(Json(json!({ "message": "Job deleted" })))
}
