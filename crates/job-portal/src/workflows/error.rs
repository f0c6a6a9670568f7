use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::store::RepositoryError;

/// Error raised by the portal services.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

impl PortalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PortalError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            PortalError::NotFound(_) | PortalError::Store(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            PortalError::Conflict(_) | PortalError::Store(RepositoryError::Conflict) => {
                StatusCode::CONFLICT
            }
            PortalError::Store(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "record store failure");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
