pub mod accounts;
pub mod admin;
pub mod applications;
mod error;
pub mod jobs;

pub use error::PortalError;

use serde::Deserialize;

/// `?email=` query shared by the lookup routes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct EmailQuery {
    pub(crate) email: Option<String>,
}

/// Trimmed value of a required field, or an `InvalidInput` carrying `message`.
pub(crate) fn required(value: Option<String>, message: &str) -> Result<String, PortalError> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or_else(|| PortalError::InvalidInput(message.to_string()))
}

/// Like [`required`] for borrowed input such as path or query segments.
pub(crate) fn required_str<'a>(value: &'a str, message: &str) -> Result<&'a str, PortalError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(PortalError::InvalidInput(message.to_string()))
    } else {
        Ok(trimmed)
    }
}

/// Trimmed optional field; blank strings collapse to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
