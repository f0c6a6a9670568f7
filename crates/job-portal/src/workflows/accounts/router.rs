use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::domain::{
    Credentials, EmployerProfile, EmployerRegistration, ResumeBlob, Seeker, SeekerRegistration,
    SeekerUpdate,
};
use super::service::AccountService;
use crate::store::RecordStore;
use crate::workflows::{required, EmailQuery, PortalError};

type Accounts<S> = State<Arc<AccountService<S>>>;

const RESUME_FIELD: &str = "resume";

/// Router exposing seeker and employer account endpoints.
pub fn account_router<S>(service: Arc<AccountService<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route(
            "/api/seeker/register",
            post(register_seeker_handler::<S>).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/seeker/login", post(seeker_login_handler::<S>))
        .route(
            "/api/seeker/profile",
            get(seeker_profile_handler::<S>)
                .put(update_seeker_handler::<S>)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/api/seeker/resume", get(seeker_resume_handler::<S>))
        .route(
            "/api/employer/register",
            post(register_employer_handler::<S>),
        )
        .route("/api/employer/login", post(employer_login_handler::<S>))
        .route(
            "/api/employer/profile",
            get(employer_profile_handler::<S>),
        )
        .with_state(service)
}

/// Text fields and the optional resume part of a seeker form.
#[derive(Debug, Default)]
pub(crate) struct SeekerForm {
    fields: HashMap<String, String>,
    resume: Option<ResumeBlob>,
}

impl SeekerForm {
    pub(crate) async fn read(mut multipart: Multipart) -> Result<Self, PortalError> {
        let mut form = SeekerForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| PortalError::InvalidInput(format!("malformed form data: {err}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == RESUME_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let declared = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|err| PortalError::InvalidInput(format!("unreadable resume: {err}")))?;

                // Browsers submit an empty part when no file was picked.
                if data.is_empty() && file_name.is_empty() {
                    continue;
                }

                let content_type = declared.unwrap_or_else(|| {
                    mime_guess::from_path(&file_name)
                        .first_or_octet_stream()
                        .to_string()
                });
                form.resume = Some(ResumeBlob {
                    data: data.to_vec(),
                    content_type,
                    file_name,
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|err| PortalError::InvalidInput(format!("unreadable field {name}: {err}")))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    fn take(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }

    fn take_age(&mut self) -> Result<Option<u32>, PortalError> {
        match self.take("age").map(|raw| raw.trim().to_string()) {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => raw
                .parse::<u32>()
                .map(Some)
                .map_err(|_| PortalError::InvalidInput("Age must be a whole number".to_string())),
        }
    }

    pub(crate) fn into_registration(
        mut self,
    ) -> Result<(SeekerRegistration, Option<ResumeBlob>), PortalError> {
        let registration = SeekerRegistration {
            age: self.take_age()?,
            name: self.take("name"),
            email: self.take("email"),
            password: self.take("password"),
            location: self.take("location"),
            linkedin: self.take("linkedin"),
            bio: self.take("bio"),
        };
        Ok((registration, self.resume))
    }

    pub(crate) fn into_update(mut self) -> Result<(Option<String>, SeekerUpdate), PortalError> {
        let email = self.take("email");
        let update = SeekerUpdate {
            age: self.take_age()?,
            name: self.take("name"),
            location: self.take("location"),
            linkedin: self.take("linkedin"),
            bio: self.take("bio"),
            resume: self.resume.take(),
        };
        Ok((email, update))
    }
}

pub(crate) async fn register_seeker_handler<S>(
    State(service): Accounts<S>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), PortalError>
where
    S: RecordStore + 'static,
{
    let (registration, resume) = SeekerForm::read(multipart).await?.into_registration()?;
    service.register_seeker(registration, resume)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registered successfully" })),
    ))
}

pub(crate) async fn seeker_login_handler<S>(
    State(service): Accounts<S>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Value>, PortalError>
where
    S: RecordStore + 'static,
{
    service.seeker_login(credentials)?;
    Ok(Json(json!({ "message": "Login successful" })))
}

pub(crate) async fn seeker_profile_handler<S>(
    State(service): Accounts<S>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Seeker>, PortalError>
where
    S: RecordStore + 'static,
{
    let email = required(query.email, "Email is required")?;
    Ok(Json(service.seeker_profile(&email)?))
}

pub(crate) async fn update_seeker_handler<S>(
    State(service): Accounts<S>,
    multipart: Multipart,
) -> Result<Json<Value>, PortalError>
where
    S: RecordStore + 'static,
{
    let (email, update) = SeekerForm::read(multipart).await?.into_update()?;
    let email = required(email, "Email is required")?;
    let seeker = service.update_seeker(&email, update)?;
    Ok(Json(json!({ "message": "Profile updated", "seeker": seeker })))
}

pub(crate) async fn seeker_resume_handler<S>(
    State(service): Accounts<S>,
    Query(query): Query<EmailQuery>,
) -> Result<Response, PortalError>
where
    S: RecordStore + 'static,
{
    let email = required(query.email, "Email is required")?;
    let resume = service.seeker_resume(&email)?;

    let content_type = resume
        .content_type
        .parse::<mime::Mime>()
        .unwrap_or(mime::APPLICATION_OCTET_STREAM);
    let content_type = HeaderValue::from_str(content_type.as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = attachment_disposition(&resume.file_name);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        resume.data,
    )
        .into_response())
}

/// Quotes, backslashes and control characters are dropped from the name.
fn attachment_disposition(file_name: &str) -> HeaderValue {
    let safe: String = file_name
        .chars()
        .filter(|ch| !matches!(ch, '"' | '\\') && !ch.is_control())
        .collect();
    if safe.is_empty() {
        return HeaderValue::from_static("attachment");
    }
    HeaderValue::from_str(&format!("attachment; filename=\"{safe}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

pub(crate) async fn register_employer_handler<S>(
    State(service): Accounts<S>,
    Json(registration): Json<EmployerRegistration>,
) -> Result<(StatusCode, Json<Value>), PortalError>
where
    S: RecordStore + 'static,
{
    let employer = service.register_employer(registration)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registered successfully", "employer": employer.view() })),
    ))
}

pub(crate) async fn employer_login_handler<S>(
    State(service): Accounts<S>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Value>, PortalError>
where
    S: RecordStore + 'static,
{
    let employer = service.employer_login(credentials)?;
    Ok(Json(
        json!({ "message": "Login successful", "employer": employer.view() }),
    ))
}

pub(crate) async fn employer_profile_handler<S>(
    State(service): Accounts<S>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<EmployerProfile>, PortalError>
where
    S: RecordStore + 'static,
{
    let email = required(query.email, "Email required")?;
    Ok(Json(service.employer_profile(&email)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_strips_quotes_from_file_names() {
        let header = attachment_disposition("cv\"; filename=\"evil.exe");
        assert_eq!(
            header.to_str().unwrap(),
            "attachment; filename=\"cv; filename=evil.exe\""
        );
    }

    #[test]
    fn disposition_without_usable_name_is_bare_attachment() {
        assert_eq!(attachment_disposition("\"\"").to_str().unwrap(), "attachment");
        assert_eq!(
            attachment_disposition("résumé.pdf").to_str().unwrap(),
            "attachment"
        );
    }
}
