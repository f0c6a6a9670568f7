use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{AdminSession, JobSummary, RemovedUser, UserKind, UserSummary, ACTIVE};
use crate::config::AdminConfig;
use crate::store::RecordStore;
use crate::workflows::accounts::Credentials;
use crate::workflows::jobs::JobId;
use crate::workflows::{required_str, PortalError};

/// Moderation surface: user and job listings with hard deletes.
///
/// Credentials come from [`AdminConfig`]; with none configured every login fails.
pub struct AdminConsole<S> {
    store: Arc<S>,
    config: AdminConfig,
}

impl<S> AdminConsole<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>, config: AdminConfig) -> Self {
        Self { store, config }
    }

    pub fn login(&self, credentials: Credentials) -> Result<AdminSession, PortalError> {
        let denied = || PortalError::Unauthorized("Invalid admin credentials".to_string());

        let Some(configured) = self.config.credentials() else {
            warn!("admin login attempted while admin access is disabled");
            return Err(denied());
        };

        let email = credentials.email.unwrap_or_default();
        let password = credentials.password.unwrap_or_default();
        if password.is_empty()
            || email.trim() != configured.email
            || password != configured.password
        {
            return Err(denied());
        }

        info!("admin logged in");
        Ok(AdminSession {
            message: "Admin login successful",
            token: configured.token.clone(),
        })
    }

    /// Employers first, then seekers.
    pub fn users(&self) -> Result<Vec<UserSummary>, PortalError> {
        let employers = self.store.list_employers()?.into_iter().map(|employer| UserSummary {
            name: employer.company,
            email: employer.email,
            kind: UserKind::Employer,
            status: ACTIVE,
        });
        let seekers = self.store.list_seekers()?.into_iter().map(|seeker| UserSummary {
            name: seeker.name,
            email: seeker.email,
            kind: UserKind::JobSeeker,
            status: ACTIVE,
        });

        Ok(employers.chain(seekers).collect())
    }

    /// Removes every account registered under the email. Jobs, applications and
    /// interviews that reference it are kept.
    pub fn delete_user(&self, email: &str) -> Result<RemovedUser, PortalError> {
        let email = required_str(email, "Email required")?;
        let removed = RemovedUser {
            employer: self.store.delete_employer(email)?.is_some(),
            seeker: self.store.delete_seeker(email)?.is_some(),
        };

        if !removed.employer && !removed.seeker {
            return Err(PortalError::NotFound("User not found".to_string()));
        }

        info!(employer = removed.employer, seeker = removed.seeker, "user deleted by admin");
        Ok(removed)
    }

    pub fn jobs(&self) -> Result<Vec<JobSummary>, PortalError> {
        Ok(self
            .store
            .list_jobs()?
            .into_iter()
            .map(|job| JobSummary {
                id: job.id,
                title: job.title,
                company: job.company,
                status: ACTIVE,
            })
            .collect())
    }

    pub fn delete_job(&self, id: &str) -> Result<(), PortalError> {
        let id = JobId::from(required_str(id, "Job ID required")?);
        let removed = self
            .store
            .delete_job(&id)?
            .ok_or_else(|| PortalError::NotFound("Job not found".to_string()))?;
        info!(job_id = %removed.id, "job deleted by admin");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EmployerRepository, InMemoryRecordStore, JobRepository, SeekerRepository};
    use crate::workflows::accounts::{Employer, EmployerId, Seeker};
    use crate::workflows::jobs::JobPosting;
    use chrono::Utc;

    fn configured() -> AdminConfig {
        AdminConfig::from_parts(
            Some("root@portal.test".to_string()),
            Some("s3cret".to_string()),
            Some("tok-1".to_string()),
        )
        .expect("complete admin config")
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn seeded() -> (AdminConsole<InMemoryRecordStore>, Arc<InMemoryRecordStore>) {
        let store = Arc::new(InMemoryRecordStore::default());
        store
            .insert_employer(Employer {
                id: EmployerId("emp-test".to_string()),
                company: Some("Acme".to_string()),
                email: "both@x.com".to_string(),
                password: "pw".to_string(),
            })
            .expect("employer");
        store
            .insert_seeker(Seeker {
                name: Some("Alice".to_string()),
                email: "alice@x.com".to_string(),
                password: "pw".to_string(),
                age: None,
                location: None,
                linkedin: None,
                bio: None,
                resume: None,
            })
            .expect("seeker");
        (AdminConsole::new(store.clone(), configured()), store)
    }

    #[test]
    fn login_requires_configured_credentials() {
        let (console, _) = seeded();
        let session = console
            .login(credentials("root@portal.test", "s3cret"))
            .expect("admin login");
        assert_eq!(session.token.as_deref(), Some("tok-1"));

        assert!(matches!(
            console.login(credentials("root@portal.test", "wrong")),
            Err(PortalError::Unauthorized(_))
        ));

        let disabled = AdminConsole::new(
            Arc::new(InMemoryRecordStore::default()),
            AdminConfig::disabled(),
        );
        assert!(matches!(
            disabled.login(credentials("root@portal.test", "s3cret")),
            Err(PortalError::Unauthorized(_))
        ));
    }

    #[test]
    fn users_lists_employers_before_seekers() {
        let (console, _) = seeded();
        let users = console.users().expect("users");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].kind, UserKind::Employer);
        assert_eq!(users[0].name.as_deref(), Some("Acme"));
        assert_eq!(users[1].kind, UserKind::JobSeeker);
        assert!(users.iter().all(|user| user.status == ACTIVE));
    }

    #[test]
    fn delete_user_reports_unknown_email() {
        let (console, _) = seeded();
        let removed = console.delete_user("both@x.com").expect("deleted");
        assert!(removed.employer);
        assert!(!removed.seeker);

        assert!(matches!(
            console.delete_user("both@x.com"),
            Err(PortalError::NotFound(_))
        ));
    }

    #[test]
    fn job_listing_and_delete() {
        let (console, store) = seeded();
        let now = Utc::now();
        store
            .insert_job(JobPosting {
                id: JobId::from("job-admin"),
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                job_type: "Full-time".to_string(),
                salary: "100k".to_string(),
                description: "Build".to_string(),
                posted_by: "both@x.com".to_string(),
                posted_at: now,
                created_at: now,
                updated_at: now,
            })
            .expect("job");

        let jobs = console.jobs().expect("jobs");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].status, ACTIVE);

        console.delete_job("job-admin").expect("deleted");
        assert!(matches!(
            console.delete_job("job-admin"),
            Err(PortalError::NotFound(_))
        ));
    }
}
