use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::{
    ApplicationRepository, EmployerRepository, InterviewRepository, JobRepository,
    RepositoryError, SeekerRepository,
};
use crate::workflows::accounts::{Employer, Seeker, SeekerUpdate};
use crate::workflows::applications::{Application, ApplicationStatus, Interview};
use crate::workflows::jobs::{JobId, JobPosting, JobUpdate};

#[derive(Debug, Default)]
struct Collections {
    seekers: Vec<Seeker>,
    employers: Vec<Employer>,
    jobs: Vec<JobPosting>,
    applications: Vec<Application>,
    interviews: Vec<Interview>,
}

/// Process-local record store. Collections keep insertion order and every call
/// runs under one lock, so each repository operation is atomic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordStore {
    inner: Arc<Mutex<Collections>>,
}

impl InMemoryRecordStore {
    fn lock(&self) -> Result<MutexGuard<'_, Collections>, RepositoryError> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::Unavailable("record store lock poisoned".to_string()))
    }
}

fn take_where<T>(items: &mut Vec<T>, predicate: impl Fn(&T) -> bool) -> Option<T> {
    items
        .iter()
        .position(predicate)
        .map(|index| items.remove(index))
}

impl SeekerRepository for InMemoryRecordStore {
    fn insert_seeker(&self, seeker: Seeker) -> Result<Seeker, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.seekers.iter().any(|stored| stored.email == seeker.email) {
            return Err(RepositoryError::Conflict);
        }
        guard.seekers.push(seeker.clone());
        Ok(seeker)
    }

    fn find_seeker(&self, email: &str) -> Result<Option<Seeker>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .seekers
            .iter()
            .find(|seeker| seeker.email == email)
            .cloned())
    }

    fn update_seeker(
        &self,
        email: &str,
        update: SeekerUpdate,
    ) -> Result<Option<Seeker>, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(guard
            .seekers
            .iter_mut()
            .find(|seeker| seeker.email == email)
            .map(|seeker| {
                seeker.apply(update);
                seeker.clone()
            }))
    }

    fn delete_seeker(&self, email: &str) -> Result<Option<Seeker>, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(take_where(&mut guard.seekers, |seeker| seeker.email == email))
    }

    fn list_seekers(&self) -> Result<Vec<Seeker>, RepositoryError> {
        Ok(self.lock()?.seekers.clone())
    }
}

impl EmployerRepository for InMemoryRecordStore {
    fn insert_employer(&self, employer: Employer) -> Result<Employer, RepositoryError> {
        let mut guard = self.lock()?;
        if guard
            .employers
            .iter()
            .any(|stored| stored.email == employer.email)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.employers.push(employer.clone());
        Ok(employer)
    }

    fn find_employer(&self, email: &str) -> Result<Option<Employer>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .employers
            .iter()
            .find(|employer| employer.email == email)
            .cloned())
    }

    fn delete_employer(&self, email: &str) -> Result<Option<Employer>, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(take_where(&mut guard.employers, |employer| {
            employer.email == email
        }))
    }

    fn list_employers(&self) -> Result<Vec<Employer>, RepositoryError> {
        Ok(self.lock()?.employers.clone())
    }
}

impl JobRepository for InMemoryRecordStore {
    fn insert_job(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.jobs.iter().any(|stored| stored.id == job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.jobs.push(job.clone());
        Ok(job)
    }

    fn fetch_job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.jobs.iter().find(|job| &job.id == id).cloned())
    }

    fn update_job(
        &self,
        id: &JobId,
        update: JobUpdate,
    ) -> Result<Option<JobPosting>, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(guard.jobs.iter_mut().find(|job| &job.id == id).map(|job| {
            job.apply(update, Utc::now());
            job.clone()
        }))
    }

    fn delete_job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(take_where(&mut guard.jobs, |job| &job.id == id))
    }

    fn list_jobs(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        Ok(self.lock()?.jobs.clone())
    }

    fn jobs_posted_by(&self, email: &str) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .jobs
            .iter()
            .filter(|job| job.posted_by == email)
            .cloned()
            .collect())
    }
}

impl ApplicationRepository for InMemoryRecordStore {
    fn insert_application(
        &self,
        application: Application,
    ) -> Result<Application, RepositoryError> {
        let mut guard = self.lock()?;
        if guard
            .applications
            .iter()
            .any(|stored| stored.matches(&application.job_id, &application.seeker_email))
        {
            return Err(RepositoryError::Conflict);
        }
        guard.applications.push(application.clone());
        Ok(application)
    }

    fn find_application(
        &self,
        job_id: &JobId,
        seeker_email: &str,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .applications
            .iter()
            .find(|application| application.matches(job_id, seeker_email))
            .cloned())
    }

    fn update_application_status(
        &self,
        job_id: &JobId,
        seeker_email: &str,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(guard
            .applications
            .iter_mut()
            .find(|application| application.matches(job_id, seeker_email))
            .map(|application| {
                application.status = status;
                application.clone()
            }))
    }

    fn delete_application(
        &self,
        job_id: &JobId,
        seeker_email: &str,
    ) -> Result<Option<Application>, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(take_where(&mut guard.applications, |application| {
            application.matches(job_id, seeker_email)
        }))
    }

    fn applications_for_seeker(
        &self,
        seeker_email: &str,
    ) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .applications
            .iter()
            .filter(|application| application.seeker_email == seeker_email)
            .cloned()
            .collect())
    }

    fn applications_for_job(&self, job_id: &JobId) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .applications
            .iter()
            .filter(|application| &application.job_id == job_id)
            .cloned()
            .collect())
    }

    fn count_for_job(&self, job_id: &JobId) -> Result<usize, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .applications
            .iter()
            .filter(|application| &application.job_id == job_id)
            .count())
    }

    fn count_with_status(
        &self,
        job_ids: &[JobId],
        status: &ApplicationStatus,
    ) -> Result<usize, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .applications
            .iter()
            .filter(|application| {
                &application.status == status && job_ids.contains(&application.job_id)
            })
            .count())
    }
}

impl InterviewRepository for InMemoryRecordStore {
    fn insert_interview(&self, interview: Interview) -> Result<Interview, RepositoryError> {
        let mut guard = self.lock()?;
        guard.interviews.push(interview.clone());
        Ok(interview)
    }

    fn interviews_for_seeker(
        &self,
        seeker_email: &str,
    ) -> Result<Vec<Interview>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .interviews
            .iter()
            .filter(|interview| interview.seeker_email == seeker_email)
            .cloned()
            .collect())
    }

    fn interviews_for_job(&self, job_id: &JobId) -> Result<Vec<Interview>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .interviews
            .iter()
            .filter(|interview| &interview.job_id == job_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::applications::ApplicationId;

    fn application(job: &str, email: &str) -> Application {
        Application {
            id: ApplicationId(format!("app-{job}-{email}")),
            job_id: JobId::from(job),
            seeker_email: email.to_string(),
            applied_at: Utc::now(),
            status: ApplicationStatus::Applied,
        }
    }

    #[test]
    fn insert_application_rejects_duplicate_pairs() {
        let store = InMemoryRecordStore::default();
        store
            .insert_application(application("job-1", "alice@x.com"))
            .expect("first insert");

        let err = store
            .insert_application(application("job-1", "alice@x.com"))
            .expect_err("duplicate rejected");
        assert_eq!(err, RepositoryError::Conflict);

        store
            .insert_application(application("job-2", "alice@x.com"))
            .expect("same seeker, other job");
        assert_eq!(store.applications_for_seeker("alice@x.com").unwrap().len(), 2);
    }

    #[test]
    fn count_with_status_is_scoped_to_job_ids() {
        let store = InMemoryRecordStore::default();
        store
            .insert_application(application("job-1", "a@x.com"))
            .unwrap();
        store
            .insert_application(application("job-2", "b@x.com"))
            .unwrap();
        store
            .update_application_status(
                &JobId::from("job-1"),
                "a@x.com",
                ApplicationStatus::InterviewScheduled,
            )
            .unwrap();
        store
            .update_application_status(
                &JobId::from("job-2"),
                "b@x.com",
                ApplicationStatus::InterviewScheduled,
            )
            .unwrap();

        let count = store
            .count_with_status(
                &[JobId::from("job-1")],
                &ApplicationStatus::InterviewScheduled,
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn delete_application_returns_removed_record() {
        let store = InMemoryRecordStore::default();
        store
            .insert_application(application("job-1", "alice@x.com"))
            .unwrap();

        let removed = store
            .delete_application(&JobId::from("job-1"), "alice@x.com")
            .unwrap();
        assert!(removed.is_some());
        assert!(store
            .find_application(&JobId::from("job-1"), "alice@x.com")
            .unwrap()
            .is_none());
        assert!(store
            .delete_application(&JobId::from("job-1"), "alice@x.com")
            .unwrap()
            .is_none());
    }

    #[test]
    fn clones_share_collections() {
        let store = InMemoryRecordStore::default();
        let handle = store.clone();
        handle
            .insert_application(application("job-1", "alice@x.com"))
            .unwrap();
        assert_eq!(store.count_for_job(&JobId::from("job-1")).unwrap(), 1);
    }
}
