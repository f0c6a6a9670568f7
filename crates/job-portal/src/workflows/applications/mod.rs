//! Applied-job lifecycle: apply, status transitions, interview scheduling, and
//! the read models joining applications with jobs and seekers.

pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantView, Application, ApplicationId, ApplicationKey, ApplicationStatus, ApplyRequest,
    AppliedJobView, Interview, InterviewId, InterviewRequest, InterviewView, ScheduledInterview,
    StatusUpdateRequest,
};
pub use router::application_router;
pub use service::ApplicationWorkflow;
