pub mod domain;
pub mod router;
pub mod service;

pub use domain::{JobId, JobPosting, JobUpdate, JobWithApplications, NewJobPosting};
pub use router::job_router;
pub use service::JobBoard;
