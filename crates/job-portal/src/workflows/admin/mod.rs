//! Admin moderation: config-backed login, user and job listings, hard deletes.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{AdminSession, JobSummary, RemovedUser, UserKind, UserSummary};
pub use router::admin_router;
pub use service::AdminConsole;
