//! Seeker and employer accounts: registration, login, profiles, and resume storage.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{
    Credentials, Employer, EmployerId, EmployerProfile, EmployerRegistration, EmployerView,
    ResumeBlob, Seeker, SeekerRegistration, SeekerUpdate,
};
pub use router::account_router;
pub use service::AccountService;
