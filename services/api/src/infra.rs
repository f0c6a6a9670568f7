use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use job_portal::config::AdminConfig;
use job_portal::store::RecordStore;
use job_portal::workflows::accounts::AccountService;
use job_portal::workflows::admin::AdminConsole;
use job_portal::workflows::applications::ApplicationWorkflow;
use job_portal::workflows::jobs::JobBoard;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Every portal service wired to one shared record store.
pub(crate) struct PortalServices<S> {
    pub(crate) accounts: Arc<AccountService<S>>,
    pub(crate) jobs: Arc<JobBoard<S>>,
    pub(crate) applications: Arc<ApplicationWorkflow<S>>,
    pub(crate) admin: Arc<AdminConsole<S>>,
}

impl<S> PortalServices<S>
where
    S: RecordStore + 'static,
{
    pub(crate) fn new(store: Arc<S>, admin: AdminConfig) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(store.clone())),
            jobs: Arc::new(JobBoard::new(store.clone())),
            applications: Arc::new(ApplicationWorkflow::new(store.clone())),
            admin: Arc::new(AdminConsole::new(store, admin)),
        }
    }
}
