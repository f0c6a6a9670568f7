use crate::infra::{AppState, PortalServices};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use job_portal::store::RecordStore;
use job_portal::workflows::accounts::account_router;
use job_portal::workflows::admin::admin_router;
use job_portal::workflows::applications::application_router;
use job_portal::workflows::jobs::job_router;
use serde_json::json;

pub(crate) fn with_portal_routes<S>(services: PortalServices<S>) -> axum::Router
where
    S: RecordStore + 'static,
{
    let PortalServices {
        accounts,
        jobs,
        applications,
        admin,
    } = services;

    axum::Router::new()
        .merge(account_router(accounts))
        .merge(job_router(jobs))
        .merge(application_router(applications))
        .merge(admin_router(admin))
        .route("/", axum::routing::get(banner))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn banner() -> &'static str {
    "API is running..."
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use job_portal::config::AdminConfig;
    use job_portal::store::InMemoryRecordStore;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<AtomicBool>) {
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let services = PortalServices::new(
            Arc::new(InMemoryRecordStore::default()),
            AdminConfig::disabled(),
        );
        (with_portal_routes(services).layer(Extension(state)), readiness)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn readiness_follows_flag() {
        let (router, readiness) = app(false);
        let response = router
            .clone()
            .oneshot(get("/ready"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        readiness.store(true, Ordering::Release);
        let response = router.oneshot(get("/ready")).await.expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn portal_routes_are_mounted() {
        let (router, _) = app(true);
        for uri in ["/", "/health", "/metrics", "/api/jobs", "/api/admin/users"] {
            let response = router
                .clone()
                .oneshot(get(uri))
                .await
                .expect("route executes");
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn admin_login_is_refused_without_configured_credentials() {
        let (router, _) = app(true);
        let response = router
            .oneshot(
                Request::post("/api/admin/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"email":"admin@portal.test","password":"admin"}"#,
                    ))
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
