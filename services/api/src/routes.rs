use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Extension;
use axum::Json;
use riverbank_intake::workflows::mortgage::{
    application_router, MortgageApplicationService, RecordPublisher, SchemaRegistry,
};
use serde_json::json;
use std::sync::Arc;

const FORM_PAGE: &str = include_str!("../static/index.html");

pub(crate) fn with_application_routes<R, P>(
    service: Arc<MortgageApplicationService<R, P>>,
) -> axum::Router
where
    R: SchemaRegistry + 'static,
    P: RecordPublisher + 'static,
{
    application_router(service)
        .route("/", axum::routing::get(form_page))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn form_page() -> Html<&'static str> {
    Html(FORM_PAGE)
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
