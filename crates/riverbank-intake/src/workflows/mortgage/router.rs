use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::publisher::RecordPublisher;
use super::registry::SchemaRegistry;
use super::service::MortgageApplicationService;

pub const SUBMIT_PATH: &str = "/submit_application";

/// Router builder exposing the form submission endpoint.
pub fn application_router<R, P>(service: Arc<MortgageApplicationService<R, P>>) -> Router
where
    R: SchemaRegistry + 'static,
    P: RecordPublisher + 'static,
{
    Router::new()
        .route(SUBMIT_PATH, post(submit_handler::<R, P>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R, P>(
    State(service): State<Arc<MortgageApplicationService<R, P>>>,
    body: Bytes,
) -> Response
where
    R: SchemaRegistry + 'static,
    P: RecordPublisher + 'static,
{
    match service.submit(&body).await {
        Ok(_) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "Application submitted successfully" })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
