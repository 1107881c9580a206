use crate::core::{ContactTransport, Forwarder};
use crate::domain::model::RelayResponse;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub downstream_configured: bool,
}

/// POST /api/contact
///
/// The body is taken raw so that malformed JSON becomes a relay
/// `Server error` instead of axum's own extractor rejection. A body that
/// cannot be read (too large, aborted) keeps the rejection's status but
/// still answers in the `{ok:false}` shape.
pub async fn contact<T: ContactTransport + 'static>(
    State(forwarder): State<Arc<Forwarder<T>>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!("Unreadable request body: {}", rejection.body_text());
            return (
                rejection.status(),
                Json(RelayResponse::failure("Server error")),
            )
                .into_response();
        }
    };

    let outcome = forwarder.handle(&body).await;
    (outcome.status_code(), Json(outcome.response())).into_response()
}

/// GET /health
pub async fn health<T: ContactTransport + 'static>(
    State(forwarder): State<Arc<Forwarder<T>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        downstream_configured: forwarder.is_configured(),
    })
}

/// Keeps the `{ok:false}` shape even if a handler panics.
pub fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(RelayResponse::failure("Server error")),
    )
        .into_response()
}
