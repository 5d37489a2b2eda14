//! Request logging middleware.
//!
//! Appends `<timestamp> <METHOD> <path+query>` to the request log before the
//! request reaches its handler. Write failures are reported to the operator
//! and otherwise ignored; they never change the response.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shelf_store::RequestLog;
use tracing::warn;

/// Middleware entry point, installed with `middleware::from_fn_with_state`.
pub async fn log_request(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    if let Err(e) = log.append(&method, &target).await {
        warn!(error = %e, %method, %target, "Failed to write request log");
    }

    next.run(request).await
}
