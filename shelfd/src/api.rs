//! HTTP API for the Shelf daemon.
//!
//! Provides REST endpoints for:
//! - Health check
//! - List products (filters + pagination)
//! - Get, create, update and delete a product

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

use shelf_domain::{parse_number, Product, ProductId, REQUIRED_FIELDS};
use shelf_engine::{Catalog, EngineError, ProductQuery};
use shelf_store::{RecordStore, RequestLog};

use crate::error::DaemonError;
use crate::request_log::log_request;

// =============================================================================
// API State
// =============================================================================

/// Shared state for API handlers.
pub struct ApiState<S: RecordStore + 'static> {
    pub catalog: Arc<Catalog<S>>,
    pub request_log: RequestLog,
}

// =============================================================================
// Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Present on payload validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<&'static str>>,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

// =============================================================================
// Router
// =============================================================================

/// Create the API router.
///
/// Every request, including ones that match no route, passes through the
/// request log before reaching its handler.
pub fn create_router<S>(state: Arc<ApiState<S>>) -> Router
where
    S: RecordStore + 'static,
{
    let request_log = state.request_log.clone();

    Router::new()
        .route("/health", get(health_handler))
        .route("/products", get(list_handler::<S>).post(create_handler::<S>))
        .route(
            "/products/:id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .fallback(fallback_handler)
        .with_state(state)
        .layer(middleware::from_fn_with_state(request_log, log_request))
        .layer(TraceLayer::new_for_http())
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List products.
async fn list_handler<S>(
    State(state): State<Arc<ApiState<S>>>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>>
where
    S: RecordStore + 'static,
{
    let Query(query) = query.map_err(|e| to_error_response(DaemonError::InvalidQuery(e.body_text())))?;
    let products = state
        .catalog
        .list(&query)
        .await
        .map_err(|e| to_error_response(e.into()))?;

    Ok(Json(products))
}

/// Get a single product.
async fn get_handler<S>(
    State(state): State<Arc<ApiState<S>>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>>
where
    S: RecordStore + 'static,
{
    let id = parse_product_id(&id).map_err(to_error_response)?;
    let product = state
        .catalog
        .get(id)
        .await
        .map_err(|e| to_error_response(e.into()))?;

    Ok(Json(product))
}

/// Create a product.
async fn create_handler<S>(
    State(state): State<Arc<ApiState<S>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)>
where
    S: RecordStore + 'static,
{
    let Json(payload) = payload.map_err(|e| to_error_response(DaemonError::InvalidBody(e.body_text())))?;

    let product = state
        .catalog
        .create(&payload)
        .await
        .map_err(|e| to_error_response(e.into()))?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product wholesale.
async fn update_handler<S>(
    State(state): State<Arc<ApiState<S>>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Product>>
where
    S: RecordStore + 'static,
{
    let Json(payload) = payload.map_err(|e| to_error_response(DaemonError::InvalidBody(e.body_text())))?;
    let id = parse_product_id(&id).map_err(to_error_response)?;

    let product = state
        .catalog
        .update(id, &payload)
        .await
        .map_err(|e| to_error_response(e.into()))?;

    Ok(Json(product))
}

/// Delete a product.
async fn delete_handler<S>(
    State(state): State<Arc<ApiState<S>>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode>
where
    S: RecordStore + 'static,
{
    let id = parse_product_id(&id).map_err(to_error_response)?;
    state
        .catalog
        .delete(id)
        .await
        .map_err(|e| to_error_response(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Unknown route.
async fn fallback_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Route not found".to_string(),
            required: None,
        }),
    )
}

// =============================================================================
// Helpers
// =============================================================================

/// Interpret a path segment as a product id.
///
/// Numeric text with an integral value (`"5"`, `" 5 "`, `"5.0"`) names that
/// id; anything else cannot match a product.
fn parse_product_id(raw: &str) -> Result<ProductId, DaemonError> {
    let value = parse_number(raw);
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as ProductId)
    } else {
        Err(DaemonError::ProductNotFound(raw.to_string()))
    }
}

fn to_error_response(error: DaemonError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message, required) = match error {
        DaemonError::Engine(EngineError::InvalidProduct(e)) => (
            StatusCode::BAD_REQUEST,
            e.to_string(),
            Some(REQUIRED_FIELDS.to_vec()),
        ),
        DaemonError::InvalidBody(msg) => (
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", msg),
            Some(REQUIRED_FIELDS.to_vec()),
        ),
        DaemonError::Engine(
            e @ (EngineError::ValidationFailed(_)
            | EngineError::EmptyFilterValue { .. }
            | EngineError::NoResultsAboveMin { .. }),
        ) => (StatusCode::BAD_REQUEST, e.to_string(), None),
        DaemonError::Engine(e @ EngineError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, e.to_string(), None)
        }
        e @ DaemonError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, e.to_string(), None),
        e @ DaemonError::ProductNotFound(_) => (StatusCode::NOT_FOUND, e.to_string(), None),
        other => {
            // Storage details stay in the operator log
            error!(error = %other, "Request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                None,
            )
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: message,
            required,
        }),
    )
}

// =============================================================================
// Tests
// =============================================================================
