//! HTTP routes - thin dispatch onto the Dataset Accessor.
//!
//! Cross-origin requests are allowed from any origin; there is no
//! authentication. Each handler is stateless: parse, one accessor
//! call, serialize.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::accessor::{DatasetAccessor, UpdateOutcome};
use crate::error::Result;

/// Build the application router.
pub fn router(accessor: Arc<DatasetAccessor>) -> Router {
    Router::new()
        .route("/metadata", get(get_metadata))
        .route("/data/:index", get(get_data).put(put_data))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(accessor)
}

/// GET /metadata
async fn get_metadata(State(accessor): State<Arc<DatasetAccessor>>) -> Result<Json<Value>> {
    Ok(Json(accessor.get_metadata()?))
}

/// GET /data/:index
///
/// A missing record is an empty success (JSON null), not an error.
/// A non-integer index never reaches here; the `Path<i64>` extractor
/// rejects it with a client error.
async fn get_data(
    State(accessor): State<Arc<DatasetAccessor>>,
    Path(index): Path<i64>,
) -> Result<Json<Value>> {
    Ok(Json(accessor.find_by_index(index)?.unwrap_or(Value::Null)))
}

/// PUT /data/:index
async fn put_data(
    State(accessor): State<Arc<DatasetAccessor>>,
    Path(index): Path<i64>,
    Json(document): Json<Value>,
) -> Result<Json<UpdateOutcome>> {
    info!(index, payload = %document, "update request");
    Ok(Json(accessor.update_by_index(index, document)?))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "name": crate::NAME, "version": crate::VERSION }))
}
