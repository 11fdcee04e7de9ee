use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::protocol::ApiResponse;
use crate::store::error::StoreError;
use crate::store::persisted::{PersistedStore, Record};

pub async fn handle_list_items(
    Extension(store): Extension<Arc<PersistedStore>>,
) -> (StatusCode, Json<ApiResponse>) {
    let items = store.list_all();
    let data = Value::Array(items.into_iter().map(Value::Object).collect());
    (StatusCode::OK, Json(ApiResponse::ok(data)))
}

pub async fn handle_create_item(
    Extension(store): Extension<Arc<PersistedStore>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<ApiResponse>) {
    let fields = match into_fields(body) {
        Ok(fields) => fields,
        Err(response) => return response,
    };

    match store.create(fields) {
        Ok(record) => (StatusCode::OK, Json(ApiResponse::ok(Value::Object(record)))),
        Err(err) => {
            tracing::error!("Create failed: {}", err);
            (status_for(&err), Json(ApiResponse::error(err.to_string())))
        }
    }
}

pub async fn handle_update_item(
    Extension(store): Extension<Arc<PersistedStore>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<ApiResponse>) {
    let fields = match into_fields(body) {
        Ok(fields) => fields,
        Err(response) => return response,
    };

    match store.merge_update(&id, fields) {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok(Value::Null))),
        Err(err) => {
            tracing::error!("Update of {} failed: {}", id, err);
            (status_for(&err), Json(ApiResponse::error(err.to_string())))
        }
    }
}

pub async fn handle_delete_item(
    Extension(store): Extension<Arc<PersistedStore>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    match store.delete(&id) {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok_empty())),
        Err(err) => {
            tracing::error!("Delete of {} failed: {}", id, err);
            (status_for(&err), Json(ApiResponse::error(err.to_string())))
        }
    }
}

/// Request bodies must be JSON objects; anything else is rejected before it
/// reaches the store.
fn into_fields(body: Value) -> Result<Record, (StatusCode, Json<ApiResponse>)> {
    match body {
        Value::Object(fields) => Ok(fields),
        other => {
            tracing::error!("Rejected non-object request body: {}", other);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("invalid json: expected an object")),
            ))
        }
    }
}

fn status_for(err: &StoreError) -> StatusCode {
    match err {
        StoreError::MissingFields => StatusCode::BAD_REQUEST,
        StoreError::NotFound => StatusCode::NOT_FOUND,
        StoreError::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
