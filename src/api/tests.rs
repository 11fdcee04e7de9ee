//! API Module Tests
//!
//! Exercises the handlers against a real store on a temporary backing file
//! and checks the wire envelope shape.

#[cfg(test)]
mod tests {
    use crate::api::handlers::{
        handle_create_item, handle_delete_item, handle_list_items, handle_update_item,
    };
    use crate::api::protocol::ApiResponse;
    use crate::store::persisted::{PersistedStore, BACKEND_ID_FIELD};
    use axum::extract::{Extension, Path};
    use axum::http::StatusCode;
    use axum::Json;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, Arc<PersistedStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(PersistedStore::open(dir.path().join("db.json")));
        (dir, store)
    }

    // ============================================================
    // ENVELOPE SHAPE
    // ============================================================

    #[test]
    fn test_envelope_uses_is_ok_key() {
        let wire = serde_json::to_value(ApiResponse::ok(json!([]))).unwrap();
        assert_eq!(wire, json!({ "isOk": true, "data": [] }));
    }

    #[test]
    fn test_empty_envelope_omits_data_and_error() {
        let wire = serde_json::to_value(ApiResponse::ok_empty()).unwrap();
        assert_eq!(wire, json!({ "isOk": true }));
    }

    #[test]
    fn test_error_envelope_carries_message() {
        let wire = serde_json::to_value(ApiResponse::error("not found")).unwrap();
        assert_eq!(wire, json!({ "isOk": false, "error": "not found" }));
    }

    // ============================================================
    // HANDLERS
    // ============================================================

    #[tokio::test]
    async fn test_list_starts_empty() {
        let (_dir, store) = temp_store();

        let (status, Json(body)) = handle_list_items(Extension(store)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_ok);
        assert_eq!(body.data, Some(json!([])));
    }

    #[tokio::test]
    async fn test_create_returns_finalized_record() {
        let (_dir, store) = temp_store();

        let (status, Json(body)) = handle_create_item(
            Extension(store.clone()),
            Json(json!({ "item_id": "I1", "item_name": "Widget" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_ok);
        let record = body.data.unwrap();
        assert!(record.get(BACKEND_ID_FIELD).unwrap().is_string());
        assert!(record.get("timestamp").unwrap().is_u64());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_create_missing_fields_is_bad_request() {
        let (_dir, store) = temp_store();

        let (status, Json(body)) = handle_create_item(
            Extension(store.clone()),
            Json(json!({ "item_id": "I1" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.is_ok);
        assert_eq!(body.error.as_deref(), Some("missing fields"));
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_non_object_body() {
        let (_dir, store) = temp_store();

        let (status, Json(body)) =
            handle_create_item(Extension(store), Json(json!(["not", "an", "object"]))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.is_ok);
        assert!(body.error.unwrap().starts_with("invalid json"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (_dir, store) = temp_store();

        let (status, Json(body)) = handle_update_item(
            Extension(store),
            Path("b-0-0".to_string()),
            Json(json!({ "item_name": "Renamed" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.as_deref(), Some("not found"));
    }

    #[tokio::test]
    async fn test_update_merges_and_acknowledges_with_null_data() {
        let (_dir, store) = temp_store();
        let (_, Json(created)) = handle_create_item(
            Extension(store.clone()),
            Json(json!({ "item_id": "I1", "item_name": "Widget", "qty": 3 })),
        )
        .await;
        let id = created.data.unwrap()[BACKEND_ID_FIELD]
            .as_str()
            .unwrap()
            .to_string();

        let (status, Json(body)) = handle_update_item(
            Extension(store.clone()),
            Path(id),
            Json(json!({ "item_name": "Widget2" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_ok);
        assert_eq!(body.data, Some(Value::Null));

        let items = store.snapshot();
        assert_eq!(items[0].get("item_name"), Some(&Value::from("Widget2")));
        assert_eq!(items[0].get("qty"), Some(&Value::from(3)));
    }

    #[tokio::test]
    async fn test_delete_roundtrip() {
        let (_dir, store) = temp_store();
        let (_, Json(created)) = handle_create_item(
            Extension(store.clone()),
            Json(json!({ "item_id": "I1", "item_name": "Widget" })),
        )
        .await;
        let id = created.data.unwrap()[BACKEND_ID_FIELD]
            .as_str()
            .unwrap()
            .to_string();

        let (status, Json(body)) =
            handle_delete_item(Extension(store.clone()), Path(id.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_ok);
        assert!(body.data.is_none());

        let (status, Json(body)) = handle_delete_item(Extension(store), Path(id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.as_deref(), Some("not found"));
    }
}
