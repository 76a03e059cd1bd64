// Integration tests for the easylabel HTTP API.
//
// The router is driven directly with tower's `oneshot`; no socket is
// bound. Each test seeds its own store in a temp directory.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Map, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use easylabel_core::Database;
use easylabel_server::{router, DatasetAccessor};

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

/// Build an app over a fresh store seeded with `records` and, when
/// given, a metadata document. The TempDir guard keeps the store alive.
fn test_app(records: &[Value], metadata: Option<Value>) -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path()).unwrap();

    let data = db.collection("data").unwrap();
    for record in records {
        data.insert_one(fields(record.clone())).unwrap();
    }
    if let Some(metadata) = metadata {
        let coll = db.collection("metadata").unwrap();
        coll.insert_one(fields(metadata)).unwrap();
    }

    let accessor = Arc::new(DatasetAccessor::new(db, "data", "metadata"));
    (router(accessor), dir)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn put(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_get_metadata() {
    let (app, _dir) = test_app(&[], Some(json!({ "name": "animals", "count": 2 })));

    let response = app.oneshot(get("/metadata")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], json!("animals"));
    assert_eq!(body["count"], json!(2));
    // Store-native identifier comes back in extended JSON form
    assert!(body["_id"].get("$oid").is_some());
}

#[tokio::test]
async fn test_get_metadata_is_stable_across_calls() {
    let (app, _dir) = test_app(&[], Some(json!({ "name": "animals" })));

    let first = body_json(app.clone().oneshot(get("/metadata")).await.unwrap()).await;
    let second = body_json(app.oneshot(get("/metadata")).await.unwrap()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_metadata_when_none_configured() {
    let (app, _dir) = test_app(&[], None);

    let response = app.oneshot(get("/metadata")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_data_by_index() {
    let (app, _dir) = test_app(
        &[
            json!({ "index": 0, "label": "dog" }),
            json!({ "index": 5, "label": "bird" }),
        ],
        None,
    );

    let response = app.oneshot(get("/data/5")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["label"], json!("bird"));
    assert_eq!(body["index"], json!(5));
}

#[tokio::test]
async fn test_get_data_missing_index_is_null_with_200() {
    let (app, _dir) = test_app(&[json!({ "index": 0 })], None);

    let response = app.oneshot(get("/data/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, Value::Null);
}

#[tokio::test]
async fn test_get_data_non_integer_index_is_client_error() {
    let (app, _dir) = test_app(&[json!({ "index": 0 })], None);

    let response = app.oneshot(get("/data/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_then_get_reflects_update() {
    let (app, _dir) = test_app(&[json!({ "index": 5, "label": "dog" })], None);

    let response = app
        .clone()
        .oneshot(put("/data/5", json!({ "label": "cat" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let outcome = body_json(response).await;
    assert_eq!(outcome["matched_count"], json!(1));
    assert_eq!(outcome["modified_count"], json!(1));

    let body = body_json(app.oneshot(get("/data/5")).await.unwrap()).await;
    assert_eq!(body["label"], json!("cat"));
    // Merge keeps fields the payload did not name
    assert_eq!(body["index"], json!(5));
}

#[tokio::test]
async fn test_put_is_idempotent() {
    let (app, _dir) = test_app(&[json!({ "index": 5, "label": "dog" })], None);

    let first = body_json(
        app.clone()
            .oneshot(put("/data/5", json!({ "label": "cat" })))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app.oneshot(put("/data/5", json!({ "label": "cat" })))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first["modified_count"], json!(1));
    assert_eq!(second["matched_count"], json!(1));
    assert_eq!(second["modified_count"], json!(0));
}

#[tokio::test]
async fn test_put_unmatched_index_is_success_with_zero_counts() {
    let (app, _dir) = test_app(&[json!({ "index": 0 })], None);

    let response = app
        .oneshot(put("/data/999", json!({ "label": "cat" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let outcome = body_json(response).await;
    assert_eq!(outcome["matched_count"], json!(0));
    assert_eq!(outcome["modified_count"], json!(0));
}

#[tokio::test]
async fn test_put_non_object_payload_is_client_error() {
    let (app, _dir) = test_app(&[json!({ "index": 5 })], None);

    let response = app
        .oneshot(put("/data/5", json!(["not", "an", "object"])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (app, _dir) = test_app(&[json!({ "index": 0 })], None);

    let request = Request::builder()
        .uri("/data/0")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = test_app(&[], None);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], json!("easylabel-server"));
}
