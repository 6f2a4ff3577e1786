//! Whole-router tests: every endpoint driven over HTTP against an in-memory
//! SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use khata_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  api_router(Arc::new(store))
}

async fn send(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let request = match body {
    Some(v) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(v.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };

  let response = app.clone().oneshot(request).await.unwrap();
  let status = response.status();
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
  };
  (status, value)
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn db_read_of_fresh_store() {
  let app = app().await;
  let (status, body) = send(&app, "GET", "/db", None).await;

  assert_eq!(status, StatusCode::OK);
  for field in [
    "users",
    "territories",
    "targets",
    "projections",
    "collections",
    "offroad_vehicles",
    "settlements",
    "unlocks",
    "vehicle_performance",
  ] {
    assert!(body.get(field).is_some(), "missing field {field}");
  }
  assert_eq!(body["unlocks"], json!({}));
  assert_eq!(body["territories"], json!([]));
}

// ─── Update / delete ─────────────────────────────────────────────────────────

#[tokio::test]
async fn update_inserts_and_assigns_a_real_id() {
  let app = app().await;

  let (status, saved) = send(
    &app,
    "POST",
    "/update",
    Some(json!({
      "collection": "territories",
      "item": { "id": "new_1", "name": "Bogura", "part": "A", "officer": "X" }
    })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(saved["name"], json!("Bogura"));
  assert_eq!(saved["part"], json!("A"));
  assert_eq!(saved["officer"], json!("X"));
  assert_ne!(saved["id"], json!("new_1"));
  assert!(!saved["id"].is_null());

  let (_, db) = send(&app, "GET", "/db", None).await;
  let rows = db["territories"].as_array().unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0]["name"], json!("Bogura"));
}

#[tokio::test]
async fn update_existing_row_by_id() {
  let app = app().await;

  let (_, saved) = send(
    &app,
    "POST",
    "/update",
    Some(json!({
      "collection": "settlements",
      "item": { "customer_name": "C", "amount": 100.0 }
    })),
  )
  .await;

  let (status, echoed) = send(
    &app,
    "POST",
    "/update",
    Some(json!({
      "collection": "settlements",
      "item": { "id": saved["id"], "customer_name": "C2" }
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(echoed["customer_name"], json!("C2"));

  let (_, db) = send(&app, "GET", "/db", None).await;
  let rows = db["settlements"].as_array().unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0]["customer_name"], json!("C2"));
  // Untouched columns survive the partial update.
  assert_eq!(rows[0]["amount"], json!(100.0));
}

#[tokio::test]
async fn update_with_unknown_collection_is_rejected() {
  let app = app().await;

  let (status, body) = send(
    &app,
    "POST",
    "/update",
    Some(json!({ "collection": "pg_shadow", "item": { "x": 1 } })),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("unknown collection"));
}

#[tokio::test]
async fn update_with_unknown_column_is_rejected() {
  let app = app().await;

  let (status, body) = send(
    &app,
    "POST",
    "/update",
    Some(json!({
      "collection": "territories",
      "item": { "name": "x", "drop table": "y" }
    })),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("unknown column"));
}

#[tokio::test]
async fn delete_removes_a_row_and_is_idempotent() {
  let app = app().await;

  let (_, saved) = send(
    &app,
    "POST",
    "/update",
    Some(json!({
      "collection": "settlements",
      "item": { "customer_name": "C" }
    })),
  )
  .await;

  let body = json!({ "collection": "settlements", "id": saved["id"] });
  let (status, res) = send(&app, "DELETE", "/delete", Some(body.clone())).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(res, json!({ "success": true }));

  // Deleting again still succeeds.
  let (status, _) = send(&app, "DELETE", "/delete", Some(body)).await;
  assert_eq!(status, StatusCode::OK);

  let (_, db) = send(&app, "GET", "/db", None).await;
  assert_eq!(db["settlements"], json!([]));
}

// ─── Bulk sync ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn sync_targets_end_to_end() {
  let app = app().await;

  let (status, res) = send(
    &app,
    "POST",
    "/sync-targets",
    Some(json!({
      "territories": [
        { "id": "bogura", "name": "Bogura", "part": "A", "officer": "X" }
      ],
      "targets": [
        { "territory_id": "bogura", "month": "2024-01", "files": 10, "amount": 500.0 }
      ]
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(res, json!({ "success": true }));

  let (_, db) = send(&app, "GET", "/db", None).await;
  assert_eq!(db["territories"].as_array().unwrap().len(), 1);
  let targets = db["targets"].as_array().unwrap();
  assert_eq!(targets.len(), 1);
  assert_eq!(targets[0]["files"], json!(10));
}

#[tokio::test]
async fn sync_users_end_to_end() {
  let app = app().await;

  let (status, _) = send(
    &app,
    "POST",
    "/sync-users",
    Some(json!({
      "users": [
        { "username": "bog1", "officerName": "X", "role": "officer",
          "password": "pw", "territoryId": "bogura" },
        { "username": "hq", "officerName": null, "role": "admin",
          "password": "pw", "territoryId": null }
      ]
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (_, db) = send(&app, "GET", "/db", None).await;
  let users = db["users"].as_array().unwrap();
  // The admin entry is skipped; only the officer lands.
  assert_eq!(users.len(), 1);
  assert_eq!(users[0]["username"], json!("bog1"));
  assert_eq!(users[0]["officer_name"], json!("X"));
}

#[tokio::test]
async fn sync_vehicle_perf_end_to_end() {
  let app = app().await;

  for batch in [
    json!([{ "customerId": "c1", "earning": 10.0 }, { "customerId": "c2" }]),
    json!([{ "customerId": "c3", "overdueNo": 2 }]),
  ] {
    let (status, _) =
      send(&app, "POST", "/sync-vehicle-perf", Some(json!({ "data": batch }))).await;
    assert_eq!(status, StatusCode::OK);
  }

  let (_, db) = send(&app, "GET", "/db", None).await;
  let rows = db["vehicle_performance"].as_array().unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0]["customer_id"], json!("c3"));
  assert_eq!(rows[0]["overdue_no"], json!(2));
}

// ─── Unlocks ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unlock_twice_keeps_the_latest_value() {
  let app = app().await;

  for until in [1_000, 2_000] {
    let (status, _) = send(
      &app,
      "POST",
      "/unlock",
      Some(json!({ "territoryId": "bogura", "unlockUntil": until })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
  }

  let (_, db) = send(&app, "GET", "/db", None).await;
  assert_eq!(db["unlocks"], json!({ "bogura": 2_000 }));
}

// ─── Error surface ───────────────────────────────────────────────────────────

#[tokio::test]
async fn unmatched_path_is_not_found() {
  let app = app().await;
  let (status, _) = send(&app, "GET", "/nope", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
  let app = app().await;

  let request = Request::builder()
    .method("POST")
    .uri("/update")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let response = app.clone().oneshot(request).await.unwrap();
  assert!(response.status().is_client_error());
}
