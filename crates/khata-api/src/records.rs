//! Handlers for the generic record mutator.
//!
//! | Method   | Path | Body |
//! |----------|------|------|
//! | `POST`   | `/update` | `{"collection": name, "item": {…}}` |
//! | `DELETE` | `/delete` | `{"collection": name, "id": …}` |
//!
//! The collection name resolves through the closed registry and the item's
//! field names are checked against the column allow-list before the store is
//! touched, so a bad shape is a 400 and never reaches SQL.

use std::sync::Arc;

use axum::{Json, extract::State};
use khata_core::{Collection, Record, store::StateStore};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;

// ─── Update ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub collection: String,
  pub item:       Record,
}

/// `POST /update` — insert or update one row; echoes the item with the
/// database-assigned `id` when a row was created.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<Record>, ApiError>
where
  S: StateStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let collection = Collection::from_name(&body.collection)?;
  body.item.validate(collection)?;

  let saved = store
    .upsert(collection, body.item)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(saved))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
  pub collection: String,
  pub id:         Value,
}

/// `DELETE /delete` — idempotent delete by id.
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<DeleteBody>,
) -> Result<Json<Value>, ApiError>
where
  S: StateStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let collection = Collection::from_name(&body.collection)?;

  store
    .remove(collection, body.id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(json!({ "success": true })))
}
