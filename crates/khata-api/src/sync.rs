//! Handlers for the bulk synchronizers and admin unlocks.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `POST` | `/sync-targets` | `{"territories": […], "targets": […]}` |
//! | `POST` | `/sync-users` | `{"users": […]}` |
//! | `POST` | `/sync-vehicle-perf` | `{"data": […]}` |
//! | `POST` | `/unlock` | `{"territoryId": …, "unlockUntil": …}` |
//!
//! Each sync is all-or-nothing: the store applies the whole batch in one
//! transaction or none of it.

use std::sync::Arc;

use axum::{Json, extract::State};
use khata_core::{
  store::StateStore,
  sync::{SyncUser, Target, Territory, VehiclePerf},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;

fn success() -> Json<Value> { Json(json!({ "success": true })) }

// ─── Targets + territories ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SyncTargetsBody {
  #[serde(default)]
  pub territories: Vec<Territory>,
  #[serde(default)]
  pub targets:     Vec<Target>,
}

/// `POST /sync-targets` — merge-upsert territories, then targets.
pub async fn targets<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<SyncTargetsBody>,
) -> Result<Json<Value>, ApiError>
where
  S: StateStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .sync_targets(body.territories, body.targets)
    .await
    .map_err(ApiError::store)?;
  Ok(success())
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SyncUsersBody {
  #[serde(default)]
  pub users: Vec<SyncUser>,
}

/// `POST /sync-users` — full replace of the officer subset.
pub async fn users<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<SyncUsersBody>,
) -> Result<Json<Value>, ApiError>
where
  S: StateStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store.sync_users(body.users).await.map_err(ApiError::store)?;
  Ok(success())
}

// ─── Vehicle performance ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SyncVehiclePerfBody {
  #[serde(default)]
  pub data: Vec<VehiclePerf>,
}

/// `POST /sync-vehicle-perf` — unconditional full replace of the table.
pub async fn vehicle_perf<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<SyncVehiclePerfBody>,
) -> Result<Json<Value>, ApiError>
where
  S: StateStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .sync_vehicle_performance(body.data)
    .await
    .map_err(ApiError::store)?;
  Ok(success())
}

// ─── Unlock ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockBody {
  pub territory_id: String,
  pub unlock_until: i64,
}

/// `POST /unlock` — single-row upsert keyed on `territoryId`.
pub async fn unlock<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<UnlockBody>,
) -> Result<Json<Value>, ApiError>
where
  S: StateStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .set_unlock(body.territory_id, body.unlock_until)
    .await
    .map_err(ApiError::store)?;
  Ok(success())
}
