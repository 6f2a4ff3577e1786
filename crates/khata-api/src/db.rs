//! Handler for the full-state read.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/db` | Entire database state, one field per collection |

use std::sync::Arc;

use axum::{Json, extract::State};
use khata_core::{Snapshot, store::StateStore};

use crate::error::ApiError;

/// `GET /db` — every row of every table plus the `unlocks` map.
pub async fn snapshot<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Snapshot>, ApiError>
where
  S: StateStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let snapshot = store.snapshot().await.map_err(ApiError::store)?;
  Ok(Json(snapshot))
}
