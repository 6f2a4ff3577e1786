//! JSON REST API for Khata.
//!
//! Exposes an axum [`Router`] backed by any [`khata_core::store::StateStore`].
//! CORS, body limits, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", khata_api::api_router(store.clone()))
//! ```

pub mod db;
pub mod error;
pub mod records;
pub mod sync;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use khata_core::store::StateStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StateStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Full-state read
    .route("/db", get(db::snapshot::<S>))
    // Generic record mutator
    .route("/update", post(records::update::<S>))
    .route("/delete", delete(records::remove::<S>))
    // Bulk synchronizers
    .route("/sync-targets", post(sync::targets::<S>))
    .route("/sync-users", post(sync::users::<S>))
    .route("/sync-vehicle-perf", post(sync::vehicle_perf::<S>))
    // Admin unlocks
    .route("/unlock", post(sync::unlock::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;
