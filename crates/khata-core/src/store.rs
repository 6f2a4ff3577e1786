//! The `StateStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `khata-store-sqlite`).
//! The HTTP layer (`khata-api`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use serde_json::Value;

use crate::{
  Collection, Record, Snapshot,
  sync::{SyncUser, Target, Territory, VehiclePerf},
};

/// Abstraction over the dashboard state store.
///
/// Single-row operations carry the database's native single-statement
/// atomicity. The three `sync_*` operations are all-or-nothing: every
/// statement runs inside one explicit transaction, and any failure rolls the
/// whole batch back.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait StateStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read every row of every known table, plus the derived `unlocks` map.
  ///
  /// No cross-table snapshot isolation is promised; this is a dashboard-style
  /// full-state read.
  fn snapshot(
    &self,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;

  /// Insert or update one row of `collection` from a loosely-typed record.
  ///
  /// A record with no `id`, a null `id`, or a `new_`-prefixed sentinel `id`
  /// is inserted and returned with the database-assigned `id` in place of
  /// the sentinel. Any other record updates the row with that `id`;
  /// zero-row updates succeed silently.
  fn upsert(
    &self,
    collection: Collection,
    record: Record,
  ) -> impl Future<Output = Result<Record, Self::Error>> + Send + '_;

  /// Delete the row of `collection` with `id`. Idempotent: deleting a
  /// nonexistent row succeeds.
  fn remove(
    &self,
    collection: Collection,
    id: Value,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Merge-upsert `territories` (by `id`) and then `targets` (by
  /// `(territory_id, month)`) in one transaction. Rows absent from the input
  /// are left untouched.
  fn sync_targets(
    &self,
    territories: Vec<Territory>,
    targets: Vec<Target>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace the officer subset of the users table with the officer entries
  /// of `users`, in one transaction. Non-officer rows and non-officer input
  /// entries are untouched.
  fn sync_users(
    &self,
    users: Vec<SyncUser>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace the entire vehicle-performance table with `records`, in one
  /// transaction.
  fn sync_vehicle_performance(
    &self,
    records: Vec<VehiclePerf>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Upsert one `admin_unlocks` row keyed on `territory_id`.
  /// `unlock_until` is an opaque epoch-milliseconds value.
  fn set_unlock(
    &self,
    territory_id: String,
    unlock_until: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
