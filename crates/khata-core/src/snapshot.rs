//! Snapshot — the aggregate full-state read model.
//!
//! One GET returns every row of every table. The `admin_unlocks` table is
//! not exposed as a row list: the snapshot reader folds it into a
//! `territory_id -> unlock_until` map (last row wins).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Collection, Record};

/// The entire database state, one field per collection plus `unlocks`.
///
/// Field order matches the wire contract of the dashboard client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
  pub users:               Vec<Record>,
  pub territories:         Vec<Record>,
  pub targets:             Vec<Record>,
  pub projections:         Vec<Record>,
  pub collections:         Vec<Record>,
  pub offroad_vehicles:    Vec<Record>,
  pub settlements:         Vec<Record>,
  pub unlocks:             Map<String, Value>,
  pub vehicle_performance: Vec<Record>,
}

impl Snapshot {
  /// The row list for `collection`, or `None` for
  /// [`Collection::AdminUnlocks`], which is presented via `unlocks` instead.
  pub fn rows_mut(&mut self, collection: Collection) -> Option<&mut Vec<Record>> {
    match collection {
      Collection::Users => Some(&mut self.users),
      Collection::Territories => Some(&mut self.territories),
      Collection::Targets => Some(&mut self.targets),
      Collection::Projections => Some(&mut self.projections),
      Collection::Collections => Some(&mut self.collections),
      Collection::OffroadVehicles => Some(&mut self.offroad_vehicles),
      Collection::Settlements => Some(&mut self.settlements),
      Collection::AdminUnlocks => None,
      Collection::VehiclePerformance => Some(&mut self.vehicle_performance),
    }
  }
}
