//! Typed payloads for the bulk synchronization protocol.
//!
//! Unlike the generic CRUD path, the three sync operations have fixed shapes:
//! the client ships whole sets of rows and the store applies them in one
//! transaction. Wire field names follow the dashboard client (camelCase where
//! it uses camelCase); column names in the store are snake_case.

use serde::{Deserialize, Serialize};

/// A sales territory. Identity is the client-chosen string `id` (derived from
/// the name), not a database-assigned key; sync upserts on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Territory {
  pub id:      String,
  pub name:    String,
  pub part:    Option<String>,
  pub officer: Option<String>,
}

/// Per-territory, per-month target and projection figures. Composite natural
/// key `(territory_id, month)`; sync upserts on that pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Target {
  pub territory_id:            String,
  pub month:                   String,
  pub files:                   Option<i64>,
  pub proj_files:              Option<i64>,
  pub amount:                  Option<f64>,
  pub proj_reg:                Option<f64>,
  pub proj_adv:                Option<f64>,
  pub lm_np_target_amount:     Option<f64>,
  pub lm_np_target_files:      Option<i64>,
  pub total_od:                Option<f64>,
  pub od_growth_sply:          Option<f64>,
  pub per_file_od:             Option<f64>,
  pub six_plus_od_files:       Option<i64>,
  pub six_plus_od_growth_splm: Option<f64>,
}

/// A user row as shipped by the user-sync endpoint. Only entries whose role
/// is `officer` are applied; the rest are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncUser {
  pub username:     String,
  pub officer_name: Option<String>,
  pub role:         String,
  pub password:     Option<String>,
  pub territory_id: Option<String>,
}

/// One vehicle/customer usage-and-earnings row. The table has no stable
/// natural key; sync replaces its entire contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePerf {
  pub customer_id:   Option<String>,
  pub customer_name: Option<String>,
  pub model:         Option<String>,
  pub km1:           Option<f64>,
  pub km2:           Option<f64>,
  pub earning:       Option<f64>,
  pub overdue_no:    Option<i64>,
  pub overdue_amt:   Option<f64>,
  pub extra1:        Option<String>,
  pub extra2:        Option<String>,
}

/// Role string an entry must carry to participate in user sync.
pub const OFFICER_ROLE: &str = "officer";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sync_user_wire_names_are_camel_case() {
    let u: SyncUser = serde_json::from_str(
      r#"{"username":"bog1","officerName":"X","role":"officer",
          "password":"pw","territoryId":"bogura"}"#,
    )
    .unwrap();
    assert_eq!(u.officer_name.as_deref(), Some("X"));
    assert_eq!(u.territory_id.as_deref(), Some("bogura"));
  }

  #[test]
  fn vehicle_perf_wire_names_are_camel_case() {
    let v: VehiclePerf = serde_json::from_str(
      r#"{"customerId":"c1","customerName":"N","model":"M",
          "km1":10.5,"km2":20.0,"earning":99.0,
          "overdueNo":2,"overdueAmt":150.0,"extra1":null,"extra2":null}"#,
    )
    .unwrap();
    assert_eq!(v.overdue_no, Some(2));
    assert_eq!(v.customer_id.as_deref(), Some("c1"));
  }
}
