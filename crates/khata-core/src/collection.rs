//! The closed registry of logical collections.
//!
//! Every collection maps 1:1 to a physical table of the same name, and every
//! table carries a fixed column list. Nothing caller-supplied is ever used as
//! a SQL identifier: requests resolve through this registry first, and both
//! an unknown collection name and an unknown column are rejected before any
//! statement text exists.

use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// A logical resource exposed over the API, backed by one physical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
  Users,
  Territories,
  Targets,
  Projections,
  Collections,
  OffroadVehicles,
  Settlements,
  AdminUnlocks,
  VehiclePerformance,
}

impl Collection {
  /// Every known collection, in snapshot order.
  pub const ALL: [Collection; 9] = [
    Collection::Users,
    Collection::Territories,
    Collection::Targets,
    Collection::Projections,
    Collection::Collections,
    Collection::OffroadVehicles,
    Collection::Settlements,
    Collection::AdminUnlocks,
    Collection::VehiclePerformance,
  ];

  /// Resolve a caller-supplied name against the registry.
  pub fn from_name(name: &str) -> Result<Self> {
    match name {
      "users" => Ok(Self::Users),
      "territories" => Ok(Self::Territories),
      "targets" => Ok(Self::Targets),
      "projections" => Ok(Self::Projections),
      "collections" => Ok(Self::Collections),
      "offroad_vehicles" => Ok(Self::OffroadVehicles),
      "settlements" => Ok(Self::Settlements),
      "admin_unlocks" => Ok(Self::AdminUnlocks),
      "vehicle_performance" => Ok(Self::VehiclePerformance),
      other => Err(Error::UnknownCollection(other.to_owned())),
    }
  }

  /// The physical table identifier. Only this string — never caller input —
  /// is interpolated into SQL text.
  pub const fn table(self) -> &'static str {
    match self {
      Self::Users => "users",
      Self::Territories => "territories",
      Self::Targets => "targets",
      Self::Projections => "projections",
      Self::Collections => "collections",
      Self::OffroadVehicles => "offroad_vehicles",
      Self::Settlements => "settlements",
      Self::AdminUnlocks => "admin_unlocks",
      Self::VehiclePerformance => "vehicle_performance",
    }
  }

  /// The closed column list for this table, identity column included.
  pub const fn columns(self) -> &'static [&'static str] {
    match self {
      Self::Users => {
        &["id", "username", "officer_name", "role", "password", "territory_id"]
      }
      Self::Territories => &["id", "name", "part", "officer"],
      Self::Targets => &[
        "id",
        "territory_id",
        "month",
        "files",
        "proj_files",
        "amount",
        "proj_reg",
        "proj_adv",
        "lm_np_target_amount",
        "lm_np_target_files",
        "total_od",
        "od_growth_sply",
        "per_file_od",
        "six_plus_od_files",
        "six_plus_od_growth_splm",
      ],
      Self::Projections => {
        &["id", "territory_id", "month", "files", "amount", "reg", "adv"]
      }
      Self::Collections => &["id", "territory_id", "month", "files", "amount"],
      Self::OffroadVehicles => &[
        "id",
        "customer_id",
        "customer_name",
        "model",
        "territory_id",
        "reason",
        "since",
      ],
      Self::Settlements => &[
        "id",
        "customer_id",
        "customer_name",
        "territory_id",
        "amount",
        "waiver",
        "settled_on",
      ],
      Self::AdminUnlocks => &["territory_id", "unlock_until"],
      Self::VehiclePerformance => &[
        "id",
        "customer_id",
        "customer_name",
        "model",
        "km1",
        "km2",
        "earning",
        "overdue_no",
        "overdue_amt",
        "extra1",
        "extra2",
      ],
    }
  }

  /// The physical column a record's `id` field addresses. Most tables use a
  /// literal `id`; `admin_unlocks` is keyed by territory.
  pub const fn id_column(self) -> &'static str {
    match self {
      Self::AdminUnlocks => "territory_id",
      _ => "id",
    }
  }

  /// Whether `column` belongs to this table.
  pub fn has_column(self, column: &str) -> bool {
    self.columns().iter().any(|c| *c == column)
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.table())
  }
}

impl FromStr for Collection {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::from_name(s) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_name_round_trips() {
    for c in Collection::ALL {
      assert_eq!(Collection::from_name(c.table()).unwrap(), c);
    }
  }

  #[test]
  fn unknown_name_is_rejected() {
    let err = Collection::from_name("users; DROP TABLE users").unwrap_err();
    assert!(matches!(err, Error::UnknownCollection(_)));
  }

  #[test]
  fn column_membership() {
    assert!(Collection::Territories.has_column("officer"));
    assert!(!Collection::Territories.has_column("password"));
    assert!(Collection::AdminUnlocks.has_column("unlock_until"));
  }
}
