//! Record — the loosely-typed row representation used by the generic mutator.
//!
//! A record is an insertion-ordered mapping from column name to JSON scalar.
//! The generic CRUD path is intentionally collection-agnostic: only the
//! [`Collection`](crate::Collection) registry knows table shapes, so the
//! record itself stays a dynamic key/value container rather than a per-table
//! struct.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Collection, Error, Result};

/// Prefix marking a client-generated placeholder id: the row does not exist
/// yet and the database assigns the real identifier on insert.
pub const NEW_ID_PREFIX: &str = "new_";

/// An ordered column → scalar mapping, possibly containing an `id` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
  /// The `id` field, if present and non-null.
  pub fn id(&self) -> Option<&Value> {
    self.0.get("id").filter(|v| !v.is_null())
  }

  /// Replace (or set) the `id` field.
  pub fn set_id(&mut self, id: Value) { self.0.insert("id".to_owned(), id); }

  /// The non-`id` field/value pairs, in insertion order.
  pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.0.iter().filter(|(k, _)| k.as_str() != "id").map(|(k, v)| (k.as_str(), v))
  }

  /// Whether this record takes the INSERT path: no usable `id`, or an `id`
  /// whose string form carries the [`NEW_ID_PREFIX`] sentinel.
  pub fn is_new(&self) -> bool {
    match self.id() {
      None => true,
      Some(Value::String(s)) => s.starts_with(NEW_ID_PREFIX),
      Some(_) => false,
    }
  }

  /// Check every non-`id` field against `collection`'s column allow-list and
  /// require every value to be a JSON scalar.
  ///
  /// Must pass before any SQL is built from this record.
  pub fn validate(&self, collection: Collection) -> Result<()> {
    for (column, value) in self.fields() {
      if !collection.has_column(column) {
        return Err(Error::UnknownColumn {
          collection: collection.table(),
          column:     column.to_owned(),
        });
      }
      if value.is_array() || value.is_object() {
        return Err(Error::NonScalarValue { column: column.to_owned() });
      }
    }
    Ok(())
  }
}

impl From<Map<String, Value>> for Record {
  fn from(map: Map<String, Value>) -> Self { Self(map) }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn record(v: Value) -> Record {
    match v {
      Value::Object(map) => Record(map),
      _ => panic!("expected object"),
    }
  }

  #[test]
  fn missing_id_is_new() {
    assert!(record(json!({ "name": "Bogura" })).is_new());
  }

  #[test]
  fn sentinel_id_is_new() {
    assert!(record(json!({ "id": "new_17", "name": "Bogura" })).is_new());
  }

  #[test]
  fn null_id_is_new() {
    assert!(record(json!({ "id": null, "name": "Bogura" })).is_new());
  }

  #[test]
  fn real_ids_are_not_new() {
    assert!(!record(json!({ "id": 42 })).is_new());
    assert!(!record(json!({ "id": "bogura" })).is_new());
  }

  #[test]
  fn fields_skip_id_and_keep_order() {
    let r = record(json!({ "name": "Bogura", "id": 3, "part": "A" }));
    let keys: Vec<&str> = r.fields().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["name", "part"]);
  }

  #[test]
  fn validate_rejects_unknown_column() {
    let r = record(json!({ "name": "x", "evil\" = 1 --": "y" }));
    let err = r.validate(Collection::Territories).unwrap_err();
    assert!(matches!(err, Error::UnknownColumn { .. }));
  }

  #[test]
  fn validate_rejects_nested_values() {
    let r = record(json!({ "name": { "nested": true } }));
    let err = r.validate(Collection::Territories).unwrap_err();
    assert!(matches!(err, Error::NonScalarValue { .. }));
  }

  #[test]
  fn validate_accepts_scalars() {
    let r = record(json!({ "name": "Bogura", "part": null, "officer": "X" }));
    r.validate(Collection::Territories).unwrap();
  }
}
