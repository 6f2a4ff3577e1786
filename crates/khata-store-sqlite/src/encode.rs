//! Conversions between JSON scalars and SQLite values.
//!
//! Record values cross this boundary in both directions: bound as parameters
//! on the way in, read back column-by-column on the way out. SQLite has no
//! boolean type, so `true`/`false` are stored as 1/0 and read back as
//! integers.

use khata_core::Error as CoreError;
use rusqlite::types::Value as SqlValue;
use serde_json::{Number, Value as JsonValue};

use crate::Error;

/// Convert a JSON scalar into a bindable SQLite value.
///
/// Arrays and objects are rejected; [`khata_core::Record::validate`] has
/// normally refused them already.
pub fn json_to_sql(column: &str, value: &JsonValue) -> Result<SqlValue, Error> {
  match value {
    JsonValue::Null => Ok(SqlValue::Null),
    JsonValue::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
    JsonValue::Number(n) => {
      if let Some(i) = n.as_i64() {
        Ok(SqlValue::Integer(i))
      } else if let Some(f) = n.as_f64() {
        Ok(SqlValue::Real(f))
      } else {
        // u64 above i64::MAX; SQLite cannot hold it losslessly.
        Err(Error::Unrepresentable(column.to_owned()))
      }
    }
    JsonValue::String(s) => Ok(SqlValue::Text(s.clone())),
    JsonValue::Array(_) | JsonValue::Object(_) => {
      Err(Error::Core(CoreError::NonScalarValue { column: column.to_owned() }))
    }
  }
}

/// Convert a SQLite column value back into JSON.
pub fn sql_to_json(column: &str, value: SqlValue) -> Result<JsonValue, Error> {
  match value {
    SqlValue::Null => Ok(JsonValue::Null),
    SqlValue::Integer(i) => Ok(JsonValue::Number(Number::from(i))),
    SqlValue::Real(f) => Number::from_f64(f)
      .map(JsonValue::Number)
      .ok_or_else(|| Error::Unrepresentable(column.to_owned())),
    SqlValue::Text(s) => Ok(JsonValue::String(s)),
    SqlValue::Blob(_) => Err(Error::Unrepresentable(column.to_owned())),
  }
}
